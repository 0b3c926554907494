/**
 * In-Memory Account Store
 *
 * `AccountStore` backed by a `HashMap` behind a single `tokio::sync::RwLock`.
 * Used by the test suites and by development runs without `DATABASE_URL`.
 *
 * Email uniqueness is checked and the record inserted under one write guard,
 * so two concurrent registrations for the same email can't both succeed.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::users::{
    Account, AccountStore, NewAccount, ProfileUpdate, StoreError, StoredCredentials,
};

#[derive(Clone)]
struct AccountRecord {
    account: Account,
    password_hash: String,
    /// Insertion order; accounts are never removed
    sequence: usize,
}

/// In-memory account store
#[derive(Clone, Default)]
pub struct MemoryAccountStore {
    records: Arc<RwLock<HashMap<Uuid, AccountRecord>>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.account.email == email)
            .map(|r| r.account.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.account.email == email)
            .map(|r| StoredCredentials {
                account_id: r.account.id,
                password_hash: r.password_hash.clone(),
            }))
    }

    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        account.validate()?;

        let mut records = self.records.write().await;
        if records.values().any(|r| r.account.email == account.email) {
            return Err(StoreError::UniqueViolation);
        }

        let sequence = records.len();
        let created = Account {
            id: Uuid::new_v4(),
            email: account.email,
            name: account.name,
            about: account.about,
            avatar: account.avatar,
        };
        records.insert(
            created.id,
            AccountRecord {
                account: created.clone(),
                password_hash: account.password_hash,
                sequence,
            },
        );

        tracing::debug!("Stored account {}", created.id);
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.records.read().await.get(&id).map(|r| r.account.clone()))
    }

    async fn update(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<Account>, StoreError> {
        update.validate()?;

        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            record.account.name = name;
        }
        if let Some(about) = update.about {
            record.account.about = about;
        }
        if let Some(avatar) = update.avatar {
            record.account.avatar = avatar;
        }

        Ok(Some(record.account.clone()))
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let records = self.records.read().await;
        let mut all: Vec<&AccountRecord> = records.values().collect();
        all.sort_by_key(|r| r.sequence);
        Ok(all.into_iter().map(|r| r.account.clone()).collect())
    }
}
