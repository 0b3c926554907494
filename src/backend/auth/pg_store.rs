/**
 * PostgreSQL Account Store
 *
 * `AccountStore` backed by the `users` table (see `migrations/`).
 * Uniqueness of `email` is enforced by the `users_email_key` unique index;
 * the CHECK constraints mirror `ProfileUpdate::validate`.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::{
    Account, AccountStore, NewAccount, ProfileUpdate, StoreError, StoredCredentials,
};

const ACCOUNT_COLUMNS: &str = "id, email, name, about, avatar";

/// PostgreSQL account store
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error onto the store taxonomy
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::UniqueViolation;
        }
        if db_err.is_check_violation() {
            return StoreError::Validation(
                db_err
                    .constraint()
                    .map(|c| format!("constraint {c} violated"))
                    .unwrap_or_else(|| "check constraint violated".to_string()),
            );
        }
    }
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, StoreError> {
        sqlx::query_as::<_, StoredCredentials>(
            r#"
            SELECT id AS account_id, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        account.validate()?;

        let now = Utc::now();
        sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO users (id, email, password_hash, name, about, avatar, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(account.email)
        .bind(account.password_hash)
        .bind(account.name)
        .bind(account.about)
        .bind(account.avatar)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<Account>, StoreError> {
        update.validate()?;

        // COALESCE keeps the stored value for fields that weren't sent
        sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($1, name),
                about = COALESCE($2, about),
                avatar = COALESCE($3, avatar),
                updated_at = $4
            WHERE id = $5
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(update.name)
        .bind(update.about)
        .bind(update.avatar)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_non_database_errors_are_backend_errors() {
        assert_matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            StoreError::Backend(_)
        );
        assert_matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StoreError::Backend(_)
        );
    }
}
