/**
 * In-Memory Card Store
 *
 * Cards kept in insertion order behind one `tokio::sync::RwLock`. Every
 * mutation, including the ownership check on delete, runs under a single
 * write guard.
 */

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::users::StoreError;
use crate::backend::cards::model::{Card, CardDeletion, CardStore, NewCard};

/// In-memory card store
#[derive(Clone, Default)]
pub struct MemoryCardStore {
    cards: Arc<RwLock<Vec<Card>>>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.cards.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cards.read().await.is_empty()
    }

    async fn modify_likes(
        &self,
        id: Uuid,
        change: impl FnOnce(&mut Vec<Uuid>),
    ) -> Result<Option<Card>, StoreError> {
        let mut cards = self.cards.write().await;
        Ok(cards.iter_mut().find(|c| c.id == id).map(|card| {
            change(&mut card.likes);
            card.clone()
        }))
    }
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn list(&self) -> Result<Vec<Card>, StoreError> {
        Ok(self.cards.read().await.iter().rev().cloned().collect())
    }

    async fn create(&self, card: NewCard) -> Result<Card, StoreError> {
        card.validate()?;

        let created = Card {
            id: Uuid::new_v4(),
            name: card.name,
            link: card.link,
            owner: card.owner,
            likes: Vec::new(),
            created_at: Utc::now(),
        };
        self.cards.write().await.push(created.clone());

        tracing::debug!("Stored card {}", created.id);
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Card>, StoreError> {
        Ok(self.cards.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<CardDeletion, StoreError> {
        let mut cards = self.cards.write().await;
        let Some(index) = cards.iter().position(|c| c.id == id) else {
            return Ok(CardDeletion::NotFound);
        };
        if cards[index].owner != owner {
            return Ok(CardDeletion::NotOwner);
        }
        Ok(CardDeletion::Deleted(cards.remove(index)))
    }

    async fn like(&self, id: Uuid, account: Uuid) -> Result<Option<Card>, StoreError> {
        self.modify_likes(id, |likes| {
            if !likes.contains(&account) {
                likes.push(account);
            }
        })
        .await
    }

    async fn unlike(&self, id: Uuid, account: Uuid) -> Result<Option<Card>, StoreError> {
        self.modify_likes(id, |likes| likes.retain(|liker| *liker != account))
            .await
    }
}
