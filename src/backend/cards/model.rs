/**
 * Card Model
 *
 * A card is a named photo link posted by an account. Likes are the set of
 * account ids that liked it; liking twice is the same as liking once.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::{is_valid_http_url, is_valid_profile_text, StoreError};

/// Card as stored and returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Caption, 2-30 characters
    pub name: String,
    /// Image URL
    pub link: String,
    /// Account that posted the card
    pub owner: Uuid,
    /// Accounts that liked the card, no duplicates
    pub likes: Vec<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Card about to be created
#[derive(Debug, Clone)]
pub struct NewCard {
    pub name: String,
    pub link: String,
    pub owner: Uuid,
}

impl NewCard {
    pub fn validate(&self) -> Result<(), StoreError> {
        if !is_valid_profile_text(&self.name) {
            return Err(StoreError::Validation("name must be 2-30 characters".into()));
        }
        if !is_valid_http_url(&self.link) {
            return Err(StoreError::Validation("link must be an http(s) URL".into()));
        }
        Ok(())
    }
}

/// Outcome of an owner-checked delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardDeletion {
    Deleted(Card),
    NotFound,
    /// The card exists but belongs to another account; nothing was removed
    NotOwner,
}

/// Card store operations
///
/// `delete_owned` must check ownership and remove the card atomically.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// All cards, newest first
    async fn list(&self) -> Result<Vec<Card>, StoreError>;

    async fn create(&self, card: NewCard) -> Result<Card, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Card>, StoreError>;

    /// Delete a card if `owner` posted it
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<CardDeletion, StoreError>;

    /// Add `account` to the likes; `None` if the card doesn't exist
    async fn like(&self, id: Uuid, account: Uuid) -> Result<Option<Card>, StoreError>;

    /// Remove `account` from the likes; `None` if the card doesn't exist
    async fn unlike(&self, id: Uuid, account: Uuid) -> Result<Option<Card>, StoreError>;
}
