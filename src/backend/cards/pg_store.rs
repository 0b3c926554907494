/**
 * PostgreSQL Card Store
 *
 * `CardStore` backed by the `cards` table. Likes live in a `UUID[]` column;
 * `array_append` guarded by `ANY` keeps them duplicate-free.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::pg_store::map_sqlx_error;
use crate::backend::auth::users::StoreError;
use crate::backend::cards::model::{Card, CardDeletion, CardStore, NewCard};

const CARD_COLUMNS: &str = "id, name, link, owner, likes, created_at";

/// PostgreSQL card store
#[derive(Clone)]
pub struct PgCardStore {
    pool: PgPool,
}

impl PgCardStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardStore for PgCardStore {
    async fn list(&self) -> Result<Vec<Card>, StoreError> {
        sqlx::query_as::<_, Card>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn create(&self, card: NewCard) -> Result<Card, StoreError> {
        card.validate()?;

        sqlx::query_as::<_, Card>(&format!(
            r#"
            INSERT INTO cards (id, name, link, owner, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CARD_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(card.name)
        .bind(card.link)
        .bind(card.owner)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Card>, StoreError> {
        sqlx::query_as::<_, Card>(&format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<CardDeletion, StoreError> {
        let deleted = sqlx::query_as::<_, Card>(&format!(
            "DELETE FROM cards WHERE id = $1 AND owner = $2 RETURNING {CARD_COLUMNS}"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if let Some(card) = deleted {
            return Ok(CardDeletion::Deleted(card));
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM cards WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(if exists {
            CardDeletion::NotOwner
        } else {
            CardDeletion::NotFound
        })
    }

    async fn like(&self, id: Uuid, account: Uuid) -> Result<Option<Card>, StoreError> {
        sqlx::query_as::<_, Card>(&format!(
            r#"
            UPDATE cards
            SET likes = CASE WHEN $2 = ANY (likes) THEN likes ELSE array_append(likes, $2) END
            WHERE id = $1
            RETURNING {CARD_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(account)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn unlike(&self, id: Uuid, account: Uuid) -> Result<Option<Card>, StoreError> {
        sqlx::query_as::<_, Card>(&format!(
            "UPDATE cards SET likes = array_remove(likes, $2) WHERE id = $1 RETURNING {CARD_COLUMNS}"
        ))
        .bind(id)
        .bind(account)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }
}
