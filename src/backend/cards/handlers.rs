//! Card HTTP Handlers
//!
//! Every route sits behind the session gate. Mutations answer
//! `{ "data": card }`; the list answers a bare array.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::cards::model::{Card, CardDeletion, NewCard};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::CurrentAccount;
use crate::backend::server::state::DynCardStore;

const CARD_NOT_FOUND: &str = "card not found";
const NOT_CARD_OWNER: &str = "cards can only be deleted by their owner";

/// Body of POST /cards
#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    pub name: String,
    pub link: String,
}

/// Envelope for a single changed card
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardResponse {
    pub data: Card,
}

fn parse_card_id(card_id: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(card_id).map_err(|_| BackendError::invalid_input("invalid card id"))
}

/// List every card, newest first
pub async fn list_cards(
    State(cards): State<DynCardStore>,
) -> Result<Json<Vec<Card>>, BackendError> {
    Ok(Json(cards.list().await?))
}

/// Post a card owned by the caller
///
/// # Example Request
///
/// ```http
/// POST /cards HTTP/1.1
/// Cookie: jwt=eyJhbGciOiJIUzI1NiJ9...
/// Content-Type: application/json
///
/// { "name": "Baikal", "link": "https://example.com/baikal.jpg" }
/// ```
pub async fn create_card(
    State(cards): State<DynCardStore>,
    current: CurrentAccount,
    payload: Result<Json<CreateCardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CardResponse>), BackendError> {
    let Json(request) = payload?;

    let card = cards
        .create(NewCard {
            name: request.name,
            link: request.link,
            owner: current.id(),
        })
        .await?;

    tracing::info!("Card {} created by {}", card.id, card.owner);

    Ok((StatusCode::CREATED, Json(CardResponse { data: card })))
}

/// Delete a card the caller owns
///
/// # Errors
///
/// * `400 Bad Request` - card id is not a UUID
/// * `403 Forbidden` - card belongs to another account
/// * `404 Not Found` - no such card
pub async fn delete_card(
    State(cards): State<DynCardStore>,
    current: CurrentAccount,
    Path(card_id): Path<String>,
) -> Result<Json<CardResponse>, BackendError> {
    let id = parse_card_id(&card_id)?;

    match cards.delete_owned(id, current.id()).await? {
        CardDeletion::Deleted(card) => {
            tracing::info!("Card {} deleted", card.id);
            Ok(Json(CardResponse { data: card }))
        }
        CardDeletion::NotFound => Err(BackendError::not_found(CARD_NOT_FOUND)),
        CardDeletion::NotOwner => {
            tracing::warn!("Account {} tried to delete card {}", current.id(), id);
            Err(BackendError::forbidden(NOT_CARD_OWNER))
        }
    }
}

/// Like a card; liking twice keeps one like
pub async fn like_card(
    State(cards): State<DynCardStore>,
    current: CurrentAccount,
    Path(card_id): Path<String>,
) -> Result<Json<CardResponse>, BackendError> {
    let id = parse_card_id(&card_id)?;

    cards
        .like(id, current.id())
        .await?
        .map(|data| Json(CardResponse { data }))
        .ok_or_else(|| BackendError::not_found(CARD_NOT_FOUND))
}

/// Remove the caller's like
pub async fn unlike_card(
    State(cards): State<DynCardStore>,
    current: CurrentAccount,
    Path(card_id): Path<String>,
) -> Result<Json<CardResponse>, BackendError> {
    let id = parse_card_id(&card_id)?;

    cards
        .unlike(id, current.id())
        .await?
        .map(|data| Json(CardResponse { data }))
        .ok_or_else(|| BackendError::not_found(CARD_NOT_FOUND))
}
