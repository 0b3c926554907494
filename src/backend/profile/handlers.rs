//! Profile HTTP Handlers
//!
//! Read and update account profiles. Responses carry the public account
//! fields only; password hashes never leave the store.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::auth::users::{Account, ProfileUpdate};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::CurrentAccount;
use crate::backend::server::state::DynAccountStore;

const ACCOUNT_NOT_FOUND: &str = "account not found";

/// Body of PATCH /users/me
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub about: String,
}

/// Body of PATCH /users/me/avatar
#[derive(Debug, Deserialize)]
pub struct UpdateAvatarRequest {
    pub avatar: String,
}

/// List every account
pub async fn list_users(
    State(store): State<DynAccountStore>,
) -> Result<Json<Vec<Account>>, BackendError> {
    let accounts = store.list().await?;
    Ok(Json(accounts))
}

/// Current account
///
/// A valid token can outlive its account, which is reported as 404.
pub async fn get_me(
    State(store): State<DynAccountStore>,
    current: CurrentAccount,
) -> Result<Json<Account>, BackendError> {
    store
        .find_by_id(current.id())
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found(ACCOUNT_NOT_FOUND))
}

/// One account by id
pub async fn get_user(
    State(store): State<DynAccountStore>,
    Path(user_id): Path<String>,
) -> Result<Json<Account>, BackendError> {
    let id = Uuid::parse_str(&user_id)
        .map_err(|_| BackendError::invalid_input("invalid account id"))?;

    store
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found(ACCOUNT_NOT_FOUND))
}

/// Update name and about of the current account
pub async fn update_profile(
    State(store): State<DynAccountStore>,
    current: CurrentAccount,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<Account>, BackendError> {
    let Json(request) = payload?;

    apply_update(
        &store,
        current.id(),
        ProfileUpdate {
            name: Some(request.name),
            about: Some(request.about),
            avatar: None,
        },
    )
    .await
}

/// Update the avatar of the current account
pub async fn update_avatar(
    State(store): State<DynAccountStore>,
    current: CurrentAccount,
    payload: Result<Json<UpdateAvatarRequest>, JsonRejection>,
) -> Result<Json<Account>, BackendError> {
    let Json(request) = payload?;

    apply_update(
        &store,
        current.id(),
        ProfileUpdate {
            avatar: Some(request.avatar),
            ..ProfileUpdate::default()
        },
    )
    .await
}

async fn apply_update(
    store: &DynAccountStore,
    id: Uuid,
    update: ProfileUpdate,
) -> Result<Json<Account>, BackendError> {
    update.validate()?;

    let updated = store
        .update(id, update)
        .await?
        .ok_or_else(|| BackendError::not_found(ACCOUNT_NOT_FOUND))?;

    tracing::info!("Profile updated: {}", id);

    Ok(Json(updated))
}
