/**
 * API Route Handlers
 *
 * This module wires the handlers to their paths.
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /signup` - Account registration
 * - `POST /signin` - Sign in, sets the session cookie
 * - `GET /signout` - Clears the session cookie
 *
 * ## Profile (session required)
 * - `GET /users` - All accounts
 * - `GET /users/me` - Current account
 * - `PATCH /users/me` - Update name and about
 * - `PATCH /users/me/avatar` - Update avatar
 * - `GET /users/{user_id}` - One account
 *
 * ## Cards (session required)
 * - `GET /cards` - All cards, newest first
 * - `POST /cards` - Post a card
 * - `DELETE /cards/{card_id}` - Delete an own card
 * - `PUT /cards/{card_id}/likes` - Like
 * - `DELETE /cards/{card_id}/likes` - Remove like
 */

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::backend::auth::handlers::{signin, signout, signup};
use crate::backend::cards::{create_card, delete_card, like_card, list_cards, unlike_card};
use crate::backend::profile::{get_me, get_user, list_users, update_avatar, update_profile};
use crate::backend::server::state::AppState;

/// Configure the public authentication routes
pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/signout", get(signout))
}

/// Configure the profile routes
///
/// The caller is expected to put these behind `require_session`.
pub fn configure_user_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/users", get(list_users))
        .route("/users/me", get(get_me).patch(update_profile))
        .route("/users/me/avatar", patch(update_avatar))
        .route("/users/{user_id}", get(get_user))
}

/// Configure the card routes
///
/// Same as the profile routes, these go behind `require_session`.
pub fn configure_card_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/cards", get(list_cards).post(create_card))
        .route("/cards/{card_id}", delete(delete_card))
        .route("/cards/{card_id}/likes", put(like_card).delete(unlike_card))
}
