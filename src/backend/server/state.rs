/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds everything the request handlers need:
 * - the account and card stores (PostgreSQL or in-memory)
 * - the password hasher
 * - the token codec and session cookie, both built from `AuthConfig`
 *
 * # Thread Safety
 *
 * Everything except the stores is immutable after startup. Each store is
 * an `Arc<dyn ..>` and does its own synchronisation.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only the part they
 * use, e.g. `State(cookies): State<SessionCookie>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::cookies::SessionCookie;
use crate::backend::auth::passwords::PasswordHasher;
use crate::backend::auth::sessions::TokenCodec;
use crate::backend::auth::users::AccountStore;
use crate::backend::cards::model::CardStore;
use crate::backend::server::config::AuthConfig;

/// Shared handle to the account store
pub type DynAccountStore = Arc<dyn AccountStore>;

/// Shared handle to the card store
pub type DynCardStore = Arc<dyn CardStore>;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Account store
    pub store: DynAccountStore,

    /// Card store
    pub cards: DynCardStore,

    /// bcrypt hasher
    pub passwords: PasswordHasher,

    /// Session token codec holding the signing key
    pub tokens: Arc<TokenCodec>,

    /// Session cookie policy
    pub cookies: SessionCookie,
}

impl AppState {
    /// Build state from the auth configuration and the stores
    pub fn new(config: &AuthConfig, store: DynAccountStore, cards: DynCardStore) -> Self {
        Self::with_hasher(config, store, cards, PasswordHasher::new())
    }

    /// Same as `new` with an explicit hasher
    pub fn with_hasher(
        config: &AuthConfig,
        store: DynAccountStore,
        cards: DynCardStore,
        passwords: PasswordHasher,
    ) -> Self {
        Self {
            store,
            cards,
            passwords,
            tokens: Arc::new(TokenCodec::new(config)),
            cookies: SessionCookie::new(config),
        }
    }
}

impl FromRef<AppState> for DynAccountStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for DynCardStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.cards.clone()
    }
}

impl FromRef<AppState> for PasswordHasher {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.passwords.clone()
    }
}

impl FromRef<AppState> for Arc<TokenCodec> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for SessionCookie {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.cookies.clone()
    }
}

#[cfg(test)]
impl AppState {
    /// Development state over an in-memory store with a cheap bcrypt cost
    pub(crate) fn in_memory() -> (Self, crate::backend::auth::memory_store::MemoryAccountStore) {
        let store = crate::backend::auth::memory_store::MemoryAccountStore::new();
        let state = Self::with_hasher(
            &AuthConfig::development(),
            Arc::new(store.clone()),
            Arc::new(crate::backend::cards::memory_store::MemoryCardStore::new()),
            PasswordHasher::with_cost(crate::backend::auth::passwords::MIN_COST),
        );
        (state, store)
    }
}
