/**
 * Server Initialization
 *
 * This module builds the Axum application from loaded configuration.
 *
 * # Initialization Process
 *
 * 1. Pick the account and card stores: PostgreSQL when `DATABASE_URL` is
 *    set, in-memory otherwise (configuration refuses that in production)
 * 2. Build `AppState` from the auth configuration
 * 3. Create the router with the session gate, CORS and tracing layers
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::memory_store::MemoryAccountStore;
use crate::backend::auth::pg_store::PgAccountStore;
use crate::backend::cards::memory_store::MemoryCardStore;
use crate::backend::cards::pg_store::PgCardStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, AppConfig};
use crate::backend::server::state::{AppState, DynAccountStore, DynCardStore};

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if a database is configured but cannot be reached.
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing mesto backend server ({:?} mode)", config.auth.mode);

    let (store, cards): (DynAccountStore, DynCardStore) = match &config.database_url {
        Some(url) => {
            let pool = load_database(url).await?;
            (
                Arc::new(PgAccountStore::new(pool.clone())),
                Arc::new(PgCardStore::new(pool)),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set, accounts and cards are kept in memory");
            (
                Arc::new(MemoryAccountStore::new()),
                Arc::new(MemoryCardStore::new()),
            )
        }
    };

    Ok(create_app_with_stores(config, store, cards))
}

/// Same as `create_app` over already constructed stores
pub fn create_app_with_stores(
    config: &AppConfig,
    store: DynAccountStore,
    cards: DynCardStore,
) -> Router<()> {
    let app_state = AppState::new(&config.auth, store, cards);
    let app = create_router(app_state, &config.cors_origins);

    tracing::info!("Router configured");

    app
}
