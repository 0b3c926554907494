/**
 * Router Configuration
 *
 * This module combines the route groups into a single Axum router.
 *
 * # Layers
 *
 * 1. Profile and card routes behind the `require_session` gate
 *    (`route_layer`, so unknown paths still reach the fallback as 404
 *    rather than 401)
 * 2. Public authentication routes
 * 3. Fallbacks: `404 {message}` for unknown paths, `405 {message}` for
 *    known paths called with the wrong method
 * 4. Credentialed CORS for the configured client origins
 * 5. Request tracing
 */

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, ORIGIN},
        HeaderValue, Method,
    },
    middleware::from_fn_with_state,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::error::conversion::{method_not_allowed, route_not_found};
use crate::backend::middleware::auth::require_session;
use crate::backend::routes::api_routes::{
    configure_auth_routes, configure_card_routes, configure_user_routes,
};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Store, hasher, token codec and cookie policy
/// * `cors_origins` - Origins allowed to send credentialed requests
pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Router<()> {
    let protected = configure_card_routes(configure_user_routes(Router::new()))
        .route_layer(from_fn_with_state(app_state.clone(), require_session));

    // method_not_allowed_fallback only reaches routes that already exist
    let router = configure_auth_routes(Router::new())
        .merge(protected)
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed);

    router
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// CORS policy for a cookie-carrying browser client
///
/// Credentials rule out wildcards, so origins are listed explicitly.
/// Entries that are not valid header values are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE, ORIGIN, AUTHORIZATION])
}
