/**
 * Authentication Middleware
 *
 * This module protects routes that require a signed-in account. It reads
 * the session token from the `jwt` cookie, verifies it and provides the
 * account id to handlers.
 *
 * Every failure (no cookie, bad signature, expired, malformed) is a 401.
 * The protected handler never runs after a failure.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::cookies::SessionCookie;
use crate::backend::auth::sessions::TokenCodec;
use crate::backend::error::{BackendError, AUTHENTICATION_REQUIRED};
use crate::backend::server::state::AppState;

/// Account identity established by a verified session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: Uuid,
}

/// Verify the session carried by request headers
///
/// Returns `AUTHENTICATION_REQUIRED` when no cookie was sent and
/// `AUTHENTICATION_ERROR` when the token fails verification.
pub fn authenticate(
    cookies: &SessionCookie,
    tokens: &TokenCodec,
    headers: &HeaderMap,
) -> Result<AuthenticatedAccount, BackendError> {
    let token = cookies.extract(headers).ok_or_else(|| {
        tracing::debug!("No session cookie");
        BackendError::unauthorized(AUTHENTICATION_REQUIRED)
    })?;

    let account_id = tokens.verify(&token).map_err(|e| {
        tracing::warn!("Session rejected: {}", e);
        BackendError::from(e)
    })?;

    Ok(AuthenticatedAccount { account_id })
}

/// Session gate
///
/// This middleware:
/// 1. Extracts the token from the `jwt` cookie
/// 2. Verifies signature and expiry
/// 3. Attaches `AuthenticatedAccount` to request extensions
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let account = authenticate(&state.cookies, &state.tokens, request.headers())?;

    request.extensions_mut().insert(account);

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated account
///
/// Only valid behind `require_session`; without it the extractor rejects
/// with 401.
#[derive(Clone, Copy, Debug)]
pub struct CurrentAccount(pub AuthenticatedAccount);

impl CurrentAccount {
    pub fn id(&self) -> Uuid {
        self.0.account_id
    }
}

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAccount>()
            .copied()
            .map(CurrentAccount)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedAccount not found in request extensions");
                BackendError::unauthorized(AUTHENTICATION_REQUIRED)
            })
    }
}
