/**
 * Sign-out Handler
 *
 * GET /signout clears the `jwt` cookie. Tokens are stateless, so there is
 * nothing to revoke server-side and the call always succeeds, with or
 * without a valid session.
 */

use axum::{extract::State, http::HeaderMap, response::Json};

use crate::backend::auth::cookies::SessionCookie;
use crate::backend::auth::handlers::types::MessageResponse;

pub const SIGNED_OUT_MESSAGE: &str = "signed out";

/// Sign out handler
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Set-Cookie: jwt=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/; HttpOnly; SameSite=None; Secure
///
/// { "message": "signed out" }
/// ```
pub async fn signout(State(cookies): State<SessionCookie>) -> (HeaderMap, Json<MessageResponse>) {
    let mut headers = HeaderMap::new();
    cookies.clear(&mut headers);

    tracing::debug!("Session cookie cleared");

    (
        headers,
        Json(MessageResponse {
            message: SIGNED_OUT_MESSAGE.to_string(),
        }),
    )
}
