use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::WebError;

/// Session key holding the username of the logged-in user.
pub const SESSION_USER_KEY: &str = "user";

/// Login guard applied to the whole protected sub-router.
///
/// Every mutating route goes through here, so a route added to that
/// sub-router can never ship unprotected. Anonymous requests are redirected
/// to the login form with no side effect and no flash.
pub async fn require_login(session: Session, request: Request, next: Next) -> Response {
    match session.get::<String>(SESSION_USER_KEY).await {
        Ok(Some(_)) => next.run(request).await,
        _ => Redirect::to("/login").into_response(),
    }
}

/// Get the username from the session, for handlers behind `require_login`.
pub async fn session_username(session: &Session) -> Result<String, WebError> {
    session
        .get::<String>(SESSION_USER_KEY)
        .await
        .map_err(|e| WebError::internal(format!("Session error: {e}")))?
        .ok_or(WebError::Unauthorized)
}
