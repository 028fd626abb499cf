use axum_extra::extract::PrivateCookieJar;

use super::error::LoginError;
use crate::session::SessionStore;
use crate::types::{IdentityClaim, SessionToken};

/// Resolve the caller's identity from the session cookie.
///
/// Only the session token counts as proof of identity; the username cookie is
/// never consulted here. A missing cookie or an unknown token yields
/// [`IdentityClaim::Anonymous`].
///
/// ```rust,ignore
/// let claim = resolve_identity(&session_store, &jar, "login_session").await?;
/// if !SessionGuard::is_authenticated(&claim) {
///     return Err(StatusCode::UNAUTHORIZED);
/// }
/// ```
///
/// # Errors
///
/// Returns [`LoginError::Store`] if the session store lookup fails.
pub async fn resolve_identity<S: SessionStore>(
    store: &S,
    jar: &PrivateCookieJar,
    session_cookie_name: &str,
) -> Result<IdentityClaim, LoginError> {
    let Some(token) = jar
        .get(session_cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
    else {
        return Ok(IdentityClaim::Anonymous);
    };

    let owner = store
        .find(&SessionToken(token))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Session lookup failed");
            LoginError::Store(e.to_string())
        })?;

    Ok(IdentityClaim::from(owner))
}
