use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use super::config::AuthSettings;
use crate::login::SessionBinding;

/// Create the identity-hint and session cookies for a fresh login.
pub(super) fn binding_cookies(
    settings: &AuthSettings,
    username: &str,
    token: &str,
) -> (Cookie<'static>, Cookie<'static>) {
    let user = Cookie::build((settings.username_cookie_name.clone(), username.to_string()))
        .http_only(true)
        .secure(settings.secure_cookies)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::days(settings.session_ttl_days))
        .build();

    let session = Cookie::build((settings.session_cookie_name.clone(), token.to_string()))
        .http_only(true)
        .secure(settings.secure_cookies)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::days(settings.session_ttl_days))
        .build();

    (user, session)
}

/// Create removal cookies for both binding halves.
pub(super) fn clear_binding_cookies(settings: &AuthSettings) -> (Cookie<'static>, Cookie<'static>) {
    let user = Cookie::build((settings.username_cookie_name.clone(), ""))
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build();

    let session = Cookie::build((settings.session_cookie_name.clone(), ""))
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build();

    (user, session)
}

/// Write a binding into the jar. Both halves change together.
pub(super) fn apply_binding(
    jar: PrivateCookieJar,
    binding: &SessionBinding,
    settings: &AuthSettings,
) -> PrivateCookieJar {
    let (user, session) = match binding {
        SessionBinding::Set { username, token } => {
            binding_cookies(settings, username.as_str(), token.as_str())
        }
        SessionBinding::Cleared => clear_binding_cookies(settings),
    };
    jar.add(user).add(session)
}

/// Get the identity hint from cookies.
pub(super) fn get_username_hint(jar: &PrivateCookieJar, settings: &AuthSettings) -> Option<String> {
    jar.get(&settings.username_cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
