use std::time::Duration;

use axum_extra::extract::cookie::Key;

use super::error::LoginError;
use crate::provider::ProviderRegistry;
use crate::session::DEFAULT_WRITE_TIMEOUT;

/// Shared login settings used by both config and runtime state.
#[derive(Clone)]
pub(crate) struct AuthSettings {
    pub(crate) cookie_key: Key,
    pub(crate) session_cookie_name: String,
    pub(crate) username_cookie_name: String,
    pub(crate) session_ttl_days: i64,
    pub(crate) secure_cookies: bool,
    pub(crate) login_path: String,
    pub(crate) app_root: String,
    pub(crate) session_write_timeout: Duration,
}

impl AuthSettings {
    fn defaults() -> Self {
        Self {
            cookie_key: Key::generate(),
            session_cookie_name: "login_session".into(),
            username_cookie_name: "login_user".into(),
            session_ttl_days: 30,
            secure_cookies: true,
            login_path: "/login".into(),
            app_root: "/".into(),
            session_write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

/// Login router configuration.
///
/// Use [`from_env()`](LoginConfig::from_env) for convention-based setup,
/// or [`new()`](LoginConfig::new) with `with_*` methods for full control.
pub struct LoginConfig {
    pub(super) providers: ProviderRegistry,
    pub(super) settings: AuthSettings,
}

impl LoginConfig {
    /// Create config with the federated-login providers to offer.
    ///
    /// All other fields use sensible defaults. Override with `with_*` methods.
    #[must_use]
    pub fn new(providers: ProviderRegistry) -> Self {
        Self {
            providers,
            settings: AuthSettings::defaults(),
        }
    }

    /// Create config from environment variables.
    ///
    /// # Env vars
    /// - Provider variables, see [`ProviderRegistry::from_env`]
    /// - `LOGIN_PATH`: Route the login form is served on (default `/login`)
    /// - `APP_ROOT`: Where logged-in users are sent (default `/`)
    /// - `DEV_AUTH`: Set to `"1"` or `"true"` to disable secure cookies
    /// - `COOKIE_KEY`: Cookie encryption key bytes
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Config`] if a provider URL or the cookie key is invalid.
    pub fn from_env() -> Result<Self, LoginError> {
        let providers = ProviderRegistry::from_env()?;
        let mut config = Self::new(providers);

        if let Ok(path) = std::env::var("LOGIN_PATH") {
            config = config.with_login_path(path);
        }
        if let Ok(root) = std::env::var("APP_ROOT") {
            config = config.with_app_root(root);
        }

        let dev_auth = matches!(
            std::env::var("DEV_AUTH").as_deref(),
            Ok("1") | Ok("true"),
        );

        let cookie_key = match std::env::var("COOKIE_KEY") {
            Ok(k) => Key::try_from(k.as_bytes()).map_err(|_| {
                LoginError::Config(
                    "COOKIE_KEY is set but invalid (must be at least 64 bytes). \
                     Remove the env var to use an ephemeral key, or provide a valid key."
                        .into(),
                )
            })?,
            Err(_) => Key::generate(),
        };

        Ok(config
            .with_cookie_key(cookie_key)
            .with_secure_cookies(!dev_auth))
    }

    #[must_use]
    pub fn with_cookie_key(mut self, key: Key) -> Self {
        self.settings.cookie_key = key;
        self
    }

    #[must_use]
    pub fn with_session_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.settings.session_cookie_name = name.into();
        self
    }

    #[must_use]
    pub fn with_username_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.settings.username_cookie_name = name.into();
        self
    }

    #[must_use]
    pub fn with_session_ttl_days(mut self, days: i64) -> Self {
        self.settings.session_ttl_days = days;
        self
    }

    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.settings.secure_cookies = secure;
        self
    }

    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.settings.login_path = path.into();
        self
    }

    #[must_use]
    pub fn with_app_root(mut self, path: impl Into<String>) -> Self {
        self.settings.app_root = path.into();
        self
    }

    #[must_use]
    pub fn with_session_write_timeout(mut self, timeout: Duration) -> Self {
        self.settings.session_write_timeout = timeout;
        self
    }
}
