use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// The closed set of supported federated-login providers.
///
/// Ordering is the display order of the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKey {
    Facebook,
    GitHub,
}

impl ProviderKey {
    pub const ALL: [Self; 2] = [Self::Facebook, Self::GitHub];

    /// Stable machine key (`"facebook"`, `"github"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::GitHub => "github",
        }
    }

    #[must_use]
    pub fn default_display_name(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::GitHub => "GitHub",
        }
    }

    /// The provider's public authorization endpoint.
    #[must_use]
    pub fn default_authorization_uri(self) -> Url {
        let uri = match self {
            Self::Facebook => "https://www.facebook.com/dialog/oauth",
            Self::GitHub => "https://github.com/login/oauth/authorize",
        };
        uri.parse().expect("valid default URL")
    }

    fn env_prefix(self) -> &'static str {
        match self {
            Self::Facebook => "FACEBOOK",
            Self::GitHub => "GITHUB",
        }
    }
}

impl std::fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::Config(format!("unknown OAuth provider: {s}")))
    }
}

/// Configuration of one federated-login provider.
///
/// Starts disabled with the provider's default authorization endpoint; the
/// client id and redirect target must be supplied before it can be shown.
///
/// ```rust,ignore
/// use login_gate::{OAuthProviderConfig, ProviderKey};
///
/// let github = OAuthProviderConfig::new(ProviderKey::GitHub)
///     .with_client_id("my-client-id")
///     .with_redirect_uri("https://my-app.com/oauth/github/".parse()?)
///     .with_enabled(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct OAuthProviderConfig {
    pub(crate) key: ProviderKey,
    pub(crate) display_name: String,
    pub(crate) authorization_uri: Option<Url>,
    pub(crate) redirect_uri: Option<Url>,
    pub(crate) client_id: String,
    pub(crate) enabled: bool,
}

impl OAuthProviderConfig {
    #[must_use]
    pub fn new(key: ProviderKey) -> Self {
        Self {
            key,
            display_name: key.default_display_name().to_owned(),
            authorization_uri: Some(key.default_authorization_uri()),
            redirect_uri: None,
            client_id: String::new(),
            enabled: false,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Override the authorization endpoint.
    #[must_use]
    pub fn with_authorization_uri(mut self, url: Url) -> Self {
        self.authorization_uri = Some(url);
        self
    }

    /// Remove the authorization endpoint entirely.
    #[must_use]
    pub fn without_authorization_uri(mut self) -> Self {
        self.authorization_uri = None;
        self
    }

    #[must_use]
    pub fn with_redirect_uri(mut self, url: Url) -> Self {
        self.redirect_uri = Some(url);
        self
    }

    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn key(&self) -> ProviderKey {
        self.key
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn authorization_uri(&self) -> Option<&Url> {
        self.authorization_uri.as_ref()
    }

    #[must_use]
    pub fn redirect_uri(&self) -> Option<&Url> {
        self.redirect_uri.as_ref()
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Provider configurations keyed by [`ProviderKey`], populated at startup.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<ProviderKey, OAuthProviderConfig>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any previous config for the same key.
    #[must_use]
    pub fn with_provider(mut self, config: OAuthProviderConfig) -> Self {
        self.providers.insert(config.key, config);
        self
    }

    #[must_use]
    pub fn get(&self, key: ProviderKey) -> Option<&OAuthProviderConfig> {
        self.providers.get(&key)
    }

    /// All registered providers in display order.
    pub fn iter(&self) -> impl Iterator<Item = &OAuthProviderConfig> {
        self.providers.values()
    }

    /// Registered providers with `enabled == true`, in display order.
    pub fn enabled(&self) -> impl Iterator<Item = &OAuthProviderConfig> {
        self.iter().filter(|config| config.enabled)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Build the registry from environment variables.
    ///
    /// For each provider prefix (`GITHUB`, `FACEBOOK`):
    /// - `{P}_CLIENT_ID`: OAuth client ID
    /// - `{P}_REDIRECT_URI`: callback URI (must be a valid URL)
    /// - `{P}_AUTH_URL`: override the authorization endpoint
    /// - `{P}_ENABLED`: `"1"`/`"true"` or `"0"`/`"false"`; defaults to whether a client ID is set
    ///
    /// Providers with none of these variables set are not registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a URL does not parse.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut registry = Self::new();

        for key in ProviderKey::ALL {
            let prefix = key.env_prefix();
            let var = |suffix: &str| lookup(&format!("{prefix}_{suffix}"));

            let client_id = var("CLIENT_ID");
            let redirect_uri = var("REDIRECT_URI");
            let auth_url = var("AUTH_URL");
            let enabled = var("ENABLED");

            if client_id.is_none() && redirect_uri.is_none() && auth_url.is_none() && enabled.is_none()
            {
                continue;
            }

            let mut config = OAuthProviderConfig::new(key);

            if let Some(url_str) = redirect_uri {
                let url: Url = url_str
                    .parse()
                    .map_err(|e| Error::Config(format!("{prefix}_REDIRECT_URI: {e}")))?;
                config = config.with_redirect_uri(url);
            }
            if let Some(url_str) = auth_url {
                let url: Url = url_str
                    .parse()
                    .map_err(|e| Error::Config(format!("{prefix}_AUTH_URL: {e}")))?;
                config = config.with_authorization_uri(url);
            }

            let enabled = match enabled.as_deref() {
                Some("1") | Some("true") => true,
                Some(_) => false,
                None => client_id.is_some(),
            };

            config = config
                .with_client_id(client_id.unwrap_or_default())
                .with_enabled(enabled);

            registry = registry.with_provider(config);
        }

        Ok(registry)
    }
}
