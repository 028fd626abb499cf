use serde::Serialize;
use url::Url;

use crate::error::Error;
use crate::provider::{OAuthProviderConfig, ProviderKey, ProviderRegistry};

/// HTTP method the rendered provider form submits with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormMethod {
    Get,
}

/// Everything the rendering layer needs to send the user to a provider.
///
/// Describes the outbound authorization request; nothing here performs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct FederatedRedirect {
    pub provider_key: ProviderKey,
    pub provider_display_name: String,
    pub target_uri: String,
    pub form_method: FormMethod,
    /// Ordered hidden form fields: `client_id` first, then `redirect_uri`.
    pub hidden_params: Vec<(String, String)>,
}

impl FederatedRedirect {
    /// The same request as a single GET URL, hidden params appended as query pairs.
    #[must_use]
    pub fn to_url(&self) -> String {
        match Url::parse(&self.target_uri) {
            Ok(mut url) => {
                {
                    let mut pairs = url.query_pairs_mut();
                    for (name, value) in &self.hidden_params {
                        pairs.append_pair(name, value);
                    }
                }
                url.into()
            }
            Err(_) => self.target_uri.clone(),
        }
    }

    /// Submit-button caption for the provider's form.
    #[must_use]
    pub fn button_label(&self) -> String {
        format!("Login with {} \u{bb}", self.provider_display_name)
    }
}

/// Build the redirect descriptor for one provider.
///
/// Copies the authorization endpoint as the target and emits `client_id` and
/// `redirect_uri` as hidden params, in that order.
///
/// # Errors
///
/// Returns [`Error::ProviderMisconfigured`] if the client id is empty or
/// either URI is missing.
pub fn build(config: &OAuthProviderConfig) -> Result<FederatedRedirect, Error> {
    let misconfigured = |reason| Error::ProviderMisconfigured {
        provider: config.key,
        reason,
    };

    let authorization_uri = config
        .authorization_uri
        .as_ref()
        .ok_or_else(|| misconfigured("missing authorization URI"))?;
    let redirect_uri = config
        .redirect_uri
        .as_ref()
        .ok_or_else(|| misconfigured("missing redirect URI"))?;
    if config.client_id.trim().is_empty() {
        return Err(misconfigured("missing client id"));
    }

    Ok(FederatedRedirect {
        provider_key: config.key,
        provider_display_name: config.display_name.clone(),
        target_uri: authorization_uri.as_str().to_owned(),
        form_method: FormMethod::Get,
        hidden_params: vec![
            ("client_id".to_owned(), config.client_id.clone()),
            ("redirect_uri".to_owned(), redirect_uri.as_str().to_owned()),
        ],
    })
}

/// Descriptors for every enabled, correctly configured provider.
///
/// Disabled providers are skipped without being built. Misconfigured ones are
/// logged and left out.
#[must_use]
pub fn enabled_redirects(registry: &ProviderRegistry) -> Vec<FederatedRedirect> {
    registry
        .enabled()
        .filter_map(|config| match build(config) {
            Ok(redirect) => Some(redirect),
            Err(e) => {
                tracing::warn!(provider = %config.key, error = %e, "Skipping OAuth provider");
                None
            }
        })
        .collect()
}
