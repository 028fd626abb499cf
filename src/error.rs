use crate::provider::ProviderKey;

/// Boxed error returned by consumer-implemented stores.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Unknown username or wrong password. The two are deliberately indistinguishable.
    #[error("Bad username/password.")]
    InvalidCredentials,

    /// Credentials were valid but the new session could not be recorded.
    #[error("Session persistence error: {0}")]
    SessionPersistence(String),

    /// The credential store failed while resolving a username.
    #[error("Credential lookup error: {0}")]
    CredentialLookup(String),

    /// An enabled provider lacks a field required to build its redirect.
    #[error("OAuth provider {provider} is misconfigured: {reason}")]
    ProviderMisconfigured {
        provider: ProviderKey,
        reason: &'static str,
    },

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error is an internal failure rather than a rejected login.
    ///
    /// Internal failures may be retried by the client; rejections must not be.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::SessionPersistence(_) | Self::CredentialLookup(_) | Self::Config(_)
        )
    }
}
