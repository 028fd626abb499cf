use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors surfaced by the login router.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Bad username/password.
    #[error("Bad username/password.")]
    InvalidCredentials,

    /// Session store operation failed.
    #[error("Session store error: {0}")]
    Store(String),

    /// Credential store lookup failed.
    #[error("Credential store error: {0}")]
    Credentials(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()).into_response(),
            Self::Store(_) | Self::Credentials(_) | Self::Config(_) => {
                tracing::error!(error = %self, "Login internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<crate::error::Error> for LoginError {
    fn from(e: crate::error::Error) -> Self {
        use crate::error::Error;

        match e {
            Error::InvalidCredentials => Self::InvalidCredentials,
            Error::SessionPersistence(msg) => Self::Store(msg),
            Error::CredentialLookup(msg) => Self::Credentials(msg),
            e @ (Error::ProviderMisconfigured { .. } | Error::Config(_)) => {
                Self::Config(e.to_string())
            }
        }
    }
}
