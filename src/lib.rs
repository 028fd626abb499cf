#![doc = include_str!("../README.md")]

pub mod credentials;
pub mod crypto;
pub mod error;
pub mod federated;
pub mod guard;
pub mod login;
#[cfg(feature = "middleware")]
pub mod middleware;
pub mod provider;
pub mod session;
pub mod types;

// Re-exports for convenient access
pub use credentials::CredentialStore;
pub use error::{BoxError, Error};
pub use federated::{FederatedRedirect, FormMethod};
pub use guard::SessionGuard;
pub use login::{LoginForm, LoginOrchestrator, LoginOutcome, LoginSettings, SessionBinding};
pub use provider::{OAuthProviderConfig, ProviderKey, ProviderRegistry};
pub use session::{SessionEstablisher, SessionStore};
pub use types::{
    Channel, IdentityClaim, LoginAttempt, NewSession, Password, SessionToken, UserId,
    UserIdentity, Username,
};
