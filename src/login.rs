//! The login entry point.

use std::sync::Arc;

use serde::Serialize;

use crate::credentials::CredentialStore;
use crate::error::Error;
use crate::federated::{self, FederatedRedirect};
use crate::guard::SessionGuard;
use crate::provider::ProviderRegistry;
use crate::session::{SessionEstablisher, SessionStore};
use crate::types::{Channel, IdentityClaim, LoginAttempt, SessionToken, UserId, UserIdentity, Username};

/// Client-held session state: identity hint plus session token.
///
/// The two halves are always set together or cleared together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBinding {
    Set {
        username: Username,
        token: SessionToken,
    },
    Cleared,
}

impl SessionBinding {
    /// Clear both halves. Valid regardless of what the client currently holds.
    #[must_use]
    pub fn clear() -> Self {
        Self::Cleared
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set { .. })
    }
}

/// Data for rendering the login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct LoginForm {
    /// Username to pre-fill. The password is never echoed back.
    pub username: String,
    /// User-visible error, set after a rejected submission.
    pub error: Option<String>,
    /// Enabled federated-login options, in display order.
    pub providers: Vec<FederatedRedirect>,
}

/// Result of one pass through the login entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Caller already holds a session; send them away without re-prompting.
    AlreadyAuthenticated { redirect_to: String },
    /// Credentials verified and a fresh session established.
    Authenticated {
        user_id: UserId,
        binding: SessionBinding,
        redirect_to: String,
    },
    /// Bad username/password. `binding` is always [`SessionBinding::Cleared`].
    Rejected {
        form: LoginForm,
        binding: SessionBinding,
    },
    /// Initial view without a submission.
    ShowForm { form: LoginForm },
}

impl LoginOutcome {
    /// Binding instructions for the client, if any.
    #[must_use]
    pub fn binding(&self) -> Option<&SessionBinding> {
        match self {
            Self::Authenticated { binding, .. } | Self::Rejected { binding, .. } => Some(binding),
            Self::AlreadyAuthenticated { .. } | Self::ShowForm { .. } => None,
        }
    }

    #[must_use]
    pub fn redirect_to(&self) -> Option<&str> {
        match self {
            Self::AlreadyAuthenticated { redirect_to } | Self::Authenticated { redirect_to, .. } => {
                Some(redirect_to)
            }
            Self::Rejected { .. } | Self::ShowForm { .. } => None,
        }
    }

    #[must_use]
    pub fn form(&self) -> Option<&LoginForm> {
        match self {
            Self::Rejected { form, .. } | Self::ShowForm { form } => Some(form),
            Self::AlreadyAuthenticated { .. } | Self::Authenticated { .. } => None,
        }
    }
}

/// Settings for [`LoginOrchestrator`].
#[derive(Debug, Clone)]
pub struct LoginSettings {
    pub(crate) app_root: String,
    pub(crate) channel: Channel,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            app_root: "/".into(),
            channel: Channel::Web,
        }
    }
}

impl LoginSettings {
    /// Where successful and already-authenticated callers are sent.
    #[must_use]
    pub fn with_app_root(mut self, path: impl Into<String>) -> Self {
        self.app_root = path.into();
        self
    }

    /// Channel recorded on sessions established through this orchestrator.
    #[must_use]
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    #[must_use]
    pub fn app_root(&self) -> &str {
        &self.app_root
    }
}

/// Composes guard, credential store, session establisher and provider
/// registry into the single login entry point.
pub struct LoginOrchestrator<C, S> {
    credentials: Arc<C>,
    sessions: SessionEstablisher<S>,
    providers: ProviderRegistry,
    settings: LoginSettings,
}

// Manual Clone: avoid derive adding `C: Clone, S: Clone` bounds.
impl<C, S> Clone for LoginOrchestrator<C, S> {
    fn clone(&self) -> Self {
        Self {
            credentials: self.credentials.clone(),
            sessions: self.sessions.clone(),
            providers: self.providers.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl<C: CredentialStore, S: SessionStore> LoginOrchestrator<C, S> {
    #[must_use]
    pub fn new(
        credentials: Arc<C>,
        sessions: SessionEstablisher<S>,
        providers: ProviderRegistry,
    ) -> Self {
        Self {
            credentials,
            sessions,
            providers,
            settings: LoginSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: LoginSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &LoginSettings {
        &self.settings
    }

    #[must_use]
    pub fn session_store(&self) -> &Arc<S> {
        self.sessions.store()
    }

    /// Run one login request.
    ///
    /// Rejected credentials are an `Ok` outcome; `Err` is reserved for
    /// internal failures the client may retry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionPersistence`] if verified credentials could not
    /// be turned into a recorded session, or [`Error::CredentialLookup`] if the
    /// credential store failed.
    pub async fn process(
        &self,
        claim: &IdentityClaim,
        attempt: LoginAttempt,
    ) -> Result<LoginOutcome, Error> {
        if SessionGuard::is_authenticated(claim) {
            return Ok(LoginOutcome::AlreadyAuthenticated {
                redirect_to: self.settings.app_root.clone(),
            });
        }

        if !attempt.is_submission {
            let username = attempt.username_hint.unwrap_or_default();
            return Ok(LoginOutcome::ShowForm {
                form: self.form(username, None),
            });
        }

        match self.verify(&attempt).await {
            Ok(identity) => {
                let token = self.sessions.establish(&identity, self.settings.channel).await?;
                tracing::info!(user_id = %identity.id, "Password login successful");
                Ok(LoginOutcome::Authenticated {
                    user_id: identity.id,
                    binding: SessionBinding::Set {
                        username: identity.username,
                        token,
                    },
                    redirect_to: self.settings.app_root.clone(),
                })
            }
            Err(Error::InvalidCredentials) => {
                tracing::warn!(username = %attempt.username, "Rejected login attempt");
                Ok(LoginOutcome::Rejected {
                    form: self.form(
                        attempt.username,
                        Some(Error::InvalidCredentials.to_string()),
                    ),
                    binding: SessionBinding::clear(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve and check a submitted credential pair.
    ///
    /// Unknown user, empty username and wrong password all yield
    /// [`Error::InvalidCredentials`].
    async fn verify(&self, attempt: &LoginAttempt) -> Result<UserIdentity, Error> {
        if attempt.username.is_empty() {
            return Err(Error::InvalidCredentials);
        }

        let identity = self
            .credentials
            .find_by_username(&attempt.username)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Credential lookup failed");
                Error::CredentialLookup(e.to_string())
            })?
            .ok_or(Error::InvalidCredentials)?;

        if self
            .credentials
            .verify_password(&identity, attempt.password.expose())
        {
            Ok(identity)
        } else {
            Err(Error::InvalidCredentials)
        }
    }

    fn form(&self, username: String, error: Option<String>) -> LoginForm {
        LoginForm {
            username,
            error,
            providers: federated::enabled_redirects(&self.providers),
        }
    }
}
