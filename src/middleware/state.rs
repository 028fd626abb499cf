use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use super::config::AuthSettings;
use crate::credentials::CredentialStore;
use crate::login::LoginOrchestrator;
use crate::session::SessionStore;

/// Shared state for login route handlers.
pub(super) struct AuthState<C, S> {
    pub(super) orchestrator: Arc<LoginOrchestrator<C, S>>,
    pub(super) settings: AuthSettings,
}

// Manual Clone: avoid derive adding `C: Clone, S: Clone` bounds.
impl<C, S> Clone for AuthState<C, S> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: self.orchestrator.clone(),
            settings: self.settings.clone(),
        }
    }
}

// PrivateCookieJar requires Key to be extractable from state
impl<C: CredentialStore, S: SessionStore> FromRef<AuthState<C, S>> for Key {
    fn from_ref(state: &AuthState<C, S>) -> Self {
        state.settings.cookie_key.clone()
    }
}
