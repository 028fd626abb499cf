use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;

use crate::crypto;
use crate::error::{BoxError, Error};
use crate::types::{Channel, NewSession, SessionToken, UserId, UserIdentity};

/// Consumer-provided session persistence.
///
/// Tokens are minted by [`SessionEstablisher`]; the store only records them.
///
/// # Example
///
/// ```rust,ignore
/// impl SessionStore for MyAppState {
///     async fn create(&self, session: NewSession) -> Result<(), BoxError> {
///         let hash = login_gate::crypto::hash_token(&session.token);
///         self.db.insert_session(&hash, &session.owner, session.created_at).await?;
///         Ok(())
///     }
///
///     async fn find(&self, token: &SessionToken) -> Result<Option<UserId>, BoxError> {
///         let hash = login_gate::crypto::hash_token(token);
///         self.db.find_session_owner(&hash).await
///     }
/// }
/// ```
pub trait SessionStore: Send + Sync + 'static {
    /// Record a new session. Each call carries a distinct token.
    fn create(&self, session: NewSession) -> impl Future<Output = Result<(), BoxError>> + Send;

    /// Look up the owner of a live session.
    fn find(
        &self,
        token: &SessionToken,
    ) -> impl Future<Output = Result<Option<UserId>, BoxError>> + Send;
}

/// Default bound on a single session write.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Mints and records a fresh session for a verified identity.
pub struct SessionEstablisher<S> {
    store: Arc<S>,
    write_timeout: Duration,
}

// Manual Clone: avoid derive adding an `S: Clone` bound.
impl<S> Clone for SessionEstablisher<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            write_timeout: self.write_timeout,
        }
    }
}

impl<S: SessionStore> SessionEstablisher<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Create a new session owned by `identity` and return its token.
    ///
    /// Never reuses an earlier token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionPersistence`] if the store fails or the write
    /// does not finish within the configured timeout.
    pub async fn establish(
        &self,
        identity: &UserIdentity,
        channel: Channel,
    ) -> Result<SessionToken, Error> {
        let token = crypto::generate_session_token();
        let session = NewSession {
            token: token.clone(),
            owner: identity.id.clone(),
            created_at: OffsetDateTime::now_utc(),
            channel,
        };

        match tokio::time::timeout(self.write_timeout, self.store.create(session)).await {
            Ok(Ok(())) => Ok(token),
            Ok(Err(e)) => {
                tracing::error!(user_id = %identity.id, error = %e, "Session creation failed");
                Err(Error::SessionPersistence(e.to_string()))
            }
            Err(_) => {
                tracing::error!(
                    user_id = %identity.id,
                    timeout_ms = self.write_timeout.as_millis() as u64,
                    "Session creation timed out"
                );
                Err(Error::SessionPersistence("session write timed out".into()))
            }
        }
    }
}
