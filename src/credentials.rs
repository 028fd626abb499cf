use std::future::Future;

use crate::error::BoxError;
use crate::types::UserIdentity;

/// Consumer-provided user lookup and password verification.
///
/// # Example
///
/// ```rust,ignore
/// impl CredentialStore for MyAppState {
///     async fn find_by_username(&self, username: &str) -> Result<Option<UserIdentity>, BoxError> {
///         let row = self.repo.find_user_by_username(username).await?;
///         Ok(row.map(|u| UserIdentity::new(u.phid, u.username, u.password_hash)))
///     }
///
///     fn verify_password(&self, identity: &UserIdentity, plaintext: &str) -> bool {
///         self.hasher.verify(&identity.credential_hash, plaintext)
///     }
/// }
/// ```
pub trait CredentialStore: Send + Sync + 'static {
    /// Resolve a username to at most one user record.
    ///
    /// Matching is exact. Returning `Ok(None)` means "no such user"; `Err` is
    /// reserved for store failures and is surfaced as an internal error.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<UserIdentity>, BoxError>> + Send;

    /// Check a plaintext password against the stored credential.
    ///
    /// Implementations must run in constant time with respect to the password;
    /// [`constant_time_eq`](crate::crypto::constant_time_eq) is available for the final comparison.
    fn verify_password(&self, identity: &UserIdentity, plaintext: &str) -> bool;
}
