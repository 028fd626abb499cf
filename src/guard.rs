use crate::types::IdentityClaim;

/// Decides whether a caller already holds a valid session.
///
/// Stateless; the claim is resolved by the caller and passed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionGuard;

impl SessionGuard {
    /// True iff the claim names a non-empty user identifier.
    #[must_use]
    pub fn is_authenticated(claim: &IdentityClaim) -> bool {
        match claim {
            IdentityClaim::User(id) => !id.as_str().trim().is_empty(),
            IdentityClaim::Anonymous => false,
        }
    }
}
