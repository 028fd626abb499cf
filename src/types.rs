use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable, unique user identifier (PHID-equivalent).
///
/// Assigned by the consumer's account-creation logic and treated as opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Login name as typed by the user and stored by the consumer.
///
/// Lookups compare usernames exactly; no case folding or trimming happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct Username(pub String);

impl Username {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Opaque session credential handed to the client.
///
/// `Debug` is redacted so tokens never end up in logs by accident.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct SessionToken(pub String);

impl SessionToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// A user record as resolved by a [`CredentialStore`](crate::CredentialStore).
///
/// Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct UserIdentity {
    pub id: UserId,
    pub username: Username,
    /// Stored credential in whatever format the consumer's verifier understands.
    pub credential_hash: String,
}

impl UserIdentity {
    #[must_use]
    pub fn new(
        id: impl Into<UserId>,
        username: impl Into<Username>,
        credential_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            credential_hash: credential_hash.into(),
        }
    }
}

/// Where a session was established from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Web,
    Other,
}

/// A session record, ready for the consumer to persist.
///
/// Passed to [`SessionStore::create`](crate::SessionStore::create).
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct NewSession {
    pub token: SessionToken,
    pub owner: UserId,
    pub created_at: OffsetDateTime,
    pub channel: Channel,
}

/// The identity a caller currently presents.
///
/// Resolved by the request layer (e.g. from a session cookie) and passed in
/// explicitly; nothing in this crate reads an ambient "current user".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IdentityClaim {
    #[default]
    Anonymous,
    User(UserId),
}

impl From<Option<UserId>> for IdentityClaim {
    fn from(user: Option<UserId>) -> Self {
        user.map_or(Self::Anonymous, Self::User)
    }
}

/// Plaintext password wrapper with a redacted `Debug`.
#[derive(Clone, Default)]
pub struct Password(String);

impl Password {
    #[must_use]
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self(plaintext.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(..)")
    }
}

/// One inbound login request. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct LoginAttempt {
    pub username: String,
    pub password: Password,
    /// True iff the request is a form submission (POST).
    pub is_submission: bool,
    /// Username from the identity-hint cookie, used only to pre-fill the form.
    pub username_hint: Option<String>,
}

impl LoginAttempt {
    /// An initial page view without credentials.
    #[must_use]
    pub fn view() -> Self {
        Self::default()
    }

    /// A submitted credential pair.
    #[must_use]
    pub fn submission(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Password::new(password),
            is_submission: true,
            username_hint: None,
        }
    }

    #[must_use]
    pub fn with_username_hint(mut self, hint: Option<String>) -> Self {
        self.username_hint = hint;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_from_string() {
        let id = UserId::from("PHID-USER-1".to_string());
        assert_eq!(id.to_string(), "PHID-USER-1");
    }

    #[test]
    fn session_token_debug_is_redacted() {
        let token = SessionToken::from("secret-value".to_string());
        assert_eq!(format!("{token:?}"), "SessionToken(..)");
        assert_eq!(token.to_string(), "secret-value");
    }

    #[test]
    fn password_debug_is_redacted() {
        let attempt = LoginAttempt::submission("alice", "hunter2");
        let rendered = format!("{attempt:?}");
        assert!(!rendered.contains("hunter2"));
        assert_eq!(attempt.password.expose(), "hunter2");
    }

    #[test]
    fn claim_from_option() {
        assert_eq!(IdentityClaim::from(None), IdentityClaim::Anonymous);
        let id = UserId::from("u1".to_string());
        assert_eq!(IdentityClaim::from(Some(id.clone())), IdentityClaim::User(id));
    }

    #[test]
    fn channel_serializes_lowercase() {
        let json = serde_json::to_string(&Channel::Web).unwrap();
        assert_eq!(json, "\"web\"");
    }
}
