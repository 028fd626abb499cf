//! In-memory stores for testing

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use login_gate::crypto::{constant_time_eq, hash_token};
use login_gate::{BoxError, CredentialStore, NewSession, SessionStore, SessionToken, UserId, UserIdentity};
use sha2::{Digest, Sha256};

/// Test-only password digest. Not a password hashing scheme.
pub fn digest_password(plaintext: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(plaintext.as_bytes()))
}

/// In-memory user store
#[derive(Default, Clone)]
pub struct MockCredentialStore {
    users: Arc<HashMap<String, UserIdentity>>,
    lookups: Arc<AtomicUsize>,
}

impl MockCredentialStore {
    pub fn with_users(users: &[(&str, &str)]) -> Self {
        let users = users
            .iter()
            .map(|(name, password)| {
                (
                    (*name).to_owned(),
                    UserIdentity::new(
                        format!("PHID-USER-{name}"),
                        *name,
                        digest_password(password),
                    ),
                )
            })
            .collect();
        Self {
            users: Arc::new(users),
            lookups: Arc::default(),
        }
    }

    pub fn alice() -> Self {
        Self::with_users(&[("alice", "hunter2")])
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl CredentialStore for MockCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserIdentity>, BoxError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.get(username).cloned())
    }

    fn verify_password(&self, identity: &UserIdentity, plaintext: &str) -> bool {
        let candidate = digest_password(plaintext);
        constant_time_eq(candidate.as_bytes(), identity.credential_hash.as_bytes())
    }
}

/// In-memory session store keyed by token hash
#[derive(Default, Clone)]
pub struct MockSessionStore {
    sessions: Arc<Mutex<HashMap<String, NewSession>>>,
    fail_writes: bool,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn owner_of(&self, token: &SessionToken) -> Option<UserId> {
        self.sessions
            .lock()
            .unwrap()
            .get(&hash_token(token))
            .map(|s| s.owner.clone())
    }
}

impl SessionStore for MockSessionStore {
    async fn create(&self, session: NewSession) -> Result<(), BoxError> {
        if self.fail_writes {
            return Err("session table unavailable".into());
        }
        let key = hash_token(&session.token);
        let previous = self.sessions.lock().unwrap().insert(key, session);
        assert!(previous.is_none(), "token issued twice");
        Ok(())
    }

    async fn find(&self, token: &SessionToken) -> Result<Option<UserId>, BoxError> {
        Ok(self.owner_of(token))
    }
}
