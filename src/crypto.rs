use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::types::SessionToken;

/// Number of random bytes behind every session token (256 bits).
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Generates a fresh, cryptographically random session token.
///
/// Returns a 43-character URL-safe string (32 random bytes → base64url).
#[must_use]
pub fn generate_session_token() -> SessionToken {
    let random_bytes: [u8; SESSION_TOKEN_BYTES] = rand::rng().random();
    SessionToken(URL_SAFE_NO_PAD.encode(random_bytes))
}

/// One-way hash of a session token for storage.
///
/// `hash = BASE64URL(SHA256(token))`. Stores that keep only the hash never
/// hold a usable credential at rest.
#[must_use]
pub fn hash_token(token: &SessionToken) -> String {
    let hash = Sha256::digest(token.as_str().as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Constant-time byte comparison for credential checks.
///
/// Length is not treated as secret; contents are compared without early exit.
#[inline]
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
