//! Opaque refresh-token generation and hashing
//!
//! A refresh credential is 48 random bytes, base64url-encoded without
//! padding. Storage only ever sees the SHA-256 hex digest of the raw string;
//! the raw value lives in the client's cookie and nowhere else.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

const TOKEN_BYTES: usize = 48;

/// A freshly generated refresh credential: the raw value bound for the
/// client's cookie and the digest bound for storage.
#[derive(Clone)]
pub struct RefreshToken {
    pub raw: String,
    pub hash: String,
}

impl std::fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The raw value must never end up in logs
        f.debug_struct("RefreshToken")
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}

/// Generate a new refresh credential
#[must_use]
pub fn generate_refresh_token() -> RefreshToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let raw = URL_SAFE_NO_PAD.encode(bytes);
    let hash = hash_refresh_token(&raw);
    RefreshToken { raw, hash }
}

/// Digest a presented raw token for a storage lookup
#[must_use]
pub fn hash_refresh_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}
