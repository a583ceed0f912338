//! # Refresh Token Store
//!
//! Opaque refresh tokens tracked in a server-side set of currently-valid
//! tokens. Only SHA-256 hashes are stored; the raw token is handed to the
//! client once and never kept.
//!
//! The set is possession-based: membership alone makes a token redeemable,
//! it is not bound to the client it was issued for.

use std::collections::HashSet;
use std::sync::RwLock;

use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a cryptographically random opaque token
/// (256 bits, base64-url encoded).
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash a token for storage; the raw value never lands in the set.
fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest)
}

/// Concurrency-safe set of currently-valid refresh tokens.
///
/// Insert and remove race across request handlers; the `RwLock` keeps a
/// revoked token from surviving a concurrent lookup.
#[derive(Debug, Default)]
pub struct RefreshTokenStore {
    tokens: RwLock<HashSet<String>>,
}

impl RefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new token, register it as valid, and return the raw value.
    pub fn issue(&self) -> String {
        let token = generate_refresh_token();
        self.tokens.write().unwrap().insert(hash_token(&token));
        token
    }

    /// Whether the token is currently valid.
    pub fn is_valid(&self, token: &str) -> bool {
        self.tokens.read().unwrap().contains(&hash_token(token))
    }

    /// Remove a token from the valid set.
    ///
    /// Returns true if it was present; removing an already-absent token is
    /// an idempotent no-op returning false.
    pub fn revoke(&self, token: &str) -> bool {
        self.tokens.write().unwrap().remove(&hash_token(token))
    }

    /// Number of currently-valid tokens.
    pub fn len(&self) -> usize {
        self.tokens.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
