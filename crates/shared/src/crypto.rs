//! Cryptographic helpers for door access tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes behind every access token.
pub const ACCESS_TOKEN_BYTES: usize = 32;

/// Generates a fresh opaque access token.
///
/// The token is URL-safe base64 without padding so it can be embedded in a QR
/// code or a URL path segment as-is.
pub fn generate_access_token() -> String {
    let mut bytes = [0u8; ACCESS_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Short, log-safe fingerprint of a token (first 12 hex chars of its SHA-256).
pub fn token_fingerprint(token: &str) -> String {
    sha256_hex(token)[..12].to_string()
}
