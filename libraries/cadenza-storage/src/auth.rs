//! Password digests.
//!
//! Passwords are stored as an unsalted SHA-256 hex digest. Existing
//! account rows hold this exact format, so any change to a salted scheme
//! has to go through these two functions (see DESIGN.md for the recorded
//! security gap).

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of `input`.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Check a password attempt against a stored digest.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    sha256_hex(password) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_lowercase_hex() {
        let hash = sha256_hex("abc123");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        // Deterministic: same input, same digest
        assert_eq!(hash, sha256_hex("abc123"));
    }

    #[test]
    fn verification_round_trip() {
        let hash = sha256_hex("abc123");
        assert!(verify_password("abc123", &hash));
        assert!(!verify_password("abc124", &hash));
    }
}
