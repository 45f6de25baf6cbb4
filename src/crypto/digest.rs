//! SHA-512 integrity digests
//!
//! The digest is computed over the plaintext only and never depends on the
//! passphrase. It is meant for display and manual comparison.

use sha2::{Digest, Sha512};

/// Length of a hex-encoded SHA-512 digest
pub const DIGEST_HEX_LEN: usize = 128;

/// Compute the SHA-512 digest of a string as lowercase hex
pub fn hash(plaintext: &str) -> String {
    hash_bytes(plaintext.as_bytes())
}

/// Compute the SHA-512 digest of raw bytes as lowercase hex
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha512::digest(data))
}

/// Compare a plaintext against a previously recorded digest
///
/// Case-insensitive on the expected value, since digests are often pasted
/// from other tools.
pub fn matches_digest(plaintext: &str, expected: &str) -> bool {
    hash(plaintext).eq_ignore_ascii_case(expected.trim())
}
