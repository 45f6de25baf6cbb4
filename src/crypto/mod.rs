//! Cryptographic functions for medcrypt
//!
//! Provides AES-256-GCM encryption with Argon2id key derivation and
//! SHA-512 digests. Everything here is synchronous and stateless.
//!
//! # Example
//!
//! ```rust
//! use medcrypt::crypto::{CryptoCodec, KdfParams};
//!
//! let codec = CryptoCodec::new(KdfParams::with_values(64, 1, 1));
//! let out = codec.encrypt("Patient: Jane Doe, DOB 1980-01-01", "correct-key")?;
//! assert_eq!(out.digest.len(), 128);
//! assert_eq!(
//!     codec.decrypt(&out.ciphertext, "correct-key")?,
//!     "Patient: Jane Doe, DOB 1980-01-01"
//! );
//! assert!(codec.decrypt(&out.ciphertext, "wrong-key").is_err());
//! # Ok::<(), medcrypt::MedcryptError>(())
//! ```

pub mod digest;
pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use digest::{hash, hash_bytes, matches_digest, DIGEST_HEX_LEN};
pub use encryption::{decrypt_bytes, decrypt_string, encrypt_bytes, encrypt_string, EncryptedPayload};
pub use key_derivation::{derive_key, DerivedKey, KdfParams};
pub use secure_memory::Passphrase;

use crate::error::MedcryptResult;

/// Ciphertext together with the digest of the plaintext it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionOutput {
    /// Printable ciphertext
    pub ciphertext: String,
    /// SHA-512 hex digest of the plaintext
    pub digest: String,
}

/// Passphrase-based codec with a fixed set of key derivation parameters
///
/// The parameters only affect encryption; decryption reads them from the
/// ciphertext.
#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoCodec {
    params: KdfParams,
}

impl CryptoCodec {
    /// Create a codec that encrypts with the given parameters
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }

    /// Encrypt a plaintext and compute its digest
    pub fn encrypt(&self, plaintext: &str, passphrase: &str) -> MedcryptResult<EncryptionOutput> {
        Ok(EncryptionOutput {
            ciphertext: encrypt_string(plaintext, passphrase, &self.params)?,
            digest: hash(plaintext),
        })
    }

    /// Decrypt a ciphertext produced by [`CryptoCodec::encrypt`] or [`encrypt`]
    pub fn decrypt(&self, ciphertext: &str, passphrase: &str) -> MedcryptResult<String> {
        decrypt_string(ciphertext, passphrase)
    }
}

/// Encrypt a plaintext with default key derivation parameters
pub fn encrypt(plaintext: &str, passphrase: &str) -> MedcryptResult<String> {
    encrypt_string(plaintext, passphrase, &KdfParams::default())
}

/// Decrypt a ciphertext
pub fn decrypt(ciphertext: &str, passphrase: &str) -> MedcryptResult<String> {
    decrypt_string(ciphertext, passphrase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_derivation::fast_params;

    #[test]
    fn test_codec_round_trip_and_digest() {
        let codec = CryptoCodec::new(fast_params());
        let text = "Patient: Jane Doe, DOB 1980-01-01";

        let out = codec.encrypt(text, "correct-key").unwrap();
        assert_eq!(out.digest, hash(text));
        assert_eq!(codec.decrypt(&out.ciphertext, "correct-key").unwrap(), text);
    }

    #[test]
    fn test_digest_independent_of_key() {
        let codec = CryptoCodec::new(fast_params());
        let a = codec.encrypt("same text", "key-one").unwrap();
        let b = codec.encrypt("same text", "key-two").unwrap();

        assert_eq!(a.digest, b.digest);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_wrong_key_never_returns_plaintext() {
        let codec = CryptoCodec::new(fast_params());
        for (i, text) in ["a", "hello", "Patient: Jane Doe", "0123456789"].iter().enumerate() {
            let out = codec.encrypt(text, &format!("key-{}", i)).unwrap();
            let result = codec.decrypt(&out.ciphertext, "other-key");
            assert!(result.unwrap_err().is_decryption_error());
        }
    }

    #[test]
    fn test_default_params_round_trip() {
        let ciphertext = encrypt("hello", "key").unwrap();
        assert_eq!(decrypt(&ciphertext, "key").unwrap(), "hello");
    }

    #[test]
    fn test_unicode_round_trip() {
        let codec = CryptoCodec::new(fast_params());
        let text = "Größe: 180cm, 患者 🩺";
        let out = codec.encrypt(text, "κλειδί").unwrap();
        assert_eq!(codec.decrypt(&out.ciphertext, "κλειδί").unwrap(), text);
    }
}
