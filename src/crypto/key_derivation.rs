//! Key derivation using Argon2id
//!
//! Turns a passphrase plus a random salt into a 256-bit AES key. The
//! parameters travel inside every ciphertext, so a ciphertext can always be
//! reopened with nothing but the passphrase.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{MedcryptError, MedcryptResult};

/// Length of the random salt in bytes
pub const SALT_SIZE: usize = 16;

/// Length of the derived key in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// Upper bound on memory cost accepted from a ciphertext header (1 GiB)
pub const MAX_MEMORY_COST: u32 = 1_048_576;

/// Upper bound on time cost accepted from a ciphertext header
pub const MAX_TIME_COST: u32 = 16;

/// Upper bound on parallelism accepted from a ciphertext header
pub const MAX_PARALLELISM: u32 = 16;

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 19456 = 19 MiB)
    pub memory_cost: u32,
    /// Time cost (iterations, default: 2)
    pub time_cost: u32,
    /// Parallelism degree (default: 1)
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 19_456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Create params with specific values
    pub fn with_values(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    /// Whether these params stay within the ceilings accepted on decryption
    pub fn within_limits(&self) -> bool {
        self.memory_cost <= MAX_MEMORY_COST
            && self.time_cost <= MAX_TIME_COST
            && self.parallelism <= MAX_PARALLELISM
    }

    /// Convert to argon2 params, rejecting values argon2 does not accept
    fn to_argon2(self) -> Result<Params, argon2::Error> {
        Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(KEY_SIZE),
        )
    }

    /// Check that these params can be used for encryption
    pub fn validate(&self) -> MedcryptResult<()> {
        if !self.within_limits() {
            return Err(MedcryptError::Encryption(format!(
                "Key derivation parameters exceed limits (memory <= {} KiB, time <= {}, parallelism <= {})",
                MAX_MEMORY_COST, MAX_TIME_COST, MAX_PARALLELISM
            )));
        }
        self.to_argon2()
            .map(|_| ())
            .map_err(|e| MedcryptError::Encryption(format!("Invalid Argon2 parameters: {}", e)))
    }
}

/// Generate a fresh random salt
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// A derived encryption key, wiped from memory on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

/// Derive an encryption key from a passphrase
///
/// Any passphrase is accepted, including the empty string.
pub fn derive_key(
    passphrase: &str,
    salt: &[u8; SALT_SIZE],
    params: &KdfParams,
) -> Result<DerivedKey, argon2::Error> {
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.to_argon2()?);

    let mut key = [0u8; KEY_SIZE];
    argon2.hash_password_into(passphrase.as_bytes(), salt, &mut key)?;

    let derived = DerivedKey { key };
    key.zeroize();
    Ok(derived)
}

#[cfg(test)]
pub(crate) fn fast_params() -> KdfParams {
    KdfParams::with_values(64, 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key() {
        let salt = generate_salt();
        let key = derive_key("test_passphrase", &salt, &fast_params()).unwrap();
        assert_eq!(key.as_bytes().len(), KEY_SIZE);
    }

    #[test]
    fn test_same_passphrase_same_key() {
        let salt = generate_salt();
        let key1 = derive_key("test_passphrase", &salt, &fast_params()).unwrap();
        let key2 = derive_key("test_passphrase", &salt, &fast_params()).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let salt = generate_salt();
        let key1 = derive_key("passphrase1", &salt, &fast_params()).unwrap();
        let key2 = derive_key("passphrase2", &salt, &fast_params()).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("same_passphrase", &generate_salt(), &fast_params()).unwrap();
        let key2 = derive_key("same_passphrase", &generate_salt(), &fast_params()).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_passphrase_is_valid() {
        let salt = generate_salt();
        assert!(derive_key("", &salt, &fast_params()).is_ok());
    }

    #[test]
    fn test_default_params_validate() {
        assert!(KdfParams::default().validate().is_ok());
    }

    #[test]
    fn test_zero_time_cost_rejected() {
        let params = KdfParams::with_values(64, 0, 1);
        assert!(matches!(
            params.validate(),
            Err(MedcryptError::Encryption(_))
        ));
    }

    #[test]
    fn test_params_over_limit_rejected() {
        let params = KdfParams::with_values(MAX_MEMORY_COST + 1, 1, 1);
        assert!(!params.within_limits());
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_params_serde() {
        let json = r#"{"memory_cost":1024,"time_cost":3,"parallelism":2}"#;
        let params: KdfParams = serde_json::from_str(json).unwrap();
        assert_eq!(params, KdfParams::with_values(1024, 3, 2));
    }
}
