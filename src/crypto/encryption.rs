//! AES-256-GCM encryption/decryption
//!
//! Every ciphertext is a single base64 string wrapping a small binary
//! envelope:
//!
//! ```text
//! magic "MCE" | version | memory_cost | time_cost | parallelism | salt | nonce | ciphertext+tag
//!   3 bytes     1 byte    u32 BE        u32 BE      u32 BE        16     12      n + 16
//! ```
//!
//! The first 32 bytes (everything up to the nonce) are authenticated as
//! associated data, so a wrong passphrase or any modified byte fails the
//! GCM tag check instead of producing garbage.

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng, Payload},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{MedcryptError, MedcryptResult};

use super::key_derivation::{derive_key, generate_salt, DerivedKey, KdfParams, SALT_SIZE};

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
const TAG_SIZE: usize = 16;

const MAGIC: &[u8; 3] = b"MCE";

const VERSION: u8 = 1;

/// Bytes covered as associated data: magic, version, params, salt
const HEADER_SIZE: usize = 4 + 12 + SALT_SIZE;

/// Decoded form of a ciphertext string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// Key derivation parameters used at encryption time
    pub params: KdfParams,
    /// Salt fed to the key derivation
    pub salt: [u8; SALT_SIZE],
    /// Nonce used for this encryption
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext with the authentication tag appended
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    fn header(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0u8; HEADER_SIZE];
        header[..3].copy_from_slice(MAGIC);
        header[3] = VERSION;
        header[4..8].copy_from_slice(&self.params.memory_cost.to_be_bytes());
        header[8..12].copy_from_slice(&self.params.time_cost.to_be_bytes());
        header[12..16].copy_from_slice(&self.params.parallelism.to_be_bytes());
        header[16..].copy_from_slice(&self.salt);
        header
    }

    /// Serialize into the printable ciphertext string
    pub fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(HEADER_SIZE + NONCE_SIZE + self.ciphertext.len());
        bytes.extend_from_slice(&self.header());
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        STANDARD.encode(bytes)
    }

    /// Parse a ciphertext string
    ///
    /// Only the structure is checked here; authenticity is established when
    /// the payload is opened.
    pub fn decode(encoded: &str) -> MedcryptResult<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| MedcryptError::decryption(format!("invalid ciphertext encoding: {}", e)))?;

        if bytes.len() < HEADER_SIZE + NONCE_SIZE + TAG_SIZE {
            return Err(MedcryptError::decryption("ciphertext is truncated"));
        }
        if &bytes[..3] != MAGIC {
            return Err(MedcryptError::decryption("not a medcrypt ciphertext"));
        }
        if bytes[3] != VERSION {
            return Err(MedcryptError::decryption(format!(
                "unsupported ciphertext version: {}",
                bytes[3]
            )));
        }

        let params = KdfParams::with_values(
            read_u32(&bytes[4..8]),
            read_u32(&bytes[8..12]),
            read_u32(&bytes[12..16]),
        );

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&bytes[16..HEADER_SIZE]);

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&bytes[HEADER_SIZE..HEADER_SIZE + NONCE_SIZE]);

        Ok(Self {
            params,
            salt,
            nonce,
            ciphertext: bytes[HEADER_SIZE + NONCE_SIZE..].to_vec(),
        })
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_be_bytes(buf)
}

/// Seal plaintext bytes under an already derived key
fn seal(
    plaintext: &[u8],
    key: &DerivedKey,
    params: KdfParams,
    salt: [u8; SALT_SIZE],
) -> MedcryptResult<EncryptedPayload> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| MedcryptError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let mut payload = EncryptedPayload {
        params,
        salt,
        nonce,
        ciphertext: Vec::new(),
    };
    let aad = payload.header();

    payload.ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce),
            Payload {
                msg: plaintext,
                aad: &aad,
            },
        )
        .map_err(|e| MedcryptError::Encryption(format!("Encryption failed: {}", e)))?;

    Ok(payload)
}

/// Encrypt plaintext bytes with a passphrase
///
/// A fresh salt and nonce are generated for every call.
pub fn encrypt_bytes(
    plaintext: &[u8],
    passphrase: &str,
    params: &KdfParams,
) -> MedcryptResult<EncryptedPayload> {
    params.validate()?;

    let salt = generate_salt();
    let key = derive_key(passphrase, &salt, params)
        .map_err(|e| MedcryptError::Encryption(format!("Key derivation failed: {}", e)))?;

    seal(plaintext, &key, *params, salt)
}

/// Decrypt a payload with a passphrase
pub fn decrypt_bytes(payload: &EncryptedPayload, passphrase: &str) -> MedcryptResult<Vec<u8>> {
    if !payload.params.within_limits() {
        return Err(MedcryptError::decryption(
            "key derivation parameters exceed limits",
        ));
    }

    let key = derive_key(passphrase, &payload.salt, &payload.params)
        .map_err(|e| MedcryptError::decryption(format!("invalid key derivation parameters: {}", e)))?;

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| MedcryptError::decryption(format!("failed to create cipher: {}", e)))?;

    let aad = payload.header();
    cipher
        .decrypt(
            Nonce::from_slice(&payload.nonce),
            Payload {
                msg: &payload.ciphertext,
                aad: &aad,
            },
        )
        .map_err(|_| MedcryptError::decryption("invalid key or corrupted data"))
}

/// Encrypt a string into a printable ciphertext
pub fn encrypt_string(
    plaintext: &str,
    passphrase: &str,
    params: &KdfParams,
) -> MedcryptResult<String> {
    Ok(encrypt_bytes(plaintext.as_bytes(), passphrase, params)?.encode())
}

/// Decrypt a printable ciphertext back into a string
pub fn decrypt_string(ciphertext: &str, passphrase: &str) -> MedcryptResult<String> {
    let payload = EncryptedPayload::decode(ciphertext)?;
    let plaintext = decrypt_bytes(&payload, passphrase)?;
    String::from_utf8(plaintext)
        .map_err(|e| MedcryptError::decryption(format!("invalid UTF-8 in decrypted data: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_derivation::fast_params;

    #[test]
    fn test_encrypt_decrypt() {
        let plaintext = b"Hello, World!";

        let encrypted = encrypt_bytes(plaintext, "test_passphrase", &fast_params()).unwrap();
        let decrypted = decrypt_bytes(&encrypted, "test_passphrase").unwrap();

        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_encrypt_decrypt_string() {
        let plaintext = "Patient: Jane Doe, DOB 1980-01-01";

        let encrypted = encrypt_string(plaintext, "correct-key", &fast_params()).unwrap();
        let decrypted = decrypt_string(&encrypted, "correct-key").unwrap();

        assert_eq!(plaintext, decrypted);
    }

    #[test]
    fn test_different_nonces() {
        let plaintext = b"Hello, World!";

        let encrypted1 = encrypt_bytes(plaintext, "key", &fast_params()).unwrap();
        let encrypted2 = encrypt_bytes(plaintext, "key", &fast_params()).unwrap();

        // Same plaintext should produce different ciphertext (fresh salt and nonce)
        assert_ne!(encrypted1.nonce, encrypted2.nonce);
        assert_ne!(encrypted1.salt, encrypted2.salt);
        assert_ne!(encrypted1.encode(), encrypted2.encode());
    }

    #[test]
    fn test_wrong_key_fails() {
        let encrypted =
            encrypt_string("Patient: Jane Doe", "correct-key", &fast_params()).unwrap();

        let err = decrypt_string(&encrypted, "wrong-key").unwrap_err();
        assert!(err.is_decryption_error());
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let encrypted = encrypt_string("Hello, World!", "key", &fast_params()).unwrap();
        let bytes = STANDARD.decode(&encrypted).unwrap();

        // Flip one bit in every position: header, salt, nonce, body and tag
        for i in 0..bytes.len() {
            let mut tampered = bytes.clone();
            tampered[i] ^= 0x01;
            let result = decrypt_string(&STANDARD.encode(&tampered), "key");
            assert!(result.is_err(), "tampering byte {} went undetected", i);
        }
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let encrypted = encrypt_string("Hello", "key", &fast_params()).unwrap();
        let bytes = STANDARD.decode(&encrypted).unwrap();
        let truncated = STANDARD.encode(&bytes[..bytes.len() - 1]);

        assert!(decrypt_string(&truncated, "key").unwrap_err().is_decryption_error());
        let short = STANDARD.encode(&bytes[..HEADER_SIZE]);
        assert!(decrypt_string(&short, "key").unwrap_err().is_decryption_error());
    }

    #[test]
    fn test_garbage_fails() {
        assert!(decrypt_string("garbage", "key").unwrap_err().is_decryption_error());
        assert!(decrypt_string("", "key").unwrap_err().is_decryption_error());
    }

    #[test]
    fn test_oversized_params_rejected_before_derivation() {
        let mut payload = encrypt_bytes(b"data", "key", &fast_params()).unwrap();
        payload.params.memory_cost = u32::MAX;

        let err = decrypt_bytes(&payload, "key").unwrap_err();
        assert!(err.is_decryption_error());
    }

    #[test]
    fn test_payload_encode_decode() {
        let payload = encrypt_bytes(b"data", "key", &fast_params()).unwrap();
        let decoded = EncryptedPayload::decode(&payload.encode()).unwrap();
        assert_eq!(payload, decoded);
        assert_eq!(decoded.params, fast_params());
    }

    #[test]
    fn test_invalid_params_rejected_on_encrypt() {
        let params = KdfParams::with_values(64, 0, 1);
        let err = encrypt_string("data", "key", &params).unwrap_err();
        assert!(matches!(err, MedcryptError::Encryption(_)));
    }

    #[test]
    fn test_empty_plaintext() {
        let encrypted = encrypt_string("", "key", &fast_params()).unwrap();
        assert_eq!(decrypt_string(&encrypted, "key").unwrap(), "");
    }

    #[test]
    fn test_empty_passphrase() {
        let encrypted = encrypt_string("secret", "", &fast_params()).unwrap();
        assert_eq!(decrypt_string(&encrypted, "").unwrap(), "secret");
        assert!(decrypt_string(&encrypted, " ").is_err());
    }

    #[test]
    fn test_non_utf8_plaintext_fails_as_string() {
        let payload = encrypt_bytes(&[0xff, 0xfe, 0xfd], "key", &fast_params()).unwrap();
        let err = decrypt_string(&payload.encode(), "key").unwrap_err();
        assert!(err.is_decryption_error());
    }

    #[test]
    fn test_large_plaintext() {
        let plaintext: Vec<u8> = (0..10000).map(|i| (i % 256) as u8).collect();

        let encrypted = encrypt_bytes(&plaintext, "key", &fast_params()).unwrap();
        let decrypted = decrypt_bytes(&encrypted, "key").unwrap();

        assert_eq!(plaintext, decrypted);
    }
}
