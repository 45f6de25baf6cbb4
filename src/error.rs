//! Custom error types for medcrypt
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for medcrypt operations
#[derive(Error, Debug)]
pub enum MedcryptError {
    /// A ciphertext could not be opened (wrong passphrase, tampering, bad encoding)
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// Encryption could not be set up (invalid key derivation parameters)
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// A data-URL did not have the `data:<mime>;base64,<payload>` shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Caller-side input validation failed (e.g. empty passphrase)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Input file exceeds the configured size limit
    #[error("File is too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },
}

impl MedcryptError {
    /// Build the error returned for every failed decryption
    pub(crate) fn decryption(reason: impl Into<String>) -> Self {
        Self::Decryption(reason.into())
    }

    /// Build a data-URL parse error
    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        Self::Parse(reason.into())
    }

    /// Check if this is a decryption error
    pub fn is_decryption_error(&self) -> bool {
        matches!(self, Self::Decryption(_))
    }

    /// Check if this is a data-URL parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

impl From<std::io::Error> for MedcryptError {
    fn from(err: std::io::Error) -> Self {
        MedcryptError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MedcryptError {
    fn from(err: serde_json::Error) -> Self {
        MedcryptError::Json(err.to_string())
    }
}

/// Result type alias for medcrypt operations
pub type MedcryptResult<T> = Result<T, MedcryptError>;
