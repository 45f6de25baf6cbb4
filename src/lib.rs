//! medcrypt - passphrase encryption and integrity hashing for text and small files
//!
//! The library is a set of stateless functions: encrypt and decrypt a string
//! under a passphrase, hash a string with SHA-512, and move files in and out
//! of `data:<mime>;base64,<payload>` strings so they can pass through the
//! cipher as text.
//!
//! # Architecture
//!
//! - `crypto`: Argon2id key derivation, AES-256-GCM encryption, SHA-512 digests
//! - `codec`: data-URL encoding/decoding, MIME and extension lookups, async file reads
//! - `error`: Custom error types
//! - `config`: Path resolution and user settings
//! - `audit`: Append-only record of operations run from the CLI
//! - `cli`: Command handlers for the `medcrypt` binary
//!
//! # Example
//!
//! ```rust
//! use medcrypt::codec::{data_url_to_file, encode_data_url, infer_extension};
//! use medcrypt::crypto::hash;
//!
//! let url = encode_data_url(b"a,b\n1,2\n", "text/csv");
//! let file = data_url_to_file(&url, "labs.csv")?;
//! assert_eq!(file.bytes, b"a,b\n1,2\n");
//! assert_eq!(infer_extension(&file.mime), "csv");
//! assert_eq!(hash(&url).len(), 128);
//! # Ok::<(), medcrypt::MedcryptError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;

pub use codec::{data_url_to_file, encode_data_url, file_to_data_url, infer_extension};
pub use crypto::{decrypt, encrypt, hash, CryptoCodec, KdfParams};
pub use error::{MedcryptError, MedcryptResult};
