//! CLI command handlers
//!
//! This module bridges clap argument parsing with the library. It is the
//! caller-side layer: it validates inputs (non-empty passphrase, one input
//! source), reads files, prints results and records the audit trail.

pub mod audit;
pub mod decrypt;
pub mod encrypt;
pub mod hash;
pub mod logging;

use std::path::PathBuf;

use clap::Args;

use crate::audit::{AuditEntry, AuditLogger, Source};
use crate::codec::file_to_data_url;
use crate::config::{MedcryptPaths, Settings};
use crate::crypto::{CryptoCodec, Passphrase};
use crate::error::{MedcryptError, MedcryptResult};

pub use audit::{handle_audit_command, AuditArgs};
pub use decrypt::{handle_decrypt_command, DecryptArgs};
pub use encrypt::{handle_encrypt_command, EncryptArgs};
pub use hash::{handle_hash_command, HashArgs};

/// Everything a command handler needs besides its arguments
pub struct Context {
    pub paths: MedcryptPaths,
    pub settings: Settings,
    audit: Option<AuditLogger>,
}

impl Context {
    /// Resolve paths and load settings
    pub fn load() -> MedcryptResult<Self> {
        let paths = MedcryptPaths::new()?;
        let settings = Settings::load_or_create(&paths)?;
        Ok(Self::new(paths, settings))
    }

    /// Build a context from already loaded parts
    pub fn new(paths: MedcryptPaths, settings: Settings) -> Self {
        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));
        Self {
            paths,
            settings,
            audit,
        }
    }

    /// Codec configured with the user's key derivation parameters
    pub fn codec(&self) -> CryptoCodec {
        CryptoCodec::new(self.settings.kdf)
    }

    /// Record an audit entry
    ///
    /// A failing audit write is reported but never fails the operation.
    pub fn record(&self, entry: AuditEntry) {
        let Some(logger) = &self.audit else {
            return;
        };

        let result = self
            .paths
            .ensure_directories()
            .and_then(|_| logger.log(&entry));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write audit entry");
        }
    }

    /// Open the audit log for reading, if auditing is enabled
    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }
}

/// Plaintext input: inline text or a file
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Text to process
    #[arg(short, long)]
    pub text: Option<String>,

    /// File to process (images, CSV, ...)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Plaintext loaded from the command line
#[derive(Debug, Clone)]
pub struct LoadedInput {
    /// Text handed to the cipher (a data-URL for files)
    pub text: String,
    pub source: Source,
    /// MIME type and file name for file input
    pub file: Option<(String, String)>,
}

impl InputArgs {
    /// Read the plaintext, converting files to data-URLs
    pub async fn load(&self, settings: &Settings) -> MedcryptResult<LoadedInput> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(LoadedInput {
                text: text.clone(),
                source: Source::Text,
                file: None,
            }),
            (None, Some(path)) => {
                let data_url = file_to_data_url(path, settings.max_file_size).await?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                tracing::debug!(
                    path = %path.display(),
                    mime = %data_url.mime,
                    bytes = data_url.bytes.len(),
                    "read input file"
                );
                Ok(LoadedInput {
                    file: Some((data_url.mime.clone(), name)),
                    text: data_url.to_string(),
                    source: Source::File,
                })
            }
            (None, None) => Err(MedcryptError::Validation(
                "Provide either --text or --file".into(),
            )),
        }
    }
}

/// Where the passphrase comes from
#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// Read the passphrase from this environment variable instead of prompting
    #[arg(long, value_name = "VAR")]
    pub key_env: Option<String>,
}

impl KeyArgs {
    /// Obtain a non-empty passphrase
    ///
    /// When prompting and `confirm` is set, the passphrase is asked twice.
    pub fn read(&self, confirm: bool) -> MedcryptResult<Passphrase> {
        let passphrase = match &self.key_env {
            Some(var) => std::env::var(var).map(Passphrase::from).map_err(|_| {
                MedcryptError::Validation(format!("Environment variable {} is not set", var))
            })?,
            None => {
                let first = prompt_passphrase("Passphrase: ")?;
                if confirm && !first.is_empty() {
                    let second = prompt_passphrase("Confirm passphrase: ")?;
                    if first.as_str() != second.as_str() {
                        return Err(MedcryptError::Validation(
                            "Passphrases do not match".into(),
                        ));
                    }
                }
                first
            }
        };

        if passphrase.is_empty() {
            return Err(MedcryptError::Validation(
                "An encryption key is required".into(),
            ));
        }

        Ok(passphrase)
    }
}

/// Prompt for a passphrase (hidden input)
fn prompt_passphrase(prompt: &str) -> MedcryptResult<Passphrase> {
    rpassword::prompt_password(prompt)
        .map(Passphrase::from)
        .map_err(|e| MedcryptError::Io(format!("Failed to read passphrase: {}", e)))
}
