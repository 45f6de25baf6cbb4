//! User settings for medcrypt
//!
//! Holds the key derivation parameters used for new ciphertexts, the input
//! file size limit, and audit preferences.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::MedcryptPaths;
use crate::codec::DEFAULT_MAX_FILE_SIZE;
use crate::crypto::KdfParams;
use crate::error::MedcryptError;

/// User settings for medcrypt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Argon2id parameters for new ciphertexts
    #[serde(default)]
    pub kdf: KdfParams,

    /// Largest file accepted for encryption or hashing, in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Whether operations are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Where decrypted files are written when no directory is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            kdf: KdfParams::default(),
            max_file_size: default_max_file_size(),
            audit_enabled: default_audit_enabled(),
            output_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MedcryptPaths) -> Result<Self, MedcryptError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                MedcryptError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MedcryptError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.kdf.validate().map_err(|e| {
                MedcryptError::Config(format!("Invalid key derivation settings: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MedcryptPaths) -> Result<(), MedcryptError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            MedcryptError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            MedcryptError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
