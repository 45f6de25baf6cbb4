//! Path management for medcrypt
//!
//! ## Path Resolution Order
//!
//! 1. `MEDCRYPT_HOME` environment variable (if set)
//! 2. The platform configuration directory for `medcrypt`
//!    (`~/.config/medcrypt` on Linux, `%APPDATA%\medcrypt\config` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::MedcryptError;

/// Environment variable that overrides the base directory
pub const HOME_ENV_VAR: &str = "MEDCRYPT_HOME";

/// Manages all paths used by medcrypt
#[derive(Debug, Clone)]
pub struct MedcryptPaths {
    base_dir: PathBuf,
}

impl MedcryptPaths {
    /// Resolve the base directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, MedcryptError> {
        let base_dir = match std::env::var_os(HOME_ENV_VAR) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "medcrypt")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    MedcryptError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create MedcryptPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), MedcryptError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MedcryptError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
