//! Configuration module for medcrypt
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::MedcryptPaths;
pub use settings::Settings;
