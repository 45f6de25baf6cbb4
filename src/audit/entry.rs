//! Audit entry data structures
//!
//! An entry records which operation ran, on what kind of input, and
//! whether it succeeded. Plaintext, passphrases and ciphertext are never
//! part of an entry; the plaintext digest is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Encrypt,
    Decrypt,
    Hash,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Encrypt => write!(f, "ENCRYPT"),
            Operation::Decrypt => write!(f, "DECRYPT"),
            Operation::Hash => write!(f, "HASH"),
        }
    }
}

/// Where the processed plaintext came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Text,
    File,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Text => write!(f, "text"),
            Source::File => write!(f, "file"),
        }
    }
}

/// Result of an audited operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Kind of plaintext involved
    pub source: Source,

    /// Whether the operation succeeded
    pub outcome: Outcome,

    /// SHA-512 digest of the plaintext, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,

    /// MIME type of file input or output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,

    /// Name of the file read or written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl AuditEntry {
    /// Create a successful entry
    pub fn success(operation: Operation, source: Source, digest: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            source,
            outcome: Outcome::Success,
            digest,
            mime: None,
            file_name: None,
        }
    }

    /// Create a failed entry
    pub fn failure(operation: Operation, source: Source) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            source,
            outcome: Outcome::Failure,
            digest: None,
            mime: None,
            file_name: None,
        }
    }

    /// Attach file details
    pub fn with_file(mut self, mime: impl Into<String>, file_name: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self.file_name = Some(file_name.into());
        self
    }

    /// One-line human-readable summary
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "{} {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.source,
            match self.outcome {
                Outcome::Success => "ok",
                Outcome::Failure => "FAILED",
            }
        );

        if let Some(name) = &self.file_name {
            line.push_str(&format!(" {}", name));
        }
        if let Some(mime) = &self.mime {
            line.push_str(&format!(" ({})", mime));
        }
        if let Some(digest) = &self.digest {
            // First 16 hex chars are enough to eyeball a match
            line.push_str(&format!(" sha512:{}", &digest[..digest.len().min(16)]));
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_entry() {
        let entry = AuditEntry::success(Operation::Encrypt, Source::Text, Some("ab".repeat(64)));
        assert_eq!(entry.outcome, Outcome::Success);
        assert_eq!(entry.digest.as_deref().map(str::len), Some(128));
        assert!(entry.file_name.is_none());
    }

    #[test]
    fn test_failure_entry_has_no_digest() {
        let entry = AuditEntry::failure(Operation::Decrypt, Source::Text);
        assert_eq!(entry.outcome, Outcome::Failure);
        assert!(entry.digest.is_none());
    }

    #[test]
    fn test_serialization_omits_empty_fields() {
        let entry = AuditEntry::failure(Operation::Decrypt, Source::Text);
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("\"operation\":\"decrypt\""));
        assert!(json.contains("\"outcome\":\"failure\""));
        assert!(!json.contains("digest"));
        assert!(!json.contains("file_name"));
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::success(Operation::Encrypt, Source::File, Some("f".repeat(128)))
            .with_file("image/png", "xray.png");
        let line = entry.format_human_readable();

        assert!(line.contains("ENCRYPT file ok"));
        assert!(line.contains("xray.png (image/png)"));
        assert!(line.ends_with(&format!("sha512:{}", "f".repeat(16))));
    }

    #[test]
    fn test_failure_format() {
        let line = AuditEntry::failure(Operation::Decrypt, Source::Text).format_human_readable();
        assert!(line.contains("DECRYPT text FAILED"));
    }
}
