//! Append-only JSONL audit log
//!
//! One JSON object per line. Each entry goes out in a single write.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::{MedcryptError, MedcryptResult};

use super::entry::AuditEntry;

/// Appends to and reads back the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry
    pub fn log(&self, entry: &AuditEntry) -> MedcryptResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| file.write_all(&line))
            .map_err(|e| {
                MedcryptError::Io(format!(
                    "Failed to append to {}: {}",
                    self.log_path.display(),
                    e
                ))
            })
    }

    /// Every entry in the log, oldest first; a missing log is empty
    pub fn read_all(&self) -> MedcryptResult<Vec<AuditEntry>> {
        let contents = match std::fs::read_to_string(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(MedcryptError::Io(format!(
                    "Failed to read {}: {}",
                    self.log_path.display(),
                    e
                )))
            }
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| {
                    MedcryptError::Json(format!("Corrupt audit entry on line {}: {}", i + 1, e))
                })
            })
            .collect()
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> MedcryptResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{Operation, Outcome, Source};
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, PathBuf, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("audit.log");
        (AuditLogger::new(log_path.clone()), log_path, temp_dir)
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _path, _temp) = create_test_logger();
        let entry = AuditEntry::success(Operation::Hash, Source::Text, Some("00".repeat(64)));

        logger.log(&entry).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Hash);
        assert_eq!(entries[0].source, Source::Text);
        assert_eq!(entries[0].outcome, Outcome::Success);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _path, _temp) = create_test_logger();

        for i in 0..10 {
            let entry = AuditEntry::success(Operation::Encrypt, Source::File, None)
                .with_file("text/csv", format!("labs-{}.csv", i));
            logger.log(&entry).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].file_name.as_deref(), Some("labs-7.csv"));
        assert_eq!(recent[2].file_name.as_deref(), Some("labs-9.csv"));

        assert_eq!(logger.read_recent(50).unwrap().len(), 10);
    }

    #[test]
    fn test_empty_log() {
        let (logger, path, _temp) = create_test_logger();

        assert!(!path.exists());
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let (logger, path, _temp) = create_test_logger();
        logger
            .log(&AuditEntry::failure(Operation::Decrypt, Source::Text))
            .unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .and_then(|mut f| writeln!(f))
            .unwrap();

        assert_eq!(logger.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_line_reported() {
        let (logger, path, _temp) = create_test_logger();
        std::fs::write(&path, "not json\n").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(matches!(err, MedcryptError::Json(_)));
    }

    #[test]
    fn test_survives_restart() {
        let (logger, path, _temp) = create_test_logger();
        logger
            .log(&AuditEntry::success(Operation::Encrypt, Source::Text, None))
            .unwrap();

        let logger2 = AuditLogger::new(path);
        assert_eq!(logger2.read_all().unwrap().len(), 1);
    }
}
