//! Audit logging for medcrypt operations
//!
//! Records every encrypt, decrypt and hash run by the command-line front
//! end in an append-only JSONL file. The library functions in `crypto` and
//! `codec` never write to it themselves.
//!
//! # Example
//!
//! ```rust,ignore
//! use medcrypt::audit::{AuditEntry, AuditLogger, Operation, Source};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::success(Operation::Encrypt, Source::Text, Some(digest)))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation, Outcome, Source};
pub use logger::AuditLogger;
