//! Secure memory handling for passphrases
//!
//! Provides a passphrase type that wipes its buffer on drop and never
//! prints its contents.

use std::fmt;
use std::ops::Deref;

use zeroize::Zeroizing;

/// A passphrase that zeros its contents on drop
pub struct Passphrase {
    inner: Zeroizing<String>,
}

impl Passphrase {
    /// Create a new Passphrase
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            inner: Zeroizing::new(s.into()),
        }
    }

    /// Get the passphrase contents
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Deref for Passphrase {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl AsRef<str> for Passphrase {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl From<String> for Passphrase {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Passphrase")
            .field("len", &self.inner.len())
            .finish()
    }
}

// Don't print the contents in Display output
impl fmt::Display for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}
