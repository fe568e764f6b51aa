//! Password container with automatic zeroing on drop
//!
//! Server files may carry a login password. The wrapper keeps it:
//! 1. Zeroed when dropped
//! 2. Out of `Debug` output and log records

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// A login password that wipes its buffer on drop
#[derive(Clone, Default, PartialEq, Eq, Zeroize, Serialize, Deserialize)]
#[zeroize(drop)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the plaintext; callers must not log it
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for Password {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// Prevent accidental debug printing of secrets
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("len", &self.0.len())
            .field("data", &"[REDACTED]")
            .finish()
    }
}
