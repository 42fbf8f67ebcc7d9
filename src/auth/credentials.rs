//! Credential handling
//!
//! Wraps the caller-supplied credential so it is wiped from memory once the
//! verifier is done with it.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Caller-supplied credential, zeroed on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    data: String,
}

impl Secret {
    pub fn new(data: String) -> Self {
        Self { data }
    }

    /// Borrow the credential. The slice points at memory that is zeroed when
    /// the `Secret` drops.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<String> for Secret {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}

impl From<&str> for Secret {
    fn from(data: &str) -> Self {
        Self::new(data.to_string())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.len())
            .field("data", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
