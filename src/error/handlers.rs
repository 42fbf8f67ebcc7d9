//! Error handlers
//!
//! Logging helpers for user store errors.

use crate::error::types::UserStoreError;
use log::error;

/// Log a user store error
pub fn handle_error(err: &UserStoreError) {
    error!("User store error: {}", err);
}
