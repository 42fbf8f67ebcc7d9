//! Error types
//!
//! Defines the errors surfaced by the user store manager.

use std::fmt;

/// Fixed message returned for every write attempt against the store.
pub const READ_ONLY_MESSAGE: &str =
    "User store is operating in read only mode. Cannot write into the user store.";

/// User store errors
#[derive(Debug)]
pub enum UserStoreError {
    /// Data access failed while looking up a credential. Carries the query
    /// text but never the credential.
    AuthenticationFailure {
        sql: String,
        source: rusqlite::Error,
    },
    /// A mutating operation was invoked on the read-only store.
    ReadOnly,
    /// The operation has no implementation in this backend.
    Unsupported(&'static str),
    /// A helper query (existence check, value listing) failed.
    Query {
        sql: String,
        source: rusqlite::Error,
    },
    Configuration(config::ConfigError),
}

impl fmt::Display for UserStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStoreError::AuthenticationFailure { sql, .. } => {
                write!(f, "Authentication Failure. Using sql: {}", sql)
            }
            UserStoreError::ReadOnly => f.write_str(READ_ONLY_MESSAGE),
            UserStoreError::Unsupported(op) => {
                write!(f, "Operation not supported by this user store: {}", op)
            }
            UserStoreError::Query { sql, source } => {
                write!(f, "Query failed: {} (using sql: {})", source, sql)
            }
            UserStoreError::Configuration(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for UserStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UserStoreError::AuthenticationFailure { source, .. } => Some(source),
            UserStoreError::Query { source, .. } => Some(source),
            UserStoreError::Configuration(e) => Some(e),
            UserStoreError::ReadOnly | UserStoreError::Unsupported(_) => None,
        }
    }
}

impl From<config::ConfigError> for UserStoreError {
    fn from(error: config::ConfigError) -> Self {
        UserStoreError::Configuration(error)
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, UserStoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn read_only_uses_fixed_message() {
        assert_eq!(UserStoreError::ReadOnly.to_string(), READ_ONLY_MESSAGE);
    }

    #[test]
    fn authentication_failure_names_query_and_keeps_source() {
        let err = UserStoreError::AuthenticationFailure {
            sql: "SELECT password FROM customer_data WHERE customer_name = ?".into(),
            source: rusqlite::Error::QueryReturnedNoRows,
        };

        let message = err.to_string();
        assert!(message.starts_with("Authentication Failure. Using sql: SELECT password"));
        assert!(err.source().is_some());
    }
}
