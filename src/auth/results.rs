//! Authentication result types
//!
//! Defines result structures returned by authentication operations.

/// Outcome of a single verification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub username: String,
    pub authenticated: bool,
}

impl AuthenticationResult {
    pub fn rejected(username: &str) -> Self {
        Self {
            username: username.to_string(),
            authenticated: false,
        }
    }
}
