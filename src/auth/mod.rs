//! Authentication system
//!
//! Read-only credential verification against a two-column user table.

pub mod credentials;
pub mod results;
pub mod validator;

pub use credentials::Secret;
pub use results::AuthenticationResult;
pub use validator::CredentialVerifier;
