pub mod auth;
pub mod config;
pub mod error;
pub mod storage;
pub mod userstore;
pub mod utils;

pub use auth::{CredentialVerifier, Secret};
pub use error::UserStoreError;
pub use userstore::{CustomUserStoreManager, UserStoreBackend};
