//! User store capability interface
//!
//! `UserStoreBackend` is the full set of operations a host expects from a
//! user store. The provided methods are the host defaults: mutations are
//! unsupported and reads come back empty. Backends override what they
//! actually implement.

use std::collections::HashMap;
use std::time::SystemTime;

use crate::auth::Secret;
use crate::error::{Result, UserStoreError};

pub mod manager;
pub mod properties;

pub use manager::CustomUserStoreManager;
pub use properties::{Property, UserStoreProperties};

/// Permission granted to a role on a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    pub resource_id: String,
    pub action: String,
}

pub trait UserStoreBackend: Send + Sync {
    /// Verify a user's credential. Takes ownership so the secret is dropped,
    /// and zeroed, when verification ends.
    fn authenticate(&self, username: &str, credential: Secret) -> Result<bool>;

    fn add_user(
        &self,
        _username: &str,
        _credential: Secret,
        _roles: &[String],
        _claims: &HashMap<String, String>,
        _profile: &str,
        _require_password_change: bool,
    ) -> Result<()> {
        Err(UserStoreError::Unsupported("add_user"))
    }

    fn add_role(&self, _role: &str, _users: &[String], _permissions: &[Permission]) -> Result<()> {
        Err(UserStoreError::Unsupported("add_role"))
    }

    fn delete_role(&self, _role: &str) -> Result<()> {
        Err(UserStoreError::Unsupported("delete_role"))
    }

    fn delete_user(&self, _username: &str) -> Result<()> {
        Err(UserStoreError::Unsupported("delete_user"))
    }

    fn update_role_name(&self, _role: &str, _new_role: &str) -> Result<()> {
        Err(UserStoreError::Unsupported("update_role_name"))
    }

    fn update_user_list_of_role(
        &self,
        _role: &str,
        _deleted_users: &[String],
        _new_users: &[String],
    ) -> Result<()> {
        Err(UserStoreError::Unsupported("update_user_list_of_role"))
    }

    fn update_role_list_of_user(
        &self,
        _username: &str,
        _deleted_roles: &[String],
        _new_roles: &[String],
    ) -> Result<()> {
        Err(UserStoreError::Unsupported("update_role_list_of_user"))
    }

    fn set_user_claim_value(
        &self,
        _username: &str,
        _claim_uri: &str,
        _claim_value: &str,
        _profile: &str,
    ) -> Result<()> {
        Err(UserStoreError::Unsupported("set_user_claim_value"))
    }

    fn set_user_claim_values(
        &self,
        _username: &str,
        _claims: &HashMap<String, String>,
        _profile: &str,
    ) -> Result<()> {
        Err(UserStoreError::Unsupported("set_user_claim_values"))
    }

    fn delete_user_claim_value(&self, _username: &str, _claim_uri: &str, _profile: &str) -> Result<()> {
        Err(UserStoreError::Unsupported("delete_user_claim_value"))
    }

    fn delete_user_claim_values(&self, _username: &str, _claims: &[String], _profile: &str) -> Result<()> {
        Err(UserStoreError::Unsupported("delete_user_claim_values"))
    }

    fn update_credential(&self, _username: &str, _new_credential: Secret, _old_credential: Secret) -> Result<()> {
        Err(UserStoreError::Unsupported("update_credential"))
    }

    fn update_credential_by_admin(&self, _username: &str, _new_credential: Secret) -> Result<()> {
        Err(UserStoreError::Unsupported("update_credential_by_admin"))
    }

    /// `None` means the password never expires
    fn password_expiration_time(&self, _username: &str) -> Result<Option<SystemTime>> {
        Ok(None)
    }

    fn user_list_from_properties(&self, _property: &str, _value: &str, _profile: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn external_role_list_of_user(&self, _username: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn role_names(&self, _filter: &str, _max_items: usize) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn check_existing_role(&self, _role: &str) -> Result<bool> {
        Ok(false)
    }

    fn check_existing_user(&self, _username: &str) -> Result<bool> {
        Ok(false)
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn is_bulk_import_supported(&self) -> bool {
        false
    }

    fn default_user_store_properties(&self) -> UserStoreProperties {
        UserStoreProperties::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AcceptAll;

    impl UserStoreBackend for AcceptAll {
        fn authenticate(&self, _username: &str, _credential: Secret) -> Result<bool> {
            Ok(true)
        }
    }

    #[test]
    fn host_defaults_reject_mutations_as_unsupported() {
        let backend = AcceptAll;

        assert!(matches!(
            backend.delete_user("alice"),
            Err(UserStoreError::Unsupported("delete_user"))
        ));
        assert!(matches!(
            backend.update_credential_by_admin("alice", Secret::from("x")),
            Err(UserStoreError::Unsupported("update_credential_by_admin"))
        ));
    }

    #[test]
    fn host_defaults_return_neutral_reads() {
        let backend = AcceptAll;

        assert!(backend.role_names("*", 10).unwrap().is_empty());
        assert!(!backend.check_existing_user("alice").unwrap());
        assert!(backend.password_expiration_time("alice").unwrap().is_none());
        assert!(!backend.is_read_only());
        assert_eq!(backend.default_user_store_properties(), UserStoreProperties::default());
    }
}
