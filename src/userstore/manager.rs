//! Custom user store manager
//!
//! Read-only store over a two-column (user name, password) table. Only
//! authentication touches the database; every write is refused before any
//! I/O and the remaining reads are fixed answers.

use log::Log;
use rusqlite::ToSql;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use super::properties::{UserStoreProperties, custom_user_store_properties};
use super::{Permission, UserStoreBackend};
use crate::auth::{AuthenticationResult, CredentialVerifier, Secret};
use crate::config::RealmConfig;
use crate::error::{Result, UserStoreError};
use crate::storage::{self, ConnectionSource, SqliteConnectionSource};
use crate::utils::ComponentLogger;

pub struct CustomUserStoreManager {
    tenant_id: i32,
    verifier: CredentialVerifier,
    source: Arc<dyn ConnectionSource>,
    logger: ComponentLogger,
}

impl CustomUserStoreManager {
    /// Build a manager with an injected connection source and logger
    pub fn new(
        realm: &RealmConfig,
        source: Arc<dyn ConnectionSource>,
        logger: Arc<dyn Log>,
    ) -> Result<Self> {
        Self::build(realm, source, ComponentLogger::new(logger, "userstore"))
    }

    /// Build a manager over the configured SQLite database, logging through
    /// the process-wide logger
    pub fn from_config(realm: &RealmConfig) -> Result<Self> {
        Self::build(
            realm,
            Arc::new(SqliteConnectionSource::from_config(&realm.connection)),
            ComponentLogger::global("userstore"),
        )
    }

    fn build(
        realm: &RealmConfig,
        source: Arc<dyn ConnectionSource>,
        logger: ComponentLogger,
    ) -> Result<Self> {
        let verifier = CredentialVerifier::new(realm, Arc::clone(&source), logger.clone())?;

        logger.debug(format_args!(
            "Custom user store ready for tenant {}",
            realm.tenant_id
        ));

        Ok(Self {
            tenant_id: realm.tenant_id,
            verifier,
            source,
            logger,
        })
    }

    pub fn tenant_id(&self) -> i32 {
        self.tenant_id
    }

    /// Authenticate and report who was checked
    pub fn verify(&self, username: &str, credential: Secret) -> Result<AuthenticationResult> {
        self.verifier.verify(username, credential)
    }

    /// True when `sql` yields at least one value for `params`
    pub fn is_value_existing(&self, sql: &str, params: &[&dyn ToSql]) -> Result<bool> {
        storage::is_value_existing(self.source.as_ref(), None, sql, params, &self.logger)
    }

    fn reject_write(&self, operation: &str) -> Result<()> {
        self.logger.debug(format_args!(
            "Rejected {} on read-only user store",
            operation
        ));
        Err(UserStoreError::ReadOnly)
    }
}

impl UserStoreBackend for CustomUserStoreManager {
    fn authenticate(&self, username: &str, credential: Secret) -> Result<bool> {
        self.verifier.authenticate(username, credential)
    }

    fn add_user(
        &self,
        _username: &str,
        _credential: Secret,
        _roles: &[String],
        _claims: &HashMap<String, String>,
        _profile: &str,
        _require_password_change: bool,
    ) -> Result<()> {
        self.reject_write("add_user")
    }

    fn add_role(&self, _role: &str, _users: &[String], _permissions: &[Permission]) -> Result<()> {
        self.reject_write("add_role")
    }

    fn delete_role(&self, _role: &str) -> Result<()> {
        self.reject_write("delete_role")
    }

    fn delete_user(&self, _username: &str) -> Result<()> {
        self.reject_write("delete_user")
    }

    fn update_role_name(&self, _role: &str, _new_role: &str) -> Result<()> {
        self.reject_write("update_role_name")
    }

    fn update_user_list_of_role(
        &self,
        _role: &str,
        _deleted_users: &[String],
        _new_users: &[String],
    ) -> Result<()> {
        self.reject_write("update_user_list_of_role")
    }

    fn update_role_list_of_user(
        &self,
        _username: &str,
        _deleted_roles: &[String],
        _new_roles: &[String],
    ) -> Result<()> {
        self.reject_write("update_role_list_of_user")
    }

    fn set_user_claim_value(
        &self,
        _username: &str,
        _claim_uri: &str,
        _claim_value: &str,
        _profile: &str,
    ) -> Result<()> {
        self.reject_write("set_user_claim_value")
    }

    fn set_user_claim_values(
        &self,
        _username: &str,
        _claims: &HashMap<String, String>,
        _profile: &str,
    ) -> Result<()> {
        self.reject_write("set_user_claim_values")
    }

    fn delete_user_claim_value(&self, _username: &str, _claim_uri: &str, _profile: &str) -> Result<()> {
        self.reject_write("delete_user_claim_value")
    }

    fn delete_user_claim_values(&self, _username: &str, _claims: &[String], _profile: &str) -> Result<()> {
        self.reject_write("delete_user_claim_values")
    }

    fn update_credential(&self, _username: &str, _new_credential: Secret, _old_credential: Secret) -> Result<()> {
        self.reject_write("update_credential")
    }

    fn update_credential_by_admin(&self, _username: &str, _new_credential: Secret) -> Result<()> {
        self.reject_write("update_credential_by_admin")
    }

    fn password_expiration_time(&self, _username: &str) -> Result<Option<SystemTime>> {
        Ok(None)
    }

    fn user_list_from_properties(&self, _property: &str, _value: &str, _profile: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    // Users of this store only hold internal roles.
    fn external_role_list_of_user(&self, _username: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn role_names(&self, _filter: &str, _max_items: usize) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn check_existing_role(&self, _role: &str) -> Result<bool> {
        Ok(false)
    }

    // Reports every name as existing without querying.
    // TODO: back this with an existence query once an IsUserExistingSQL property is agreed on.
    fn check_existing_user(&self, _username: &str) -> Result<bool> {
        Ok(true)
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn is_bulk_import_supported(&self) -> bool {
        false
    }

    fn default_user_store_properties(&self) -> UserStoreProperties {
        custom_user_store_properties()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use tempfile::NamedTempFile;

    fn manager() -> (NamedTempFile, CustomUserStoreManager) {
        let db = NamedTempFile::new().unwrap();
        let conn = Connection::open(db.path()).unwrap();
        conn.execute_batch(
            "CREATE TABLE customer_data (customer_name TEXT PRIMARY KEY, password TEXT);
             INSERT INTO customer_data VALUES ('alice', 'secret1');",
        )
        .unwrap();

        let realm = RealmConfig::from_toml_str(&format!(
            "tenant_id = 3\n[connection]\nurl = {:?}\n[user_store_properties]\nSelectUserSQL = {:?}\n",
            db.path().to_string_lossy(),
            crate::userstore::properties::DEFAULT_SELECT_USER_SQL,
        ))
        .unwrap();

        let manager = CustomUserStoreManager::from_config(&realm).unwrap();
        (db, manager)
    }

    #[test]
    fn authenticates_through_backend_trait() {
        let (_db, manager) = manager();
        let backend: &dyn UserStoreBackend = &manager;

        assert!(backend.authenticate("alice", Secret::from("secret1")).unwrap());
        assert!(!backend.authenticate("alice", Secret::from("secret2")).unwrap());
        assert_eq!(manager.tenant_id(), 3);
    }

    #[test]
    fn value_existence_queries_the_store() {
        let (_db, manager) = manager();
        let sql = "SELECT customer_name FROM customer_data WHERE customer_name = ?";

        assert!(manager.is_value_existing(sql, &[&"alice"]).unwrap());
        assert!(!manager.is_value_existing(sql, &[&"bob"]).unwrap());
    }

    #[test]
    fn capability_flags_are_fixed() {
        let (_db, manager) = manager();
        assert!(manager.is_read_only());
        assert!(!manager.is_bulk_import_supported());
        assert_eq!(
            manager.default_user_store_properties(),
            custom_user_store_properties()
        );
    }
}
