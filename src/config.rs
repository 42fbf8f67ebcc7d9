//! Realm configuration for the custom user store
//!
//! Loads the host-supplied settings bundle (tenant, connection, user store
//! property bag) from `config.toml` with environment overrides.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Property key holding the credential lookup statement.
pub const SELECT_USER_SQL: &str = "SelectUserSQL";

/// Tenant id of the host's super tenant.
pub const SUPER_TENANT_ID: i32 = -1234;

/// Default reserved anonymous user name.
pub const DEFAULT_ANONYMOUS_USERNAME: &str = "anonymous";

const ENV_PREFIX: &str = "CUSTOM_USERSTORE";

/// Realm configuration handed to the user store manager
#[derive(Debug, Deserialize, Clone)]
pub struct RealmConfig {
    /// Tenant this store serves. Opaque to the store itself.
    #[serde(default = "default_tenant_id")]
    pub tenant_id: i32,

    /// User name that is never allowed to authenticate
    #[serde(default = "default_anonymous_username")]
    pub anonymous_username: String,

    pub connection: ConnectionConfig,

    /// Realm property bag. Keys are matched case-insensitively.
    #[serde(default)]
    pub user_store_properties: HashMap<String, String>,
}

/// Backing store connection settings
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectionConfig {
    /// SQLite database path or `file:` URI
    pub url: String,

    /// How long the driver waits on a locked database before failing
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_tenant_id() -> i32 {
    SUPER_TENANT_ID
}

fn default_anonymous_username() -> String {
    DEFAULT_ANONYMOUS_USERNAME.to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl RealmConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        // Packaged layout first, then the working directory
        let config_paths = ["custom-userstore/config", "config"];

        let mut last_error = None;

        for config_path in &config_paths {
            match Config::builder()
                .add_source(File::with_name(config_path))
                .add_source(env_source())
                .build()
            {
                Ok(settings) => {
                    let config: RealmConfig = settings.try_deserialize()?;
                    config.validate()?;
                    return Ok(config);
                }
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(config::ConfigError::Message(format!(
            "Failed to load config.toml from any location. Tried: {config_paths:?}. Last error: {last_error:?}"
        )))
    }

    /// Build configuration from an inline TOML document, still honouring
    /// environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(env_source())
            .build()?;

        let config: RealmConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Look up a realm property by key
    pub fn user_store_property(&self, key: &str) -> Option<&str> {
        self.user_store_properties
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    /// The configured credential lookup statement
    pub fn select_user_sql(&self) -> Option<&str> {
        self.user_store_property(SELECT_USER_SQL)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.connection.url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "connection.url cannot be empty".into(),
            ));
        }

        match self.select_user_sql() {
            Some(sql) if !sql.trim().is_empty() => {}
            _ => {
                return Err(config::ConfigError::Message(format!(
                    "user store property {SELECT_USER_SQL} must be set"
                )));
            }
        }

        if self.anonymous_username.is_empty() {
            return Err(config::ConfigError::Message(
                "anonymous_username cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

impl ConnectionConfig {
    /// Get busy timeout as Duration
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
