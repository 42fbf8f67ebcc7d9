//! Credential verifier
//!
//! Looks up the stored credential for a user with the configured select
//! statement and compares it to the supplied one.
//!
//! The comparison is plain string equality, not constant-time.

use rusqlite::OptionalExtension;
use std::sync::Arc;
use zeroize::Zeroizing;

use super::credentials::Secret;
use super::results::AuthenticationResult;
use crate::config::{RealmConfig, SELECT_USER_SQL};
use crate::error::{Result, UserStoreError};
use crate::storage::{ConnectionSource, value_as_string};
use crate::utils::ComponentLogger;

/// Verifies user credentials against the backing table. Holds no mutable
/// state; one connection is acquired and released per call.
pub struct CredentialVerifier {
    source: Arc<dyn ConnectionSource>,
    select_user_sql: String,
    anonymous_username: String,
    logger: ComponentLogger,
}

impl CredentialVerifier {
    pub fn new(
        realm: &RealmConfig,
        source: Arc<dyn ConnectionSource>,
        logger: ComponentLogger,
    ) -> Result<Self> {
        let select_user_sql = realm
            .select_user_sql()
            .filter(|sql| !sql.trim().is_empty())
            .ok_or_else(|| {
                UserStoreError::Configuration(config::ConfigError::Message(format!(
                    "user store property {SELECT_USER_SQL} must be set"
                )))
            })?
            .to_string();

        Ok(Self {
            source,
            select_user_sql,
            anonymous_username: realm.anonymous_username.clone(),
            logger,
        })
    }

    /// Returns true only when the stored value, trimmed, equals `credential`.
    pub fn authenticate(&self, username: &str, credential: Secret) -> Result<bool> {
        self.verify(username, credential)
            .map(|result| result.authenticated)
    }

    pub fn verify(&self, username: &str, credential: Secret) -> Result<AuthenticationResult> {
        if username == self.anonymous_username {
            self.logger
                .error(format_args!("Anonymous user trying to login"));
            return Ok(AuthenticationResult::rejected(username));
        }

        let authenticated = self.lookup(username, &credential).map_err(|source| {
            UserStoreError::AuthenticationFailure {
                sql: self.select_user_sql.clone(),
                source,
            }
        })?;

        self.logger.debug(format_args!(
            "User {} login attempt. Login success :: {}",
            username, authenticated
        ));

        Ok(AuthenticationResult {
            username: username.to_string(),
            authenticated,
        })
    }

    fn lookup(&self, username: &str, credential: &Secret) -> rusqlite::Result<bool> {
        let conn = self.source.connect()?;

        self.logger.debug(format_args!("{}", self.select_user_sql));

        let mut stmt = conn.prepare(&self.select_user_sql)?;
        if stmt.parameter_count() != 1 {
            return Err(rusqlite::Error::InvalidParameterCount(
                1,
                stmt.parameter_count(),
            ));
        }

        let stored = stmt
            .query_row([username], |row| value_as_string(row.get_ref(0)?))
            .optional()?
            .flatten()
            .map(Zeroizing::new);

        Ok(match stored {
            Some(stored) => stored.trim() == credential.as_str(),
            None => false,
        })
    }
}
