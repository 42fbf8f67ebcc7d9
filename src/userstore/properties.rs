//! Declarative configuration schema for this store type
//!
//! Tells the host which realm properties the store expects, split into
//! mandatory, optional and advanced groups.

use std::sync::LazyLock;

use crate::config::SELECT_USER_SQL;

/// Default credential lookup for the two-column customer table
pub const DEFAULT_SELECT_USER_SQL: &str =
    "SELECT password FROM customer_data WHERE customer_name = ?";

/// A single configurable property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
    pub display_name: String,
    pub description: String,
}

impl Property {
    fn new(name: &str, display_name: &str, value: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            display_name: display_name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Property groups exposed to the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStoreProperties {
    pub mandatory: Vec<Property>,
    pub optional: Vec<Property>,
    pub advanced: Vec<Property>,
}

impl UserStoreProperties {
    /// Find a property in any group
    pub fn find(&self, name: &str) -> Option<&Property> {
        self.mandatory
            .iter()
            .chain(&self.optional)
            .chain(&self.advanced)
            .find(|p| p.name == name)
    }
}

static CUSTOM_PROPERTIES: LazyLock<UserStoreProperties> = LazyLock::new(|| UserStoreProperties {
    mandatory: vec![Property::new(
        "url",
        "Connection URL",
        "",
        "Path or file: URI of the user store database",
    )],
    optional: vec![
        Property::new(
            "Disabled",
            "Disabled",
            "false",
            "Whether the user store is disabled",
        ),
        Property::new(
            "ReadOnly",
            "Read Only",
            "true",
            "Indicates whether the user store of this realm operates in the user read only mode or not",
        ),
        Property::new(
            "SCIMEnabled",
            "Enable SCIM",
            "false",
            "Whether SCIM provisioning is enabled for the user store",
        ),
    ],
    advanced: vec![
        Property::new(
            SELECT_USER_SQL,
            "Select User SQL",
            DEFAULT_SELECT_USER_SQL,
            "Returns the stored credential for the bound user name",
        ),
        Property::new(
            "busy_timeout_ms",
            "Busy Timeout",
            "5000",
            "Milliseconds to wait on a locked database",
        ),
    ],
});

/// Schema for the custom read-only store
pub fn custom_user_store_properties() -> UserStoreProperties {
    CUSTOM_PROPERTIES.clone()
}
