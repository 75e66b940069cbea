use serde::{Deserialize, Serialize};

use crate::contract::model::ContactsData;

/// Configuration for the contacts module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactsConfig {
    /// Reload the list after a successful add, update or delete.
    #[serde(default = "default_refresh_after_mutation")]
    pub refresh_after_mutation: bool,
    /// Contacts preloaded into the in-memory store.
    #[serde(default)]
    pub seed_contacts: Vec<ContactsData>,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            refresh_after_mutation: default_refresh_after_mutation(),
            seed_contacts: Vec::new(),
        }
    }
}

fn default_refresh_after_mutation() -> bool {
    true
}
