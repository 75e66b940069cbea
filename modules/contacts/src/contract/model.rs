use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored contact.
///
/// `record_id` is assigned by the repository on creation and is the
/// contact's identity: two values with the same `record_id` are the same
/// contact, even if one of them carries stale name or phone fields.
#[derive(Debug, Clone)]
pub struct Contact {
    pub record_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl Contact {
    pub fn new(
        record_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
        }
    }

    /// Materialize creation data under a repository-assigned id.
    pub fn from_data(record_id: impl Into<String>, data: ContactsData) -> Self {
        Self {
            record_id: record_id.into(),
            first_name: data.first_name,
            last_name: data.last_name,
            phone: data.phone,
        }
    }

    /// Same record with replaced details.
    pub fn with_details(&self, data: ContactsData) -> Self {
        Self::from_data(self.record_id.clone(), data)
    }

    pub fn display_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", last) => last.to_string(),
            (first, "") => first.to_string(),
            (first, last) => format!("{first} {last}"),
        }
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.record_id == other.record_id
    }
}

impl Eq for Contact {}

impl Hash for Contact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.record_id.hash(state);
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.display_name(), self.phone)
    }
}

/// Data for creating a new contact; the repository assigns `record_id`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactsData {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone: String,
}

impl ContactsData {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
        }
    }
}

/// One outgoing call placed to a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub id: Uuid,
    pub contact_id: String,
    pub phone: String,
    pub placed_at: DateTime<Utc>,
}

impl CallRecord {
    /// Record a call to `contact` placed now.
    pub fn outgoing(contact: &Contact) -> Self {
        Self {
            id: Uuid::new_v4(),
            contact_id: contact.record_id.clone(),
            phone: contact.phone.clone(),
            placed_at: Utc::now(),
        }
    }
}
