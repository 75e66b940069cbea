//! Process-local repository implementations.
//!
//! Used by the demo binary and by tests; nothing is persisted.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::contract::error::RepositoryError;
use crate::contract::model::{CallRecord, Contact, ContactsData};
use crate::domain::repo::{CallHistoryRepository, ContactsRepository};

/// Contacts keyed by `record_id`.
#[derive(Debug, Default)]
pub struct InMemoryContactsRepository {
    contacts: RwLock<HashMap<String, Contact>>,
}

impl InMemoryContactsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `seed`; fails on the first invalid entry.
    pub fn with_seed(seed: Vec<ContactsData>) -> Result<Self, RepositoryError> {
        let repo = Self::new();
        for data in seed {
            repo.add(data)?;
        }
        Ok(repo)
    }

    pub fn len(&self) -> usize {
        self.contacts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.read().is_empty()
    }

    fn validate(data: &ContactsData) -> Result<(), RepositoryError> {
        if data.phone.trim().is_empty() {
            return Err(RepositoryError::validation("phone cannot be empty"));
        }
        if data.first_name.trim().is_empty() && data.last_name.trim().is_empty() {
            return Err(RepositoryError::validation(
                "first name and last name cannot both be empty",
            ));
        }
        Ok(())
    }
}

impl ContactsRepository for InMemoryContactsRepository {
    fn get_contacts(&self) -> Result<Vec<Contact>, RepositoryError> {
        let mut all: Vec<Contact> = self.contacts.read().values().cloned().collect();
        all.sort_by(|a, b| {
            (&a.last_name, &a.first_name, &a.record_id).cmp(&(
                &b.last_name,
                &b.first_name,
                &b.record_id,
            ))
        });
        Ok(all)
    }

    fn add(&self, data: ContactsData) -> Result<(), RepositoryError> {
        Self::validate(&data)?;
        let record_id = Uuid::new_v4().to_string();
        debug!(%record_id, "Storing new contact");
        let contact = Contact::from_data(record_id.clone(), data);
        self.contacts.write().insert(record_id, contact);
        Ok(())
    }

    fn update(&self, contact: &Contact) -> Result<(), RepositoryError> {
        Self::validate(&ContactsData::new(
            contact.first_name.as_str(),
            contact.last_name.as_str(),
            contact.phone.as_str(),
        ))?;
        let mut contacts = self.contacts.write();
        match contacts.get_mut(&contact.record_id) {
            Some(stored) => {
                *stored = contact.clone();
                Ok(())
            }
            None => Err(RepositoryError::not_found(contact.record_id.as_str())),
        }
    }

    fn delete(&self, contact: &Contact) -> Result<(), RepositoryError> {
        self.contacts
            .write()
            .remove(&contact.record_id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(contact.record_id.as_str()))
    }
}

/// Append-only call log.
#[derive(Debug, Default)]
pub struct InMemoryCallHistoryRepository {
    records: RwLock<Vec<CallRecord>>,
}

impl InMemoryCallHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl CallHistoryRepository for InMemoryCallHistoryRepository {
    /// Newest first.
    fn get_history(&self) -> Result<Vec<CallRecord>, RepositoryError> {
        Ok(self.records.read().iter().rev().cloned().collect())
    }

    fn add(&self, record: CallRecord) -> Result<(), RepositoryError> {
        self.records.write().push(record);
        Ok(())
    }
}
