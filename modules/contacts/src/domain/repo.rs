use crate::contract::error::RepositoryError;
use crate::contract::model::{CallRecord, Contact, ContactsData};

/// Port for the contacts store.
///
/// Every call is one blocking unit of work; any asynchrony lives behind the
/// implementation.
pub trait ContactsRepository: Send + Sync {
    /// All stored contacts.
    fn get_contacts(&self) -> Result<Vec<Contact>, RepositoryError>;
    /// Create a contact; the repository assigns its `record_id`.
    fn add(&self, data: ContactsData) -> Result<(), RepositoryError>;
    /// Replace the stored details of `contact.record_id`.
    fn update(&self, contact: &Contact) -> Result<(), RepositoryError>;
    fn delete(&self, contact: &Contact) -> Result<(), RepositoryError>;
}

/// Port for the outgoing call log.
pub trait CallHistoryRepository: Send + Sync {
    fn get_history(&self) -> Result<Vec<CallRecord>, RepositoryError>;
    fn add(&self, record: CallRecord) -> Result<(), RepositoryError>;
}
