#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use contacts::error::{ErrorInfo, RepositoryError};
use contacts::model::{CallRecord, Contact, ContactsData};
use contacts::{CallHistoryRepository, ContactsPresenter, ContactsRepository, ContactsView};
use parking_lot::Mutex;

pub fn mock_contact() -> Contact {
    Contact::new("", "Mock", "Contact", "+00000000000")
}

pub fn mock_data() -> ContactsData {
    ContactsData::new("Mock", "Contact", "+00000000000")
}

// ---------- views ----------

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    ShowContacts(Vec<Contact>),
    ShowError(String),
    ShowProgress,
    HideProgress,
    ShowHistory(Vec<CallRecord>),
}

/// Records every call in order.
#[derive(Default)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().clone()
    }
}

impl ContactsView for RecordingView {
    fn show_contacts(&self, contacts: &[Contact]) {
        self.calls.lock().push(ViewCall::ShowContacts(contacts.to_vec()));
    }

    fn show_error(&self, error: &ErrorInfo) {
        self.calls.lock().push(ViewCall::ShowError(error.message.clone()));
    }

    fn show_progress(&self) {
        self.calls.lock().push(ViewCall::ShowProgress);
    }

    fn hide_progress(&self) {
        self.calls.lock().push(ViewCall::HideProgress);
    }

    fn show_call_history(&self, records: &[CallRecord]) {
        self.calls.lock().push(ViewCall::ShowHistory(records.to_vec()));
    }
}

/// The view callback during which a [`DisappearingView`] detaches itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetachOn {
    Progress,
    Contacts,
    Error,
}

/// Records its calls, then detaches itself from the presenter inside the
/// chosen callback, like a screen the user navigates away from mid-load.
pub struct DisappearingView {
    pub presenter: Mutex<Weak<ContactsPresenter>>,
    pub inner: RecordingView,
    pub detach_on: DetachOn,
}

impl DisappearingView {
    /// Detaches while progress is shown.
    pub fn new() -> Arc<Self> {
        Self::detaching_on(DetachOn::Progress)
    }

    pub fn detaching_on(detach_on: DetachOn) -> Arc<Self> {
        Arc::new(Self {
            presenter: Mutex::new(Weak::new()),
            inner: RecordingView::default(),
            detach_on,
        })
    }

    fn leave_if(&self, during: DetachOn) {
        if self.detach_on != during {
            return;
        }
        let presenter = self.presenter.lock().upgrade();
        if let Some(p) = presenter {
            p.detach_view();
        }
    }
}

impl ContactsView for DisappearingView {
    fn show_contacts(&self, contacts: &[Contact]) {
        self.inner.show_contacts(contacts);
        self.leave_if(DetachOn::Contacts);
    }

    fn show_error(&self, error: &ErrorInfo) {
        self.inner.show_error(error);
        self.leave_if(DetachOn::Error);
    }

    fn show_progress(&self) {
        self.inner.show_progress();
        self.leave_if(DetachOn::Progress);
    }

    fn hide_progress(&self) {
        self.inner.hide_progress();
    }
}

/// Flips `completed` when progress is hidden.
#[derive(Default)]
pub struct SignallingView {
    pub completed: AtomicBool,
}

impl ContactsView for SignallingView {
    fn show_contacts(&self, _contacts: &[Contact]) {}

    fn show_error(&self, _error: &ErrorInfo) {}

    fn show_progress(&self) {}

    fn hide_progress(&self) {
        self.completed.store(true, Ordering::SeqCst);
    }
}

// ---------- repositories ----------

/// Serves a fixed list and accepts every write.
#[derive(Default)]
pub struct StubContactsRepository {
    pub contacts: Vec<Contact>,
    pub get_calls: AtomicUsize,
    pub added: Mutex<Vec<ContactsData>>,
    pub updated: Mutex<Vec<Contact>>,
    pub deleted: Mutex<Vec<Contact>>,
}

impl StubContactsRepository {
    pub fn with_contacts(contacts: Vec<Contact>) -> Arc<Self> {
        Arc::new(Self {
            contacts,
            ..Default::default()
        })
    }
}

impl ContactsRepository for StubContactsRepository {
    fn get_contacts(&self) -> Result<Vec<Contact>, RepositoryError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.contacts.clone())
    }

    fn add(&self, data: ContactsData) -> Result<(), RepositoryError> {
        self.added.lock().push(data);
        Ok(())
    }

    fn update(&self, contact: &Contact) -> Result<(), RepositoryError> {
        self.updated.lock().push(contact.clone());
        Ok(())
    }

    fn delete(&self, contact: &Contact) -> Result<(), RepositoryError> {
        self.deleted.lock().push(contact.clone());
        Ok(())
    }
}

/// Fails every call.
#[derive(Default)]
pub struct ThrowingContactsRepository {
    pub calls: AtomicUsize,
}

impl ThrowingContactsRepository {
    fn fail(&self) -> RepositoryError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        RepositoryError::storage("backend unavailable")
    }
}

impl ContactsRepository for ThrowingContactsRepository {
    fn get_contacts(&self) -> Result<Vec<Contact>, RepositoryError> {
        Err(self.fail())
    }

    fn add(&self, _data: ContactsData) -> Result<(), RepositoryError> {
        Err(self.fail())
    }

    fn update(&self, _contact: &Contact) -> Result<(), RepositoryError> {
        Err(self.fail())
    }

    fn delete(&self, _contact: &Contact) -> Result<(), RepositoryError> {
        Err(self.fail())
    }
}

/// Call log double; fails every call when `failing` is set.
#[derive(Default)]
pub struct MockCallHistoryRepository {
    pub failing: bool,
    pub add_attempts: AtomicUsize,
    pub records: Mutex<Vec<CallRecord>>,
}

impl MockCallHistoryRepository {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            failing: true,
            ..Default::default()
        })
    }
}

impl CallHistoryRepository for MockCallHistoryRepository {
    fn get_history(&self) -> Result<Vec<CallRecord>, RepositoryError> {
        if self.failing {
            return Err(RepositoryError::storage("history unavailable"));
        }
        Ok(self.records.lock().clone())
    }

    fn add(&self, record: CallRecord) -> Result<(), RepositoryError> {
        self.add_attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(RepositoryError::storage("history unavailable"));
        }
        self.records.lock().push(record);
        Ok(())
    }
}
