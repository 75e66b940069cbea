use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, info, instrument, trace, warn};

use crate::config::ContactsConfig;
use crate::contract::error::{ErrorInfo, RepositoryError};
use crate::contract::model::{CallRecord, Contact, ContactsData};
use crate::domain::dispatch::{ImmediateDispatcher, UiDispatcher};
use crate::domain::ports::ContactsView;
use crate::domain::repo::{CallHistoryRepository, ContactsRepository};

/// Presenter behaviour knobs.
#[derive(Debug, Clone)]
pub struct PresenterConfig {
    pub refresh_after_mutation: bool,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            refresh_after_mutation: true,
        }
    }
}

impl From<&ContactsConfig> for PresenterConfig {
    fn from(cfg: &ContactsConfig) -> Self {
        Self {
            refresh_after_mutation: cfg.refresh_after_mutation,
        }
    }
}

/// The presenter's handle on its view. Never holds a strong reference.
#[derive(Default)]
struct ViewBinding {
    view: RwLock<Option<Weak<dyn ContactsView>>>,
}

impl ViewBinding {
    /// Re-read the binding. The lock is released before the caller touches
    /// the view, so the view may rebind or detach from inside its callbacks.
    fn current(&self) -> Option<Arc<dyn ContactsView>> {
        self.view.read().as_ref().and_then(Weak::upgrade)
    }

    fn set(&self, view: Option<Weak<dyn ContactsView>>) {
        *self.view.write() = view;
    }
}

/// Mediates between the contacts/call-history repositories and a view.
///
/// Repository calls run inline in the calling method and their failures never
/// leave the presenter: they are logged and shown through
/// [`ContactsView::show_error`]. View updates go through the configured
/// [`UiDispatcher`], and each one re-checks the binding when it runs, so a
/// detached view, a dropped view or a dropped presenter all turn pending
/// updates into no-ops.
pub struct ContactsPresenter {
    contacts: Arc<dyn ContactsRepository>,
    call_history: Arc<dyn CallHistoryRepository>,
    binding: Arc<ViewBinding>,
    dispatcher: Arc<dyn UiDispatcher>,
    config: PresenterConfig,
}

impl ContactsPresenter {
    /// Presenter with no bound view, inline view updates and default config.
    pub fn new(
        contacts: Arc<dyn ContactsRepository>,
        call_history: Arc<dyn CallHistoryRepository>,
    ) -> Self {
        Self {
            contacts,
            call_history,
            binding: Arc::new(ViewBinding::default()),
            dispatcher: Arc::new(ImmediateDispatcher),
            config: PresenterConfig::default(),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn UiDispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_config(mut self, config: PresenterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    // --- view binding ---

    /// Bind `view` without taking ownership of it.
    pub fn attach_view<V>(&self, view: &Arc<V>)
    where
        V: ContactsView + 'static,
    {
        let weak: Weak<dyn ContactsView> = Arc::downgrade(view) as Weak<V>;
        self.binding.set(Some(weak));
        debug!("view attached");
    }

    /// Replace the binding; `None` detaches.
    pub fn set_view(&self, view: Option<Weak<dyn ContactsView>>) {
        self.binding.set(view);
    }

    pub fn detach_view(&self) {
        self.binding.set(None);
        debug!("view detached");
    }

    /// True while a view is bound and still alive.
    pub fn has_view(&self) -> bool {
        self.binding.current().is_some()
    }

    // --- user intents ---

    /// The screen became visible: load and show the contact list.
    #[instrument(name = "contacts.presenter.view_opened", skip(self))]
    pub fn view_opened(&self) {
        info!("Loading contacts");
        self.load_contacts();
    }

    /// Log a call to `contact`. The call itself has already happened, so a
    /// failed write is reported once and never retried.
    #[instrument(
        name = "contacts.presenter.contact_pressed",
        skip(self, contact),
        fields(record_id = %contact.record_id)
    )]
    pub fn contact_pressed(&self, contact: &Contact) {
        let record = CallRecord::outgoing(contact);
        debug!(call_id = %record.id, "Recording outgoing call");

        if let Err(e) = self.call_history.add(record) {
            self.report_failure("call_history.add", e);
        }
    }

    #[instrument(name = "contacts.presenter.new_contact_added", skip(self, data))]
    pub fn new_contact_added(&self, data: ContactsData) {
        info!("Adding contact");
        let result = self.contacts.add(data);
        self.finish_mutation("contacts.add", result);
    }

    #[instrument(
        name = "contacts.presenter.contact_updated",
        skip(self, contact),
        fields(record_id = %contact.record_id)
    )]
    pub fn contact_updated(&self, contact: &Contact) {
        info!("Updating contact");
        let result = self.contacts.update(contact);
        self.finish_mutation("contacts.update", result);
    }

    #[instrument(
        name = "contacts.presenter.contact_deleted",
        skip(self, contact),
        fields(record_id = %contact.record_id)
    )]
    pub fn contact_deleted(&self, contact: &Contact) {
        info!("Deleting contact");
        let result = self.contacts.delete(contact);
        self.finish_mutation("contacts.delete", result);
    }

    /// The call log screen became visible.
    #[instrument(name = "contacts.presenter.history_opened", skip(self))]
    pub fn history_opened(&self) {
        self.on_view(|v| v.show_progress());

        match self.call_history.get_history() {
            Ok(records) => {
                debug!(count = records.len(), "Call history loaded");
                self.on_view(move |v| v.show_call_history(&records));
            }
            Err(e) => self.report_failure("call_history.get_history", e),
        }

        self.on_view(|v| v.hide_progress());
    }

    // --- helpers ---

    fn load_contacts(&self) {
        self.on_view(|v| v.show_progress());

        match self.contacts.get_contacts() {
            Ok(contacts) => {
                debug!(count = contacts.len(), "Contacts loaded");
                self.on_view(move |v| v.show_contacts(&contacts));
            }
            Err(e) => self.report_failure("contacts.get_contacts", e),
        }

        self.on_view(|v| v.hide_progress());
    }

    fn finish_mutation(&self, operation: &'static str, result: Result<(), RepositoryError>) {
        match result {
            Ok(()) if self.config.refresh_after_mutation => self.load_contacts(),
            Ok(()) => debug!(operation, "Mutation done, refresh disabled"),
            Err(e) => self.report_failure(operation, e),
        }
    }

    fn report_failure(&self, operation: &'static str, err: RepositoryError) {
        warn!(operation, error = %err, "Repository call failed");
        let info = ErrorInfo::from(&err);
        self.on_view(move |v| v.show_error(&info));
    }

    /// Post one view update. It runs against whatever view is bound when the
    /// dispatcher executes it, and not at all if the presenter is gone.
    fn on_view<F>(&self, update: F)
    where
        F: FnOnce(&dyn ContactsView) + Send + 'static,
    {
        let binding = Arc::downgrade(&self.binding);
        self.dispatcher.dispatch(Box::new(move || {
            let Some(binding) = binding.upgrade() else {
                trace!("presenter dropped, view update discarded");
                return;
            };
            match binding.current() {
                Some(view) => update(view.as_ref()),
                None => trace!("no view bound, view update discarded"),
            }
        }));
    }
}

impl std::fmt::Debug for ContactsPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactsPresenter")
            .field("has_view", &self.has_view())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
