use crate::contract::error::ErrorInfo;
use crate::contract::model::{CallRecord, Contact};

/// Display surface driven by the presenter.
///
/// Implementations are owned by whatever wires the screen together; the
/// presenter only keeps a weak handle. Methods take `&self`, so a view may
/// call back into the presenter (e.g. detach itself) from inside any of them.
pub trait ContactsView: Send + Sync {
    /// Replace the displayed list.
    fn show_contacts(&self, contacts: &[Contact]);

    fn show_error(&self, error: &ErrorInfo);

    fn show_progress(&self);

    fn hide_progress(&self);

    /// Display the call log. Views without a call log screen can ignore it.
    fn show_call_history(&self, _records: &[CallRecord]) {}
}
