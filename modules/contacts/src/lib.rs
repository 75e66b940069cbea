// === PUBLIC CONTRACT ===
// Models and errors shared with views and repository implementations
pub mod contract;

pub use contract::{error, model};

pub mod config;
pub mod domain;
pub mod infra;

pub use domain::dispatch::{ImmediateDispatcher, QueuedDispatcher, UiDispatcher};
pub use domain::ports::ContactsView;
pub use domain::presenter::ContactsPresenter;
pub use domain::repo::{CallHistoryRepository, ContactsRepository};
