pub mod memory;

pub use memory::{InMemoryCallHistoryRepository, InMemoryContactsRepository};
