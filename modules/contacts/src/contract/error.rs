use thiserror::Error;

/// Failure of any repository operation.
///
/// The variant only describes the reason for display and logging; callers
/// treat every variant the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Contact not found: {record_id}")]
    NotFound { record_id: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl RepositoryError {
    pub fn not_found(record_id: impl Into<String>) -> Self {
        Self::NotFound {
            record_id: record_id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// What a view gets to show when an operation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&RepositoryError> for ErrorInfo {
    fn from(err: &RepositoryError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<RepositoryError> for ErrorInfo {
    fn from(err: RepositoryError) -> Self {
        Self::from(&err)
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
