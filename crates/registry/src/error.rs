//! Registry-level error types.

use thiserror::Error;

/// Errors produced by the registry services.
#[derive(Debug, Error)]
pub enum RegistryError {
    // ------ Client faults ------

    /// A request field is missing, blank, or not an allowed value.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The referenced parent entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The write would break a uniqueness rule.
    #[error("{0}")]
    Conflict(String),

    // ------ Server faults ------

    /// A stored row holds a value the domain types cannot represent.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    /// Persistence error from the db crate.
    #[error("database error: {0}")]
    Store(#[from] db::DbError),
}

impl RegistryError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}
