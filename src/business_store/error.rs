use thiserror::Error;

/// Failures the HTTP layer maps to client errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} references a record that does not exist")]
    InvalidReference { kind: &'static str },

    #[error("unknown reference column '{0}'")]
    UnknownColumn(String),
}
