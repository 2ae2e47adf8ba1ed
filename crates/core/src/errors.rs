//! Core error types for certificate generation.
//!
//! Storage-specific errors are converted to these types by the layer that
//! owns the storage. Rendering failures arrive already aggregated by the
//! fallback chain.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use certifolio_render::RenderError;

use crate::storage::StorageError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for certificate generation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("Document rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to upload document to '{path}': {source}")]
    Upload {
        path: String,
        #[source]
        source: StorageError,
    },

    #[error("Object storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// True for failures caused by a missing or unusable input record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Which precondition of a generation request failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Transaction '{0}' does not exist")]
    Transaction(String),

    #[error("User '{0}' does not exist")]
    User(String),

    #[error("Property '{0}' does not exist")]
    Property(String),

    #[error("User '{user_id}' has no confirmed investments in property '{property_id}'")]
    NoConfirmedInvestments {
        user_id: String,
        property_id: String,
    },
}

/// Storage-agnostic error type for repository operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// A query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// An update targeted a record that does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for input data.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
