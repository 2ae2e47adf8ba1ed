//! Dataset-specific error types.
//!
//! These wrap I/O and serialization failures of the JSON dataset and convert
//! them to the storage-agnostic error types defined in `certifolio_core`.

use certifolio_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Errors raised while reading or writing the dataset file.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Dataset lock poisoned")]
    LockPoisoned,
}

impl From<DatasetError> for Error {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::Io(e) => Error::Database(DatabaseError::QueryFailed(e.to_string())),
            DatasetError::Serialization(e) => {
                Error::Database(DatabaseError::Internal(e.to_string()))
            }
            DatasetError::LockPoisoned => {
                Error::Database(DatabaseError::Internal("dataset lock poisoned".to_string()))
            }
        }
    }
}
