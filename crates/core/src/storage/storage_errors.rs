use thiserror::Error;

/// Errors raised by an object-store implementation.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The storage backend rejected or failed the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    /// A path or URL could not be mapped to a storage location.
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("Failed to sign URL: {0}")]
    Signing(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}
