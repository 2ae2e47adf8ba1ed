//! Object storage contract and stored-path handling.

mod paths;
mod storage_errors;
mod storage_traits;

pub use paths::{normalize_stored_path, KNOWN_ROOTS};
pub use storage_errors::StorageError;
pub use storage_traits::ObjectStoreTrait;
