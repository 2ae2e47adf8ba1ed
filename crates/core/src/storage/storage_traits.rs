use std::time::Duration;

use async_trait::async_trait;

use super::storage_errors::StorageError;

/// Trait for object storage operations
///
/// Paths are relative storage keys such as `transactions/u1/t1.pdf`.
#[async_trait]
pub trait ObjectStoreTrait: Send + Sync {
    /// Stores `bytes` at `path` and returns the stored path.
    ///
    /// An existing object at the same path is replaced; overwriting is never
    /// an error.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Permanent public URL of a stored path.
    fn public_url(&self, path: &str) -> Result<String, StorageError>;

    /// Time-bounded URL granting read access to a stored path.
    async fn signed_url(&self, path: &str, ttl: Duration) -> Result<String, StorageError>;

    /// URL of a static asset, such as a stamp image, by logical name.
    fn asset_url(&self, name: &str) -> Result<String, StorageError>;

    /// Prefix that [`ObjectStoreTrait::public_url`] puts in front of every path.
    fn public_base_url(&self) -> &str;
}
