use async_trait::async_trait;

use super::transactions_model::Transaction;
use crate::errors::Result;

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_by_id(&self, transaction_id: &str) -> Result<Option<Transaction>>;
    fn get_by_display_code(&self, display_code: &str) -> Result<Option<Transaction>>;
    fn list_by_user_and_property(&self, user_id: &str, property_id: &str)
        -> Result<Vec<Transaction>>;
    /// Writes back the certificate location. No other field is ever updated.
    async fn set_certificate_path(&self, transaction_id: &str, path: &str) -> Result<()>;
}
