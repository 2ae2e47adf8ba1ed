use async_trait::async_trait;

use super::investments_model::Investment;
use crate::errors::Result;

/// Trait for investment repository operations
#[async_trait]
pub trait InvestmentRepositoryTrait: Send + Sync {
    fn get_by_id(&self, investment_id: &str) -> Result<Option<Investment>>;
    fn list_by_user_and_property(&self, user_id: &str, property_id: &str)
        -> Result<Vec<Investment>>;
    async fn set_certificate_path(&self, investment_id: &str, path: &str) -> Result<()>;
}
