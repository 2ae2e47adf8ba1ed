use std::sync::Arc;

use async_trait::async_trait;
use certifolio_core::errors::DatabaseError;
use certifolio_core::investments::{Investment, InvestmentRepositoryTrait};
use certifolio_core::Result;

use crate::dataset::DatasetStore;

pub struct InvestmentRepository {
    store: Arc<DatasetStore>,
}

impl InvestmentRepository {
    pub fn new(store: Arc<DatasetStore>) -> Self {
        InvestmentRepository { store }
    }
}

#[async_trait]
impl InvestmentRepositoryTrait for InvestmentRepository {
    fn get_by_id(&self, investment_id: &str) -> Result<Option<Investment>> {
        Ok(self.store.read(|d| {
            d.investments
                .iter()
                .find(|i| i.id == investment_id)
                .cloned()
        })?)
    }

    fn list_by_user_and_property(
        &self,
        user_id: &str,
        property_id: &str,
    ) -> Result<Vec<Investment>> {
        Ok(self.store.read(|d| {
            d.investments
                .iter()
                .filter(|i| i.user_id == user_id && i.property_id == property_id)
                .cloned()
                .collect()
        })?)
    }

    async fn set_certificate_path(&self, investment_id: &str, path: &str) -> Result<()> {
        let updated = self
            .store
            .update(|d| match d.investments.iter_mut().find(|i| i.id == investment_id) {
                Some(investment) => {
                    investment.certificate_path = Some(path.to_string());
                    true
                }
                None => false,
            })
            .await?;
        if !updated {
            return Err(DatabaseError::NotFound(format!("investment {}", investment_id)).into());
        }
        Ok(())
    }
}
