use std::sync::Arc;

use async_trait::async_trait;
use certifolio_core::errors::DatabaseError;
use certifolio_core::transactions::{Transaction, TransactionRepositoryTrait};
use certifolio_core::Result;

use crate::dataset::DatasetStore;

pub struct TransactionRepository {
    store: Arc<DatasetStore>,
}

impl TransactionRepository {
    pub fn new(store: Arc<DatasetStore>) -> Self {
        TransactionRepository { store }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_by_id(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        Ok(self.store.read(|d| {
            d.transactions
                .iter()
                .find(|t| t.id == transaction_id)
                .cloned()
        })?)
    }

    fn get_by_display_code(&self, display_code: &str) -> Result<Option<Transaction>> {
        Ok(self.store.read(|d| {
            d.transactions
                .iter()
                .find(|t| {
                    t.display_code
                        .as_deref()
                        .is_some_and(|code| code.eq_ignore_ascii_case(display_code))
                })
                .cloned()
        })?)
    }

    fn list_by_user_and_property(
        &self,
        user_id: &str,
        property_id: &str,
    ) -> Result<Vec<Transaction>> {
        Ok(self.store.read(|d| {
            d.transactions
                .iter()
                .filter(|t| t.user_id == user_id && t.property_id == property_id)
                .cloned()
                .collect()
        })?)
    }

    async fn set_certificate_path(&self, transaction_id: &str, path: &str) -> Result<()> {
        let updated = self
            .store
            .update(|d| match d.transactions.iter_mut().find(|t| t.id == transaction_id) {
                Some(tx) => {
                    tx.certificate_path = Some(path.to_string());
                    true
                }
                None => false,
            })
            .await?;
        if !updated {
            return Err(DatabaseError::NotFound(format!("transaction {}", transaction_id)).into());
        }
        Ok(())
    }
}
