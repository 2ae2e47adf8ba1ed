use std::sync::Arc;

use certifolio_core::properties::{Property, PropertyRepositoryTrait};
use certifolio_core::Result;

use crate::dataset::DatasetStore;

pub struct PropertyRepository {
    store: Arc<DatasetStore>,
}

impl PropertyRepository {
    pub fn new(store: Arc<DatasetStore>) -> Self {
        PropertyRepository { store }
    }
}

impl PropertyRepositoryTrait for PropertyRepository {
    fn get_by_id(&self, property_id: &str) -> Result<Option<Property>> {
        Ok(self
            .store
            .read(|d| d.properties.iter().find(|p| p.id == property_id).cloned())?)
    }

    fn get_by_display_code(&self, display_code: &str) -> Result<Option<Property>> {
        Ok(self.store.read(|d| {
            d.properties
                .iter()
                .find(|p| {
                    p.display_code
                        .as_deref()
                        .is_some_and(|code| code.eq_ignore_ascii_case(display_code))
                })
                .cloned()
        })?)
    }
}
