use super::properties_model::Property;
use crate::errors::Result;

/// Trait for property repository operations
pub trait PropertyRepositoryTrait: Send + Sync {
    fn get_by_id(&self, property_id: &str) -> Result<Option<Property>>;
    fn get_by_display_code(&self, display_code: &str) -> Result<Option<Property>>;
}
