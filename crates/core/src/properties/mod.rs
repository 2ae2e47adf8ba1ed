//! Properties module - domain model and repository trait.

mod properties_model;
mod properties_traits;

pub use properties_model::Property;
pub use properties_traits::PropertyRepositoryTrait;
