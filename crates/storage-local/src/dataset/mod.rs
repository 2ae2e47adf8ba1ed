//! JSON dataset backing the local repositories.

mod model;
mod store;

pub use model::Dataset;
pub use store::DatasetStore;
