//! Filesystem object store.

mod config;
mod signing;
mod store;

pub use config::LocalObjectStoreConfig;
pub use signing::UrlSigner;
pub use store::LocalObjectStore;
