//! Local storage implementation for Certifolio.
//!
//! This crate implements the storage-facing traits defined in
//! `certifolio-core` on top of the local filesystem:
//! - a filesystem object store issuing public and HMAC-signed links
//! - repositories over a JSON dataset file with write-back of certificate paths
//!
//! # Architecture
//!
//! ```text
//!        core (domain, traits)
//!                 │
//!                 ▼
//!      storage-local (this crate)
//!          │              │
//!          ▼              ▼
//!   objects/ tree    dataset.json
//! ```

pub mod dataset;
pub mod errors;
pub mod investments;
pub mod object_store;
pub mod properties;
pub mod transactions;
pub mod users;

pub use dataset::{Dataset, DatasetStore};
pub use errors::DatasetError;
pub use investments::InvestmentRepository;
pub use object_store::{LocalObjectStore, LocalObjectStoreConfig, UrlSigner};
pub use properties::PropertyRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

// Re-export from certifolio-core for convenience
pub use certifolio_core::errors::{DatabaseError, Error, Result};
