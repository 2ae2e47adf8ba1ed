//! Certifolio Core - Domain entities, certificate services, and traits.
//!
//! This crate contains the certificate generation logic for tokenized
//! property investments. It is storage-agnostic and defines the repository
//! and object-store traits that outer layers implement.

pub mod certificates;
pub mod constants;
pub mod errors;
pub mod investments;
pub mod properties;
pub mod storage;
pub mod transactions;
pub mod users;

// Re-export the service surface
pub use certificates::{
    CertificateConfig, CertificateLinks, CertificateService, CertificateServiceTrait,
    GenerationWarning,
};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
