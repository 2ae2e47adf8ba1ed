//! Certificates module - assembly, integrity, generation and link issuance.

mod assembler;
mod certificates_config;
mod certificates_model;
mod certificates_service;
mod certificates_traits;
mod formatting;
mod generation_lock;
mod integrity;

#[cfg(test)]
mod certificates_service_tests;

pub use assembler::{
    assemble_portfolio_summary, assemble_transaction_certificate, compute_aggregates,
    PortfolioAggregates,
};
pub use certificates_config::CertificateConfig;
pub use certificates_model::{
    CertificateLinks, GenerationProgress, GenerationState, GenerationWarning,
};
pub use certificates_service::CertificateService;
pub use certificates_traits::CertificateServiceTrait;
pub use formatting::{
    display_code, format_amount, format_percentage, format_quantity, format_row_date,
    format_timestamp, new_certificate_id,
};
pub use generation_lock::{portfolio_key, transaction_key, GenerationGuard, GenerationLocks};
pub use integrity::{canonical_form, hash_transaction, verify_transaction};
