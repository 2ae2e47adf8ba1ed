use async_trait::async_trait;

use super::certificates_model::CertificateLinks;
use crate::errors::Result;

/// Trait for certificate service operations
#[async_trait]
pub trait CertificateServiceTrait: Send + Sync {
    /// Generates the receipt of a transaction, or reuses the stored one.
    ///
    /// `investment_id` names the investment record that mirrors the stored
    /// path. When it is absent or unknown, the investment linked to the
    /// transaction is used, then the latest one with the same owner and
    /// property.
    async fn generate_transaction_certificate(
        &self,
        transaction_id: &str,
        investment_id: Option<&str>,
    ) -> Result<CertificateLinks>;

    /// Generates the holdings summary of a user in a property.
    ///
    /// `property_ref` is a property id or display code. Summaries are always
    /// regenerated.
    async fn generate_portfolio_summary(
        &self,
        user_id: &str,
        property_ref: &str,
    ) -> Result<CertificateLinks>;

    /// Signed link to a transaction's certificate, generating it on demand.
    ///
    /// `transaction_ref` is a transaction id or display code.
    async fn get_transaction_certificate(&self, transaction_ref: &str) -> Result<String>;

    /// Signed link to a property's legal document, if it has one.
    async fn get_property_legal_document(&self, property_ref: &str) -> Result<Option<String>>;
}
