use serde::Serialize;

use super::stamp::StampRefs;

/// Presentation model of a single transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionCertificate {
    /// Unique per generation event.
    pub certificate_id: String,
    pub transaction_code: String,
    pub transaction_date: String,
    /// Uppercased.
    pub status: String,
    /// Uppercased.
    pub transaction_type: String,
    pub investor_name: String,
    pub investor_code: String,
    pub property_name: String,
    pub property_code: String,
    /// Decimal string, or `"N/A"` when no investment matched.
    pub tokens_purchased: String,
    pub token_price: String,
    pub total_amount: String,
    pub blockchain_hash: Option<String>,
    pub blockchain_network: Option<String>,
    pub stamps: StampRefs,
    pub generated_at: String,
    /// Hex SHA-256 over the stored transaction fields.
    pub integrity_hash: String,
}

impl TransactionCertificate {
    /// True when the status should be drawn with the success highlight.
    pub fn is_completed(&self) -> bool {
        self.status == "COMPLETED"
    }
}
