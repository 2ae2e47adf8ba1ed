use serde::Serialize;

use super::stamp::StampRefs;

/// Presentation model of a per-property portfolio summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioSummary {
    pub certificate_id: String,
    pub investor_name: String,
    pub investor_code: String,
    pub property_name: String,
    pub property_code: String,
    pub property_location: String,
    pub expected_roi: String,
    pub total_tokens: String,
    pub total_invested: String,
    pub average_price: String,
    pub ownership_percentage: String,
    /// Chronological, oldest first.
    pub transactions: Vec<PortfolioTransactionRow>,
    pub stamps: StampRefs,
    pub generated_at: String,
}

/// One row of the transaction history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioTransactionRow {
    pub date: String,
    pub transaction_code: String,
    /// `"0"` when no investment matched the row.
    pub tokens: String,
    pub amount: String,
    pub status: String,
}

impl PortfolioTransactionRow {
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.date,
            &self.transaction_code,
            &self.tokens,
            &self.amount,
            &self.status,
        ]
    }
}
