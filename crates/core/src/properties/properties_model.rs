use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tokenized real-estate property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub display_code: Option<String>,
    pub name: String,
    pub location: String,
    /// Total token supply.
    pub total_tokens: Decimal,
    pub token_price: Decimal,
    /// Expected annual return, in percent.
    pub expected_roi: Decimal,
    pub legal_document_path: Option<String>,
    pub created_at: DateTime<Utc>,
}
