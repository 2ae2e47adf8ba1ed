//! Transaction domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{status_is, TRANSACTION_STATUS_COMPLETED, TRANSACTION_TYPE_INVESTMENT};

/// A payment recorded against a property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub display_code: Option<String>,
    pub user_id: String,
    pub property_id: String,
    pub amount: Decimal,
    pub status: String,
    pub transaction_type: String,
    pub blockchain_hash: Option<String>,
    pub blockchain_network: Option<String>,
    /// Canonical public URL of the generated certificate, once generated.
    pub certificate_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// True for a completed token purchase.
    pub fn is_completed_investment(&self) -> bool {
        status_is(&self.status, TRANSACTION_STATUS_COMPLETED)
            && status_is(&self.transaction_type, TRANSACTION_TYPE_INVESTMENT)
    }

    /// The stored certificate location, ignoring blank values.
    pub fn stored_certificate(&self) -> Option<&str> {
        self.certificate_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}
