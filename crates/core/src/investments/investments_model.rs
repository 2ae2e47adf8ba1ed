//! Investment domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{status_is, INVESTMENT_STATUS_CONFIRMED};

/// Token holdings acquired by a user in a property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub user_id: String,
    pub property_id: String,
    /// Transaction that paid for this investment, when known.
    pub transaction_id: Option<String>,
    pub tokens_purchased: Decimal,
    pub price_per_token: Decimal,
    pub amount_invested: Decimal,
    pub status: String,
    /// Mirror of the transaction's certificate location.
    pub certificate_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Investment {
    pub fn is_confirmed(&self) -> bool {
        status_is(&self.status, INVESTMENT_STATUS_CONFIRMED)
    }

    pub fn has_certificate(&self) -> bool {
        self.certificate_path
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty())
    }
}

/// The most recently created investment of `investments`.
pub fn most_recent(investments: &[Investment]) -> Option<&Investment> {
    investments.iter().max_by_key(|i| i.created_at)
}
