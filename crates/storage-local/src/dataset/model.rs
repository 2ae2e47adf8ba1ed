use serde::{Deserialize, Serialize};

use certifolio_core::investments::Investment;
use certifolio_core::properties::Property;
use certifolio_core::transactions::Transaction;
use certifolio_core::users::User;

/// Every record the certificate pipeline reads, as stored on disk.
///
/// Decimal fields are written as strings, e.g. `"amount": "1000.00"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dataset {
    pub users: Vec<User>,
    pub properties: Vec<Property>,
    pub investments: Vec<Investment>,
    pub transactions: Vec<Transaction>,
}
