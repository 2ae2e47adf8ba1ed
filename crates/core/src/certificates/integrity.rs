//! Tamper-evidence digest over stored transaction fields.
//!
//! The digest depends only on the persisted record, never on rendered output,
//! so it can be recomputed from the record at any later time and compared.

use chrono::SecondsFormat;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::Result;
use crate::transactions::Transaction;

/// Canonical field set, serialized in declaration order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalTransaction<'a> {
    id: &'a str,
    display_code: Option<&'a str>,
    user_id: &'a str,
    property_id: &'a str,
    amount: String,
    created_at: String,
}

impl<'a> From<&'a Transaction> for CanonicalTransaction<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            id: &tx.id,
            display_code: tx.display_code.as_deref(),
            user_id: &tx.user_id,
            property_id: &tx.property_id,
            amount: tx.amount.to_string(),
            created_at: tx.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Canonical serialization the digest is computed over.
pub fn canonical_form(tx: &Transaction) -> Result<String> {
    Ok(serde_json::to_string(&CanonicalTransaction::from(tx))?)
}

/// Hex SHA-256 of the canonical serialization of `tx`.
pub fn hash_transaction(tx: &Transaction) -> Result<String> {
    let canonical = canonical_form(tx)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Recomputes the digest of `tx` and compares it with `digest`.
pub fn verify_transaction(tx: &Transaction, digest: &str) -> Result<bool> {
    Ok(hash_transaction(tx)?.eq_ignore_ascii_case(digest.trim()))
}
