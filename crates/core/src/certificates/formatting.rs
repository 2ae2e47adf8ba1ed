//! Display-string conversion for certificate values.
//!
//! Decimals are only ever rounded here, at the very end; nothing downstream
//! parses these strings back.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::constants::{CERTIFICATE_TIMESTAMP_FORMAT, DISPLAY_DECIMAL_PRECISION, ROW_DATE_FORMAT};

/// Monetary value with exactly two decimal places.
pub fn format_amount(value: Decimal) -> String {
    fixed_places(value, DISPLAY_DECIMAL_PRECISION)
}

/// Percentage with exactly two decimal places, without the sign.
pub fn format_percentage(value: Decimal) -> String {
    fixed_places(value, DISPLAY_DECIMAL_PRECISION)
}

/// Token quantity without trailing zeros.
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

fn fixed_places(value: Decimal, places: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(CERTIFICATE_TIMESTAMP_FORMAT).to_string()
}

pub fn format_row_date(at: &DateTime<Utc>) -> String {
    at.format(ROW_DATE_FORMAT).to_string()
}

/// Human-readable code when present, the internal identifier otherwise.
pub fn display_code(code: Option<&str>, id: &str) -> String {
    code.map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(id)
        .to_string()
}

/// A fresh certificate identifier: `CERT-YYYYMMDD-XXXXXXXX`.
pub fn new_certificate_id(at: &DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("CERT-{}-{}", at.format("%Y%m%d"), suffix)
}
