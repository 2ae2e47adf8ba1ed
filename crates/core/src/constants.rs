/// Transaction status that makes a transaction count towards a portfolio.
pub const TRANSACTION_STATUS_COMPLETED: &str = "COMPLETED";

/// Transaction type of a token purchase.
pub const TRANSACTION_TYPE_INVESTMENT: &str = "INVESTMENT";

/// Investment status that makes an investment count towards a portfolio.
pub const INVESTMENT_STATUS_CONFIRMED: &str = "CONFIRMED";

/// Decimal places of monetary and percentage display values.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Shown in place of a token count when no investment matched.
pub const NOT_AVAILABLE: &str = "N/A";

/// Long timestamp format used on certificates.
pub const CERTIFICATE_TIMESTAMP_FORMAT: &str = "%B %d, %Y %H:%M UTC";

/// Short date format used in transaction history rows.
pub const ROW_DATE_FORMAT: &str = "%Y-%m-%d";

/// Object-store root of transaction certificates.
pub const TRANSACTIONS_ROOT: &str = "transactions";

/// Object-store root of portfolio summaries.
pub const PORTFOLIO_ROOT: &str = "portfolio";

/// Object-store root of property legal documents.
pub const LEGAL_DOCUMENTS_ROOT: &str = "legal";

pub const PDF_EXTENSION: &str = "pdf";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Case-insensitive status comparison.
pub fn status_is(value: &str, expected: &str) -> bool {
    value.trim().eq_ignore_ascii_case(expected)
}
