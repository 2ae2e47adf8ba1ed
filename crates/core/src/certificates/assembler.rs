//! Builds presentation models from stored entities.
//!
//! All aggregation happens on exact decimals over the full matched set.
//! Values become display strings only when the model is populated.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use certifolio_render::{
    PortfolioSummary, PortfolioTransactionRow, StampRefs, TransactionCertificate,
};

use super::formatting::{
    display_code, format_amount, format_percentage, format_quantity, format_row_date,
    format_timestamp, new_certificate_id,
};
use super::integrity::hash_transaction;
use crate::constants::NOT_AVAILABLE;
use crate::errors::{NotFoundError, Result, ValidationError};
use crate::investments::Investment;
use crate::properties::Property;
use crate::transactions::Transaction;
use crate::users::User;

/// Exact holdings of one user in one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortfolioAggregates {
    pub total_tokens: Decimal,
    pub total_invested: Decimal,
    /// Zero when no tokens are held.
    pub average_price: Decimal,
    /// Zero when the property has no token supply.
    pub ownership_percentage: Decimal,
}

/// Sums `investments` and derives the average price and ownership share.
pub fn compute_aggregates(
    investments: &[Investment],
    property_total_tokens: Decimal,
) -> Result<PortfolioAggregates> {
    let overflow = || ValidationError::InvalidInput("portfolio totals overflow".to_string());

    let mut total_tokens = Decimal::ZERO;
    let mut total_invested = Decimal::ZERO;
    for investment in investments {
        total_tokens = total_tokens
            .checked_add(investment.tokens_purchased)
            .ok_or_else(overflow)?;
        total_invested = total_invested
            .checked_add(investment.amount_invested)
            .ok_or_else(overflow)?;
    }

    let average_price = if total_tokens.is_zero() {
        Decimal::ZERO
    } else {
        total_invested.checked_div(total_tokens).ok_or_else(overflow)?
    };

    let ownership_percentage = if property_total_tokens.is_zero() {
        Decimal::ZERO
    } else {
        total_tokens
            .checked_div(property_total_tokens)
            .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(overflow)?
    };

    Ok(PortfolioAggregates {
        total_tokens,
        total_invested,
        average_price,
        ownership_percentage,
    })
}

/// Receipt model for one transaction.
///
/// `investment` is the investment the transaction paid for, if one could be
/// resolved. Without it the token count reads "N/A" and the property's list
/// price is shown.
pub fn assemble_transaction_certificate(
    transaction: &Transaction,
    user: &User,
    property: &Property,
    investment: Option<&Investment>,
    stamps: StampRefs,
    generated_at: DateTime<Utc>,
) -> Result<TransactionCertificate> {
    let tokens_purchased = investment
        .map(|i| format_quantity(i.tokens_purchased))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let token_price = investment
        .map(|i| i.price_per_token)
        .unwrap_or(property.token_price);

    Ok(TransactionCertificate {
        certificate_id: new_certificate_id(&generated_at),
        transaction_code: display_code(transaction.display_code.as_deref(), &transaction.id),
        transaction_date: format_timestamp(&transaction.created_at),
        status: transaction.status.trim().to_uppercase(),
        transaction_type: transaction.transaction_type.trim().to_uppercase(),
        investor_name: user.full_name.clone(),
        investor_code: display_code(user.display_code.as_deref(), &user.id),
        property_name: property.name.clone(),
        property_code: display_code(property.display_code.as_deref(), &property.id),
        tokens_purchased,
        token_price: format_amount(token_price),
        total_amount: format_amount(transaction.amount),
        blockchain_hash: non_blank(transaction.blockchain_hash.as_deref()),
        blockchain_network: non_blank(transaction.blockchain_network.as_deref()),
        stamps,
        generated_at: format_timestamp(&generated_at),
        integrity_hash: hash_transaction(transaction)?,
    })
}

/// Holdings summary of `user` in `property`.
///
/// Only confirmed investments count towards the totals and only completed
/// investment transactions are listed, oldest first.
pub fn assemble_portfolio_summary(
    user: &User,
    property: &Property,
    investments: &[Investment],
    transactions: &[Transaction],
    stamps: StampRefs,
    generated_at: DateTime<Utc>,
) -> Result<PortfolioSummary> {
    let confirmed: Vec<Investment> = investments
        .iter()
        .filter(|i| i.is_confirmed())
        .cloned()
        .collect();
    if confirmed.is_empty() {
        return Err(NotFoundError::NoConfirmedInvestments {
            user_id: user.id.clone(),
            property_id: property.id.clone(),
        }
        .into());
    }

    let aggregates = compute_aggregates(&confirmed, property.total_tokens)?;

    let mut history: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.is_completed_investment())
        .collect();
    history.sort_by_key(|t| t.created_at);

    let rows = history
        .into_iter()
        .map(|tx| PortfolioTransactionRow {
            date: format_row_date(&tx.created_at),
            transaction_code: display_code(tx.display_code.as_deref(), &tx.id),
            tokens: row_tokens(tx, &confirmed),
            amount: format_amount(tx.amount),
            status: tx.status.trim().to_uppercase(),
        })
        .collect();

    Ok(PortfolioSummary {
        certificate_id: new_certificate_id(&generated_at),
        investor_name: user.full_name.clone(),
        investor_code: display_code(user.display_code.as_deref(), &user.id),
        property_name: property.name.clone(),
        property_code: display_code(property.display_code.as_deref(), &property.id),
        property_location: property.location.clone(),
        expected_roi: format_percentage(property.expected_roi),
        total_tokens: format_quantity(aggregates.total_tokens),
        total_invested: format_amount(aggregates.total_invested),
        average_price: format_amount(aggregates.average_price),
        ownership_percentage: format_percentage(aggregates.ownership_percentage),
        transactions: rows,
        stamps,
        generated_at: format_timestamp(&generated_at),
    })
}

/// Tokens shown for a history row: the investment paid for by `tx`, else the
/// latest investment with the same owner and property, else "0".
fn row_tokens(tx: &Transaction, investments: &[Investment]) -> String {
    let linked = investments
        .iter()
        .find(|i| i.transaction_id.as_deref() == Some(tx.id.as_str()));
    let matched = linked.or_else(|| {
        investments
            .iter()
            .filter(|i| i.user_id == tx.user_id && i.property_id == tx.property_id)
            .max_by_key(|i| i.created_at)
    });
    matched
        .map(|i| format_quantity(i.tokens_purchased))
        .unwrap_or_else(|| "0".to_string())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, day, 12, 0, 0).unwrap()
    }

    fn user() -> User {
        User {
            id: "u1".to_string(),
            display_code: Some("INV-001".to_string()),
            full_name: "Jane Investor".to_string(),
            email: None,
        }
    }

    fn property(total_tokens: Decimal) -> Property {
        Property {
            id: "p1".to_string(),
            display_code: Some("PROP-01".to_string()),
            name: "Harbour View".to_string(),
            location: "Lisbon".to_string(),
            total_tokens,
            token_price: dec!(100),
            expected_roi: dec!(8.5),
            legal_document_path: None,
            created_at: at(1),
        }
    }

    fn transaction(id: &str, amount: Decimal, day: u32) -> Transaction {
        Transaction {
            id: id.to_string(),
            display_code: None,
            user_id: "u1".to_string(),
            property_id: "p1".to_string(),
            amount,
            status: "completed".to_string(),
            transaction_type: "investment".to_string(),
            blockchain_hash: Some("  ".to_string()),
            blockchain_network: None,
            certificate_path: None,
            created_at: at(day),
        }
    }

    fn investment(id: &str, tokens: Decimal, amount: Decimal, tx: Option<&str>, day: u32) -> Investment {
        Investment {
            id: id.to_string(),
            user_id: "u1".to_string(),
            property_id: "p1".to_string(),
            transaction_id: tx.map(str::to_string),
            tokens_purchased: tokens,
            price_per_token: if tokens.is_zero() { Decimal::ZERO } else { amount / tokens },
            amount_invested: amount,
            status: "confirmed".to_string(),
            certificate_path: None,
            created_at: at(day),
        }
    }

    #[test]
    fn test_aggregates_use_exact_decimals() {
        let investments = vec![
            investment("i1", dec!(3), dec!(100), None, 2),
            investment("i2", dec!(3), dec!(100), None, 3),
        ];
        let agg = compute_aggregates(&investments, dec!(600)).unwrap();
        assert_eq!(agg.total_tokens, dec!(6));
        assert_eq!(agg.total_invested, dec!(200));
        assert_eq!(format_amount(agg.average_price), "33.33");
        assert_eq!(agg.ownership_percentage, dec!(1));
    }

    #[test]
    fn test_zero_supply_gives_zero_ownership() {
        let investments = vec![investment("i1", dec!(10), dec!(1000), None, 2)];
        let agg = compute_aggregates(&investments, Decimal::ZERO).unwrap();
        assert_eq!(agg.ownership_percentage, Decimal::ZERO);
        assert_eq!(agg.average_price, dec!(100));
    }

    #[test]
    fn test_zero_tokens_gives_zero_average() {
        let investments = vec![investment("i1", dec!(0), dec!(0), None, 2)];
        let agg = compute_aggregates(&investments, dec!(1000)).unwrap();
        assert_eq!(agg.average_price, Decimal::ZERO);
    }

    #[test]
    fn test_transaction_without_investment_shows_not_available() {
        let tx = transaction("t1", dec!(1000.00), 5);
        let cert =
            assemble_transaction_certificate(&tx, &user(), &property(dec!(10000)), None, StampRefs::default(), at(6))
                .unwrap();
        assert_eq!(cert.tokens_purchased, "N/A");
        assert_eq!(cert.token_price, "100.00");
        assert_eq!(cert.total_amount, "1000.00");
        assert_eq!(cert.transaction_code, "t1");
        assert_eq!(cert.investor_code, "INV-001");
        assert_eq!(cert.status, "COMPLETED");
        assert_eq!(cert.transaction_type, "INVESTMENT");
        assert_eq!(cert.blockchain_hash, None);
        assert_eq!(cert.integrity_hash, hash_transaction(&tx).unwrap());
        assert!(cert.certificate_id.starts_with("CERT-20240206-"));
    }

    #[test]
    fn test_transaction_with_investment_uses_its_price() {
        let tx = transaction("t1", dec!(1250), 5);
        let inv = investment("i1", dec!(12.500), dec!(1312.5), Some("t1"), 5);
        let cert = assemble_transaction_certificate(
            &tx,
            &user(),
            &property(dec!(10000)),
            Some(&inv),
            StampRefs::default(),
            at(6),
        )
        .unwrap();
        assert_eq!(cert.tokens_purchased, "12.5");
        assert_eq!(cert.token_price, "105.00");
        assert_eq!(cert.total_amount, "1250.00");
    }

    #[test]
    fn test_portfolio_requires_confirmed_investment() {
        let mut pending = investment("i1", dec!(10), dec!(1000), None, 2);
        pending.status = "PENDING".to_string();
        let err = assemble_portfolio_summary(
            &user(),
            &property(dec!(1000)),
            &[pending],
            &[],
            StampRefs::default(),
            at(6),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_portfolio_rows_ordered_and_matched() {
        let investments = vec![
            investment("i1", dec!(100), dec!(10000), Some("t-old"), 2),
            investment("i2", dec!(50), dec!(5500), None, 9),
        ];
        let mut failed = transaction("t-failed", dec!(999), 4);
        failed.status = "FAILED".to_string();
        let transactions = vec![
            transaction("t-new", dec!(5500), 9),
            failed,
            transaction("t-old", dec!(10000), 2),
        ];
        let summary = assemble_portfolio_summary(
            &user(),
            &property(dec!(10000)),
            &investments,
            &transactions,
            StampRefs::default(),
            at(10),
        )
        .unwrap();

        let codes: Vec<&str> = summary
            .transactions
            .iter()
            .map(|r| r.transaction_code.as_str())
            .collect();
        assert_eq!(codes, vec!["t-old", "t-new"]);
        // t-old is linked to i1; t-new falls back to the latest investment
        assert_eq!(summary.transactions[0].tokens, "100");
        assert_eq!(summary.transactions[1].tokens, "50");
        assert_eq!(summary.transactions[0].date, "2024-02-02");
        assert_eq!(summary.total_tokens, "150");
        assert_eq!(summary.total_invested, "15500.00");
        assert_eq!(summary.average_price, "103.33");
        assert_eq!(summary.ownership_percentage, "1.50");
        assert_eq!(summary.expected_roi, "8.50");
        assert_eq!(summary.property_code, "PROP-01");
    }

    #[test]
    fn test_portfolio_zero_supply_property() {
        let investments = vec![investment("i1", dec!(10), dec!(1000), None, 2)];
        let summary = assemble_portfolio_summary(
            &user(),
            &property(Decimal::ZERO),
            &investments,
            &[],
            StampRefs::default(),
            at(10),
        )
        .unwrap();
        assert_eq!(summary.ownership_percentage, "0.00");
        assert!(summary.transactions.is_empty());
    }
}
