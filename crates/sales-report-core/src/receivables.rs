//! Overdue receivables: pending orders grouped by customer.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::SalesReportError;
use crate::format::format_currency;
use crate::record::TransactionRecord;
use crate::types::{add_money, Money};
use crate::SalesReportResult;

/// Customers owing more than this are flagged as major debtors.
pub const MAJOR_DEBTOR_THRESHOLD: Money = dec!(5000);

/// One customer's outstanding balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivableRow {
    pub customer: String,
    /// Sum of all pending orders for the customer
    pub total_due: Money,
    pub total_due_display: String,
    /// Earliest due date across the customer's pending orders
    pub earliest_due_date: NaiveDate,
    /// Whole days past `earliest_due_date`, never negative
    pub days_overdue: u64,
    /// `total_due` strictly above the major-debtor threshold
    pub is_major_debtor: bool,
}

/// Whole days from `due` to `today`, floored at zero.
pub fn days_overdue(due: NaiveDate, today: NaiveDate) -> u64 {
    (today - due).num_days().max(0) as u64
}

/// Highest balance first, then longest overdue, then customer name.
fn rank(a: &ReceivableRow, b: &ReceivableRow) -> Ordering {
    b.total_due
        .cmp(&a.total_due)
        .then_with(|| b.days_overdue.cmp(&a.days_overdue))
        .then_with(|| a.customer.cmp(&b.customer))
}

/// Build the receivables table for the pending orders in `records`.
///
/// `today` is the reporting date; callers inject it so the report is
/// reproducible. Only orders whose status is exactly "pending payment" are
/// included; other unpaid statuses are not receivables.
pub fn receivables_report(
    records: &[TransactionRecord],
    today: NaiveDate,
    threshold: Money,
) -> SalesReportResult<Vec<ReceivableRow>> {
    if threshold.is_sign_negative() {
        return Err(SalesReportError::InvalidInput {
            field: "major_debtor_threshold".into(),
            reason: "Threshold cannot be negative".into(),
        });
    }

    let mut by_customer: BTreeMap<&str, (Money, NaiveDate)> = BTreeMap::new();

    for record in records.iter().filter(|r| r.status.is_pending()) {
        let entry = by_customer
            .entry(record.customer_name.as_str())
            .or_insert((Decimal::ZERO, record.payment_date));
        entry.0 = add_money(entry.0, record.amount, "receivables_report")?;
        if record.payment_date < entry.1 {
            entry.1 = record.payment_date;
        }
    }

    let mut rows: Vec<ReceivableRow> = by_customer
        .into_iter()
        .map(|(customer, (total_due, earliest_due_date))| ReceivableRow {
            customer: customer.to_string(),
            total_due,
            total_due_display: format_currency(total_due),
            earliest_due_date,
            days_overdue: days_overdue(earliest_due_date, today),
            is_major_debtor: total_due > threshold,
        })
        .collect();

    rows.sort_by(rank);

    tracing::debug!(
        customers = rows.len(),
        major_debtors = rows.iter().filter(|r| r.is_major_debtor).count(),
        %today,
        "built receivables report"
    );
    Ok(rows)
}
