use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SalesReportError;
use crate::format::{format_currency, format_one_decimal};
use crate::record::TransactionRecord;
use crate::types::{add_money, add_units, Money, Units};
use crate::SalesReportResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Scalar summary of the whole record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_units: Units,
    pub paid_units: Units,
    pub pending_units: Units,
    pub paid_amount: Money,
    pub pending_amount: Money,
    /// Distinct order dates
    pub active_days: u64,
    /// paid_amount / paid_units, 0 when nothing was paid
    pub average_ticket: Money,
    /// total_units / active_days, 0 when there are no orders
    pub units_per_day: Decimal,
}

/// The summary metrics as display strings, one per dashboard card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCards {
    pub total_units: String,
    pub paid_units: String,
    pub pending_units: String,
    pub paid_amount: String,
    pub pending_amount: String,
    pub active_days: String,
    pub average_ticket: String,
    pub units_per_day: String,
}

impl From<&SummaryMetrics> for SummaryCards {
    fn from(m: &SummaryMetrics) -> Self {
        SummaryCards {
            total_units: m.total_units.to_string(),
            paid_units: m.paid_units.to_string(),
            pending_units: m.pending_units.to_string(),
            paid_amount: format_currency(m.paid_amount),
            pending_amount: format_currency(m.pending_amount),
            active_days: m.active_days.to_string(),
            average_ticket: format_currency(m.average_ticket),
            units_per_day: format_one_decimal(m.units_per_day),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

pub fn total_units(records: &[TransactionRecord]) -> SalesReportResult<Units> {
    records
        .iter()
        .try_fold(0, |acc, r| add_units(acc, r.quantity, "total_units"))
}

pub fn paid_units(records: &[TransactionRecord]) -> SalesReportResult<Units> {
    records
        .iter()
        .filter(|r| r.status.is_paid())
        .try_fold(0, |acc, r| add_units(acc, r.quantity, "paid_units"))
}

pub fn pending_units(records: &[TransactionRecord]) -> SalesReportResult<Units> {
    records
        .iter()
        .filter(|r| r.status.is_pending())
        .try_fold(0, |acc, r| add_units(acc, r.quantity, "pending_units"))
}

pub fn paid_amount(records: &[TransactionRecord]) -> SalesReportResult<Money> {
    records
        .iter()
        .filter(|r| r.status.is_paid())
        .try_fold(Decimal::ZERO, |acc, r| add_money(acc, r.amount, "paid_amount"))
}

pub fn pending_amount(records: &[TransactionRecord]) -> SalesReportResult<Money> {
    records
        .iter()
        .filter(|r| r.status.is_pending())
        .try_fold(Decimal::ZERO, |acc, r| add_money(acc, r.amount, "pending_amount"))
}

pub fn active_days(records: &[TransactionRecord]) -> u64 {
    records
        .iter()
        .map(|r| r.order_date)
        .collect::<HashSet<_>>()
        .len() as u64
}

fn ratio(numerator: Decimal, denominator: u64, context: &str) -> SalesReportResult<Decimal> {
    if denominator == 0 {
        return Ok(Decimal::ZERO);
    }
    numerator
        .checked_div(Decimal::from(denominator))
        .ok_or_else(|| SalesReportError::Overflow {
            context: context.to_string(),
        })
}

/// Average paid value per paid unit. Returns zero rather than dividing by zero.
pub fn average_ticket(records: &[TransactionRecord]) -> SalesReportResult<Money> {
    ratio(paid_amount(records)?, paid_units(records)?, "average_ticket")
}

/// Average units sold per active day. Returns zero for an empty record set.
pub fn units_per_day(records: &[TransactionRecord]) -> SalesReportResult<Decimal> {
    ratio(
        Decimal::from(total_units(records)?),
        active_days(records),
        "units_per_day",
    )
}

/// Compute every summary metric in one call.
pub fn summarize(records: &[TransactionRecord]) -> SalesReportResult<SummaryMetrics> {
    Ok(SummaryMetrics {
        total_units: total_units(records)?,
        paid_units: paid_units(records)?,
        pending_units: pending_units(records)?,
        paid_amount: paid_amount(records)?,
        pending_amount: pending_amount(records)?,
        active_days: active_days(records),
        average_ticket: average_ticket(records)?,
        units_per_day: units_per_day(records)?,
    })
}
