//! Month-over-month comparison of units sold and value received.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Serialize, Serializer};

use crate::format::{format_currency, format_percent, NO_DATA_MARKER};
use crate::record::TransactionRecord;
use crate::types::{add_money, add_units, Money, Month, Units};
use crate::SalesReportResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Period-over-period change, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentChange {
    Change(Decimal),
    /// First period, or the previous period was exactly zero
    NoData,
}

impl PercentChange {
    /// `(current - previous) / previous * 100`, or `NoData` when `previous` is
    /// zero or the change does not fit in a `Decimal`.
    pub fn between(previous: Decimal, current: Decimal) -> Self {
        if previous.is_zero() {
            return PercentChange::NoData;
        }
        current
            .checked_sub(previous)
            .and_then(|delta| delta.checked_div(previous))
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .map_or(PercentChange::NoData, PercentChange::Change)
    }
}

impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentChange::Change(v) => f.write_str(&format_percent(*v)),
            PercentChange::NoData => f.write_str(NO_DATA_MARKER),
        }
    }
}

impl Serialize for PercentChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of the monthly comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyComparisonRow {
    pub month: Month,
    /// Units ordered in the month (by order date, all statuses)
    pub units_sold: Units,
    /// Value received in the month (by payment date, paid orders only)
    pub amount_paid: Money,
    pub amount_paid_display: String,
    pub units_change: PercentChange,
    pub amount_change: PercentChange,
}

// ---------------------------------------------------------------------------
// Rollups
// ---------------------------------------------------------------------------

/// Units per month of order date, over all records.
pub fn monthly_sales_rollup(
    records: &[TransactionRecord],
) -> SalesReportResult<BTreeMap<Month, Units>> {
    let mut totals = BTreeMap::new();
    for record in records {
        let units = totals.entry(Month::of(record.order_date)).or_insert(0);
        *units = add_units(*units, record.quantity, "monthly_sales_rollup")?;
    }
    Ok(totals)
}

/// Paid value per month of payment date, over paid records only.
pub fn monthly_payment_rollup(
    records: &[TransactionRecord],
) -> SalesReportResult<BTreeMap<Month, Money>> {
    let mut totals = BTreeMap::new();
    for record in records.iter().filter(|r| r.status.is_paid()) {
        let amount = totals
            .entry(Month::of(record.payment_date))
            .or_insert(Decimal::ZERO);
        *amount = add_money(*amount, record.amount, "monthly_payment_rollup")?;
    }
    Ok(totals)
}

/// Outer-join the two rollups; a month missing from one side gets zero there.
fn join_rollups(
    sales: &BTreeMap<Month, Units>,
    payments: &BTreeMap<Month, Money>,
) -> Vec<(Month, Units, Money)> {
    let months: BTreeSet<Month> = sales.keys().chain(payments.keys()).copied().collect();

    months
        .into_iter()
        .map(|month| {
            let units = sales.get(&month).copied().unwrap_or(0);
            let amount = payments.get(&month).copied().unwrap_or(Decimal::ZERO);
            (month, units, amount)
        })
        .collect()
}

/// Build the monthly comparison table, ascending by month.
pub fn compare_months(
    records: &[TransactionRecord],
) -> SalesReportResult<Vec<MonthlyComparisonRow>> {
    let joined = join_rollups(
        &monthly_sales_rollup(records)?,
        &monthly_payment_rollup(records)?,
    );

    let mut rows = Vec::with_capacity(joined.len());
    let mut previous: Option<(Units, Money)> = None;

    for (month, units, amount) in joined {
        let (units_change, amount_change) = match previous {
            None => (PercentChange::NoData, PercentChange::NoData),
            Some((prev_units, prev_amount)) => (
                PercentChange::between(Decimal::from(prev_units), Decimal::from(units)),
                PercentChange::between(prev_amount, amount),
            ),
        };

        rows.push(MonthlyComparisonRow {
            month,
            units_sold: units,
            amount_paid: amount,
            amount_paid_display: format_currency(amount),
            units_change,
            amount_change,
        });
        previous = Some((units, amount));
    }

    tracing::debug!(months = rows.len(), "built monthly comparison");
    Ok(rows)
}
