//! Daily rollups for the sales and payment line charts.
//!
//! The two series are keyed differently: sales by order date, payments by
//! payment date. Days without activity are absent rather than zero-filled.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::TransactionRecord;
use crate::types::{add_money, add_units, Money, Units};
use crate::SalesReportResult;

/// Units and value sold on one order date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub units: Units,
    pub amount: Money,
}

/// Value received on one payment date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPayment {
    pub date: NaiveDate,
    pub amount: Money,
}

/// Group every record by order date, ascending.
pub fn daily_sales(records: &[TransactionRecord]) -> SalesReportResult<Vec<DailySales>> {
    let mut by_day: BTreeMap<NaiveDate, (Units, Money)> = BTreeMap::new();

    for record in records {
        let entry = by_day
            .entry(record.order_date)
            .or_insert((0, Decimal::ZERO));
        entry.0 = add_units(entry.0, record.quantity, "daily_sales")?;
        entry.1 = add_money(entry.1, record.amount, "daily_sales")?;
    }

    Ok(by_day
        .into_iter()
        .map(|(date, (units, amount))| DailySales {
            date,
            units,
            amount,
        })
        .collect())
}

/// Group paid records by payment date, ascending.
pub fn daily_payments(records: &[TransactionRecord]) -> SalesReportResult<Vec<DailyPayment>> {
    let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();

    for record in records.iter().filter(|r| r.status.is_paid()) {
        let total = by_day.entry(record.payment_date).or_insert(Decimal::ZERO);
        *total = add_money(*total, record.amount, "daily_payments")?;
    }

    Ok(by_day
        .into_iter()
        .map(|(date, amount)| DailyPayment { date, amount })
        .collect())
}
