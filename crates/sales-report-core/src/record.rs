use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::SalesReportError;
use crate::types::{Money, OrderStatus, Units};
use crate::SalesReportResult;

/// Day/month/year, as written in the source sheet.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub const FIELD_QUANTITY: &str = "QTD";
pub const FIELD_AMOUNT: &str = "TOTAL DA COMPRA";
pub const FIELD_ORDER_DATE: &str = "DATA_VENDA";
pub const FIELD_PAYMENT_DATE: &str = "DATA_PG";
pub const FIELD_STATUS: &str = "STATUS_PEDIDO";
pub const FIELD_CUSTOMER: &str = "NOME";

/// Largest quantity accepted on a single order.
pub const MAX_QUANTITY: Units = 1_000_000_000;

/// Largest order total accepted on a single order.
pub const MAX_AMOUNT: Money = dec!(1_000_000_000_000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One row as delivered by ingestion: every field is still text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "QTD")]
    pub quantity: String,
    #[serde(rename = "TOTAL DA COMPRA")]
    pub amount: String,
    #[serde(rename = "DATA_VENDA")]
    pub order_date: String,
    #[serde(rename = "DATA_PG")]
    pub payment_date: String,
    #[serde(rename = "STATUS_PEDIDO")]
    pub status: String,
    #[serde(rename = "NOME")]
    pub customer_name: String,
}

/// A validated order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Units in the order
    pub quantity: Units,
    /// Order total in the report currency
    pub amount: Money,
    /// Date the sale occurred
    pub order_date: NaiveDate,
    /// Date payment was received, or is due for unpaid orders
    pub payment_date: NaiveDate,
    pub status: OrderStatus,
    pub customer_name: String,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn invalid(row: usize, field: &str, value: &str, reason: &str) -> SalesReportError {
    SalesReportError::Validation {
        row,
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_quantity(row: usize, raw: &str) -> SalesReportResult<Units> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| invalid(row, FIELD_QUANTITY, raw, "not an integer"))?;
    if value < 0 {
        return Err(invalid(row, FIELD_QUANTITY, raw, "quantity cannot be negative"));
    }
    let value = value as Units;
    if value > MAX_QUANTITY {
        return Err(invalid(
            row,
            FIELD_QUANTITY,
            raw,
            &format!("quantity exceeds {MAX_QUANTITY}"),
        ));
    }
    Ok(value)
}

fn parse_amount(row: usize, raw: &str) -> SalesReportResult<Money> {
    let normalized = raw.trim().replace(',', ".");
    let value = Decimal::from_str(&normalized)
        .map_err(|_| invalid(row, FIELD_AMOUNT, raw, "not a decimal number"))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(invalid(row, FIELD_AMOUNT, raw, "amount cannot be negative"));
    }
    if value > MAX_AMOUNT {
        return Err(invalid(
            row,
            FIELD_AMOUNT,
            raw,
            &format!("amount exceeds {MAX_AMOUNT}"),
        ));
    }
    Ok(value)
}

fn parse_date(row: usize, field: &str, raw: &str) -> SalesReportResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| invalid(row, field, raw, "expected a date as dd/mm/yyyy"))
}

impl TransactionRecord {
    /// Validate a raw row. `row` is the 1-based data row number used in errors.
    pub fn parse(raw: &RawRow, row: usize) -> SalesReportResult<Self> {
        Ok(TransactionRecord {
            quantity: parse_quantity(row, &raw.quantity)?,
            amount: parse_amount(row, &raw.amount)?,
            order_date: parse_date(row, FIELD_ORDER_DATE, &raw.order_date)?,
            payment_date: parse_date(row, FIELD_PAYMENT_DATE, &raw.payment_date)?,
            status: OrderStatus::from_literal(&raw.status),
            customer_name: raw.customer_name.clone(),
        })
    }
}

/// Validate every row, stopping at the first invalid one.
///
/// A dropped row would silently corrupt every downstream sum, so there is no
/// lenient mode.
pub fn parse_rows(rows: &[RawRow]) -> SalesReportResult<Vec<TransactionRecord>> {
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, raw)| TransactionRecord::parse(raw, i + 1))
        .collect::<SalesReportResult<Vec<_>>>()?;
    tracing::debug!(rows = records.len(), "validated transaction rows");
    Ok(records)
}
