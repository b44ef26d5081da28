use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::SalesReportError;
use crate::SalesReportResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Unit counts. Quantities are validated non-negative at ingestion.
pub type Units = u64;

/// Status literal for a settled order.
pub const STATUS_PAID: &str = "PAGO";

/// Status literal for an order awaiting payment.
pub const STATUS_PENDING: &str = "PENDENTE DE PAGAMENTO";

/// Payment status of an order, matched exactly against the source literal.
///
/// `Paid` and `PendingPayment` are not complements: anything else lands in
/// `Other`, which counts as "not paid" for payment metrics but is never part
/// of the receivables report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Paid,
    PendingPayment,
    Other(String),
}

impl OrderStatus {
    pub fn from_literal(literal: &str) -> Self {
        match literal {
            STATUS_PAID => OrderStatus::Paid,
            STATUS_PENDING => OrderStatus::PendingPayment,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    pub fn as_literal(&self) -> &str {
        match self {
            OrderStatus::Paid => STATUS_PAID,
            OrderStatus::PendingPayment => STATUS_PENDING,
            OrderStatus::Other(s) => s,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, OrderStatus::Paid)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, OrderStatus::PendingPayment)
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        OrderStatus::from_literal(&s)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_literal().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_literal())
    }
}

/// A calendar month bucket. Orders chronologically; labelled `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Checked accumulation
// ---------------------------------------------------------------------------

/// `acc + quantity`, or `Overflow` naming the aggregate being built.
pub fn add_units(acc: Units, quantity: Units, context: &str) -> SalesReportResult<Units> {
    acc.checked_add(quantity)
        .ok_or_else(|| SalesReportError::Overflow {
            context: context.to_string(),
        })
}

/// `acc + amount`, or `Overflow` naming the aggregate being built.
pub fn add_money(acc: Money, amount: Money, context: &str) -> SalesReportResult<Money> {
    acc.checked_add(amount)
        .ok_or_else(|| SalesReportError::Overflow {
            context: context.to_string(),
        })
}
