use std::collections::BTreeMap;
use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metrics::{summarize, SummaryCards, SummaryMetrics};
use crate::monthly::{compare_months, MonthlyComparisonRow};
use crate::receivables::{receivables_report, ReceivableRow, MAJOR_DEBTOR_THRESHOLD};
use crate::record::TransactionRecord;
use crate::timeseries::{daily_payments, daily_sales, DailyPayment, DailySales};
use crate::types::{with_metadata, ComputationOutput, Money, OrderStatus};
use crate::SalesReportResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Tunable report policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Balance above which a customer is highlighted as a major debtor
    pub major_debtor_threshold: Money,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            major_debtor_threshold: MAJOR_DEBTOR_THRESHOLD,
        }
    }
}

/// Every section of the sales report, computed from one record set.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub summary: SummaryMetrics,
    pub cards: SummaryCards,
    pub daily_sales: Vec<DailySales>,
    pub daily_payments: Vec<DailyPayment>,
    pub monthly_comparison: Vec<MonthlyComparisonRow>,
    pub receivables: Vec<ReceivableRow>,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Count records per status literal that is neither paid nor pending.
fn unrecognised_statuses(records: &[TransactionRecord]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        if let OrderStatus::Other(ref literal) = record.status {
            *counts.entry(literal.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

/// Run the whole pipeline over `records` as of `today`.
pub fn build_report(
    records: &[TransactionRecord],
    config: &ReportConfig,
    today: NaiveDate,
) -> SalesReportResult<ComputationOutput<SalesReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if records.is_empty() {
        warnings.push("No transaction records: every metric is zero".into());
    }

    for (status, count) in unrecognised_statuses(records) {
        tracing::warn!(status, count, "unrecognised order status");
        warnings.push(format!(
            "{count} record(s) with status '{status}' count towards total units only"
        ));
    }

    let receivables = receivables_report(records, today, config.major_debtor_threshold)?;
    let summary = summarize(records)?;

    let report = SalesReport {
        cards: SummaryCards::from(&summary),
        summary,
        daily_sales: daily_sales(records)?,
        daily_payments: daily_payments(records)?,
        monthly_comparison: compare_months(records)?,
        receivables,
    };

    tracing::debug!(
        records = records.len(),
        sales_days = report.daily_sales.len(),
        payment_days = report.daily_payments.len(),
        months = report.monthly_comparison.len(),
        debtors = report.receivables.len(),
        "sales report assembled"
    );

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Sales aggregation: summary metrics, daily rollups by order and payment date, \
         month-over-month comparison, pending receivables by customer",
        &serde_json::json!({
            "record_count": records.len(),
            "today": today,
            "major_debtor_threshold": config.major_debtor_threshold,
            "paid_status": OrderStatus::Paid.as_literal(),
            "pending_status": OrderStatus::PendingPayment.as_literal(),
        }),
        warnings,
        elapsed,
        report,
    ))
}
