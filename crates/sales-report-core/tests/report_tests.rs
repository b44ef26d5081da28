use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sales_report_core::metrics::{self, SummaryCards};
use sales_report_core::monthly::{compare_months, PercentChange};
use sales_report_core::receivables::{receivables_report, MAJOR_DEBTOR_THRESHOLD};
use sales_report_core::record::{parse_rows, RawRow};
use sales_report_core::report::{build_report, ReportConfig};
use sales_report_core::timeseries::daily_sales;
use sales_report_core::{SalesReportError, Units};

// ===========================================================================
// Helpers
// ===========================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn row(qty: &str, amount: &str, order: &str, pay: &str, status: &str, name: &str) -> RawRow {
    RawRow {
        quantity: qty.into(),
        amount: amount.into(),
        order_date: order.into(),
        payment_date: pay.into(),
        status: status.into(),
        customer_name: name.into(),
    }
}

/// A quarter of orders with every status the source sheet contains.
fn quarter_rows() -> Vec<RawRow> {
    vec![
        row("2", "100,50", "05/01/2024", "10/01/2024", "PAGO", "Ana"),
        row("3", "50,00", "05/01/2024", "01/02/2024", "PENDENTE DE PAGAMENTO", "Bruno"),
        row("1", "250,00", "12/01/2024", "20/01/2024", "PENDENTE DE PAGAMENTO", "Carla"),
        row("4", "400,00", "03/02/2024", "03/02/2024", "PAGO", "Ana"),
        row("6", "1000,00", "14/02/2024", "01/03/2024", "PENDENTE DE PAGAMENTO", "Davi"),
        row("1", "30,00", "14/02/2024", "14/02/2024", "CANCELADO", "Eva"),
        row("5", "6000,00", "02/03/2024", "05/03/2024", "PENDENTE DE PAGAMENTO", "Bruno"),
        row("2", "200,00", "02/03/2024", "04/03/2024", "PAGO", "Carla"),
    ]
}

fn today() -> NaiveDate {
    date(2024, 3, 15)
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_two_order_scenario_from_raw_rows() {
    let records = parse_rows(&[
        row("2", "100,50", "05/01/2024", "10/01/2024", "PAGO", "Ana"),
        row("3", "50,00", "05/01/2024", "01/02/2024", "PENDENTE DE PAGAMENTO", "Bruno"),
    ])
    .unwrap();

    let summary = metrics::summarize(&records).unwrap();
    assert_eq!(summary.total_units, 5);
    assert_eq!(summary.paid_units, 2);
    assert_eq!(summary.paid_amount, dec!(100.50));
    assert_eq!(summary.pending_amount, dec!(50.00));
    assert_eq!(summary.active_days, 1);
    assert_eq!(summary.average_ticket, dec!(50.25));
}

#[test]
fn test_bad_row_aborts_the_run() {
    let mut rows = quarter_rows();
    rows[4].order_date = "14-02-2024".into();
    match parse_rows(&rows) {
        Err(SalesReportError::Validation { row, field, .. }) => {
            assert_eq!(row, 5);
            assert_eq!(field, "DATA_VENDA");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_extreme_values_are_rejected_before_aggregation() {
    let huge_amounts = [
        row("1", "79228162514264337593543950335", "05/01/2024", "05/01/2024", "PAGO", "Ana"),
        row("1", "79228162514264337593543950335", "06/01/2024", "06/01/2024", "PAGO", "Ana"),
    ];
    match parse_rows(&huge_amounts) {
        Err(SalesReportError::Validation { row, field, .. }) => {
            assert_eq!(row, 1);
            assert_eq!(field, "TOTAL DA COMPRA");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let huge_quantities = vec![
        row("9223372036854775807", "1,00", "05/01/2024", "05/01/2024", "PAGO", "Ana");
        3
    ];
    assert!(matches!(
        parse_rows(&huge_quantities),
        Err(SalesReportError::Validation { row: 1, .. })
    ));
}

#[test]
fn test_validation_error_message_names_row_and_field() {
    let err = parse_rows(&[row("1", "x", "01/01/2024", "01/01/2024", "PAGO", "Ana")]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("row 1"), "{message}");
    assert!(message.contains("TOTAL DA COMPRA"), "{message}");
}

// ===========================================================================
// Cross-component properties
// ===========================================================================

#[test]
fn test_units_reconcile_across_statuses_and_series() {
    let records = parse_rows(&quarter_rows()).unwrap();
    let summary = metrics::summarize(&records).unwrap();

    // CANCELADO contributes 1 unit to the total only
    assert_eq!(summary.total_units, 24);
    assert_eq!(summary.paid_units + summary.pending_units + 1, summary.total_units);

    let series = daily_sales(&records).unwrap();
    assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    let series_units: Units = series.iter().map(|d| d.units).sum();
    assert_eq!(series_units, summary.total_units);
}

#[test]
fn test_summary_cards() {
    let records = parse_rows(&quarter_rows()).unwrap();
    let cards = SummaryCards::from(&metrics::summarize(&records).unwrap());
    assert_eq!(cards.paid_amount, "R$ 700,50");
    assert_eq!(cards.pending_amount, "R$ 7.300,00");
    assert_eq!(cards.active_days, "5");
    assert_eq!(cards.units_per_day, "4.8");
}

#[test]
fn test_monthly_comparison_table() {
    let records = parse_rows(&quarter_rows()).unwrap();
    let rows = compare_months(&records).unwrap();

    let labels: Vec<String> = rows.iter().map(|r| r.month.to_string()).collect();
    assert_eq!(labels, vec!["2024-01", "2024-02", "2024-03"]);

    let units: Vec<Units> = rows.iter().map(|r| r.units_sold).collect();
    assert_eq!(units, vec![6, 11, 7]);

    let paid: Vec<Decimal> = rows.iter().map(|r| r.amount_paid).collect();
    assert_eq!(paid, vec![dec!(100.50), dec!(400), dec!(200)]);

    assert_eq!(rows[0].units_change, PercentChange::NoData);
    assert_eq!(rows[0].amount_change, PercentChange::NoData);
    assert_eq!(rows[1].units_change.to_string(), "+83.33%");
    assert_eq!(rows[2].amount_change.to_string(), "-50.00%");
}

#[test]
fn test_receivables_table() {
    let records = parse_rows(&quarter_rows()).unwrap();
    let rows = receivables_report(&records, today(), MAJOR_DEBTOR_THRESHOLD).unwrap();

    let customers: Vec<&str> = rows.iter().map(|r| r.customer.as_str()).collect();
    assert_eq!(customers, vec!["Bruno", "Davi", "Carla"]);

    // Bruno owes 50 due 01/02 and 6000 due 05/03; the earlier due date anchors
    assert_eq!(rows[0].total_due, dec!(6050));
    assert_eq!(rows[0].total_due_display, "R$ 6.050,00");
    assert_eq!(rows[0].earliest_due_date, date(2024, 2, 1));
    assert_eq!(rows[0].days_overdue, 43);
    assert!(rows[0].is_major_debtor);

    // 1000.00 must rank above 250.00
    assert_eq!(rows[1].total_due_display, "R$ 1.000,00");
    assert_eq!(rows[1].days_overdue, 14);
    assert!(!rows[1].is_major_debtor);
    assert_eq!(rows[2].total_due_display, "R$ 250,00");
    assert_eq!(rows[2].days_overdue, 55);
}

#[test]
fn test_future_due_date_is_not_overdue() {
    let records = parse_rows(&[row(
        "1",
        "10,00",
        "01/03/2024",
        "25/03/2024",
        "PENDENTE DE PAGAMENTO",
        "Ana",
    )])
    .unwrap();
    let rows = receivables_report(&records, today(), MAJOR_DEBTOR_THRESHOLD).unwrap();
    assert_eq!(rows[0].days_overdue, 0);
}

#[test]
fn test_full_report_envelope() {
    let records = parse_rows(&quarter_rows()).unwrap();
    let out = build_report(&records, &ReportConfig::default(), today()).unwrap();

    assert_eq!(out.result.daily_sales.len(), 5);
    assert_eq!(out.result.daily_payments.len(), 3);
    assert_eq!(out.result.monthly_comparison.len(), 3);
    assert_eq!(out.result.receivables.len(), 3);
    assert_eq!(out.warnings.len(), 1);

    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["cards"]["total_units"], "24");
    assert_eq!(json["result"]["monthly_comparison"][0]["units_change"], "-");
    assert_eq!(json["result"]["receivables"][0]["is_major_debtor"], true);
    assert_eq!(json["metadata"]["precision"], "rust_decimal_128bit");
}
