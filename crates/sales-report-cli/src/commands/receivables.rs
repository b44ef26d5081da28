use serde_json::Value;

use sales_report_core::receivables;

use super::report::ReportArgs;
use super::source::load_records;

pub fn run_receivables(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;
    let (config, today) = args.policy.resolve()?;
    let rows = receivables::receivables_report(&records, today, config.major_debtor_threshold)?;
    Ok(serde_json::to_value(rows)?)
}
