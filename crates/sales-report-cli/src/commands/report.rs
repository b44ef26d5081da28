use clap::Args;
use serde_json::Value;

use sales_report_core::metrics::{self, SummaryCards};
use sales_report_core::report;

use super::source::{load_records, InputArgs, PolicyArgs};

/// Arguments for the full sales report
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Arguments for the summary cards
#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;
    let (config, today) = args.policy.resolve()?;
    let result = report::build_report(&records, &config, today)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;
    let summary = metrics::summarize(&records)?;
    let cards = SummaryCards::from(&summary);
    Ok(serde_json::json!({
        "summary": summary,
        "cards": cards,
    }))
}
