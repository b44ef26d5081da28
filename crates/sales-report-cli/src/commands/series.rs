use clap::Args;
use serde_json::Value;

use sales_report_core::monthly;
use sales_report_core::timeseries;

use super::source::{load_records, InputArgs};

/// Arguments for the daily and monthly series
#[derive(Args)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run_daily_sales(args: SeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;
    Ok(serde_json::to_value(timeseries::daily_sales(&records)?)?)
}

pub fn run_daily_payments(args: SeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;
    Ok(serde_json::to_value(timeseries::daily_payments(&records)?)?)
}

pub fn run_monthly(args: SeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = load_records(&args.input)?;
    Ok(serde_json::to_value(monthly::compare_months(&records)?)?)
}
