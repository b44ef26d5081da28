mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::report::{ReportArgs, SummaryArgs};
use commands::series::SeriesArgs;

/// Sales report aggregation
#[derive(Parser)]
#[command(
    name = "salesrep",
    version,
    about = "Sales report aggregation",
    long_about = "Aggregates a sales log into summary metrics, daily sales and payment \
                  series, a month-over-month comparison and an overdue receivables table. \
                  Reads the semicolon-separated ISO-8859-1 sheet by default."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log pipeline progress to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full report: summary, series, monthly comparison, receivables
    Report(ReportArgs),
    /// Summary metrics and formatted cards
    Summary(SummaryArgs),
    /// Units and value sold per order date
    DailySales(SeriesArgs),
    /// Value received per payment date
    DailyPayments(SeriesArgs),
    /// Month-over-month comparison of units sold and value paid
    Monthly(SeriesArgs),
    /// Pending balances per customer with overdue days
    Receivables(ReportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Report(args) => commands::report::run_report(args),
        Commands::Summary(args) => commands::report::run_summary(args),
        Commands::DailySales(args) => commands::series::run_daily_sales(args),
        Commands::DailyPayments(args) => commands::series::run_daily_payments(args),
        Commands::Monthly(args) => commands::series::run_monthly(args),
        Commands::Receivables(args) => commands::receivables::run_receivables(args),
        Commands::Version => {
            println!("salesrep {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
