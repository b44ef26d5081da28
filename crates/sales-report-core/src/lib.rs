pub mod error;
pub mod format;
pub mod metrics;
pub mod monthly;
pub mod receivables;
pub mod record;
pub mod report;
pub mod timeseries;
pub mod types;

pub use error::SalesReportError;
pub use types::*;

/// Standard result type for all sales-report operations
pub type SalesReportResult<T> = Result<T, SalesReportError>;
