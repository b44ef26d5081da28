pub mod receivables;
pub mod report;
pub mod series;
pub mod source;
