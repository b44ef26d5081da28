use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalesReportError {
    #[error("Invalid row {row}: {field} = '{value}' — {reason}")]
    Validation {
        row: usize,
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },
}
