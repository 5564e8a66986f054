use thiserror::Error;

use coinwatch_store::StoreError;

/// Validation errors for request input and stored values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains non-printable character at index {index}")]
    SymbolInvalidChar { index: usize },

    #[error("invalid date '{value}', expected yyyy-MM-dd")]
    InvalidDate { value: String },
    #[error("invalid timestamp '{value}', expected yyyy-MM-dd HH:mm:ss")]
    InvalidTimestamp { value: String },
}

/// Errors surfaced by the ticker query service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("query range spans {days} days, exceeding the {max}-day maximum")]
    InvalidRange { days: i64, max: i64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}
