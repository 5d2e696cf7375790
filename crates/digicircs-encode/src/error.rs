//! Error types for the tensor codecs.

use thiserror::Error;

use digicircs_qstr::QStrError;

/// Errors that can occur while building symbol tables or encoding tensors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// Symbol missing from the table of its field.
    #[error("Unknown {field} symbol '{symbol}'")]
    UnknownSymbol { field: &'static str, symbol: String },

    /// Circuit longer than the padded length.
    #[error("Circuit has {found} gates, more than the maximum of {max}")]
    TooManyGates { found: usize, max: usize },

    /// Tensor width or rank does not match the symbol tables.
    #[error("Shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },

    /// Persisted tables are not a bijection.
    #[error("Corrupt symbol dictionary: {0}")]
    CorruptDictionary(String),

    /// Circuit-string error.
    #[error("Grammar error: {0}")]
    Grammar(#[from] QStrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;
