//! Error types for the compilation crate.

use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] digicircs_ir::IrError),

    /// No decomposition is known for this gate.
    #[error("Gate '{0}' cannot be decomposed")]
    UnsupportedGate(String),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
