//! Error types for the circuit-string grammar.

use thiserror::Error;

/// Errors that can occur while normalizing, decoding or encoding circuit strings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QStrError {
    /// Gate name outside the configured vocabulary.
    #[error("Unknown gate name '{name}' in token '{token}'")]
    UnknownGate { name: String, token: String },

    /// A real qubit index was required but the target was `nop`.
    #[error("No target given in token '{0}'")]
    MissingTarget(String),

    /// Qubit index leaves no room for a register that contains it.
    #[error("Qubit index {0} is out of range")]
    QubitOutOfRange(u32),

    /// Token cannot be mapped to any supported gate shape.
    #[error("Cannot build a gate from token '{token}': {reason}")]
    BadGateSpec { token: String, reason: String },

    /// Circuit cannot be written as a circuit string, even after decomposition.
    #[error("Circuit cannot be encoded: {0}")]
    UnsupportedCircuit(String),

    /// Token does not have the `name=target=control=param` shape.
    #[error("Malformed token '{token}': {reason}")]
    MalformedToken { token: String, reason: String },

    /// Two-qubit gate name without a one-qubit counterpart.
    #[error("Cannot cast two-qubit gate '{0}' to a one-qubit gate")]
    InvalidCast(String),

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    Ir(#[from] digicircs_ir::IrError),
}

/// Result type for circuit-string operations.
pub type QStrResult<T> = Result<T, QStrError>;
