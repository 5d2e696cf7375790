//! Error types for circuit generation.

use thiserror::Error;

/// Errors that can occur while generating topologies and circuit strings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenError {
    /// Unknown parameter allocation order.
    #[error("Invalid strategy '{0}'. Choices are: early, random, late")]
    InvalidStrategy(String),

    /// A gate had to be drawn from an empty pool.
    #[error("No {0} gates to choose from")]
    EmptyGatePool(&'static str),

    /// Two-qubit gates need at least two qubits.
    #[error("Need at least {needed} qubits, got {found}")]
    NotEnoughQubits { needed: u32, found: u32 },

    /// Weights that are negative, not finite, or sum to zero.
    #[error("Invalid weights {0:?}")]
    InvalidWeights(Vec<f64>),

    /// Empty range for the number of gates.
    #[error("Invalid gate count range [{min}, {max})")]
    InvalidRange { min: usize, max: usize },

    /// Fewer precomputed parameters than parameterized gates.
    #[error("Need {needed} parameters, got {given}")]
    MissingParams { needed: usize, given: usize },

    /// Grammar error on a generated string.
    #[error("Grammar error: {0}")]
    Grammar(#[from] digicircs_qstr::QStrError),
}

/// Result type for generation.
pub type GenResult<T> = Result<T, GenError>;

/// Check that `weights` are finite, non-negative and not all zero.
pub(crate) fn check_weights(weights: &[f64]) -> GenResult<f64> {
    let total: f64 = weights.iter().sum();
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || total <= 0.0 {
        return Err(GenError::InvalidWeights(weights.to_vec()));
    }
    Ok(total)
}
