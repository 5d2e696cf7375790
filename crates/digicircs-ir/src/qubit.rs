//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::IrError;

/// Index of a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The raw index.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }

    /// Absolute distance between two qubit indices.
    #[inline]
    pub fn distance(self, other: QubitId) -> u32 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl TryFrom<usize> for QubitId {
    type Error = IrError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        u32::try_from(id)
            .map(QubitId)
            .map_err(|_| IrError::QubitOverflow(id))
    }
}
