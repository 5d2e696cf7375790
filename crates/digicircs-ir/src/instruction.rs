//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::{Gate, StandardGate};
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(Gate),
    /// Barrier (synchronization point).
    Barrier,
}

/// A complete instruction with operands.
///
/// For controlled gates the control qubits come first in `qubits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            InstructionKind::Barrier => None,
        }
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the name of this instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Barrier => "barrier",
        }
    }

    /// Number of qubits this instruction operates on.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// The control operands, empty for uncontrolled gates and barriers.
    pub fn controls(&self) -> &[QubitId] {
        let n = self.as_gate().map_or(0, Gate::num_controls);
        &self.qubits[..n.min(self.qubits.len())]
    }

    /// The operands the base operation acts on.
    pub fn targets(&self) -> &[QubitId] {
        let n = self.as_gate().map_or(0, Gate::num_controls);
        &self.qubits[n.min(self.qubits.len())..]
    }

    /// The rotation angle of single-parameter gates.
    pub fn parameter(&self) -> Option<&ParameterExpression> {
        match self.as_gate()?.as_standard()?.parameters().as_slice() {
            [p] => Some(*p),
            _ => None,
        }
    }
}
