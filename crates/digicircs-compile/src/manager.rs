//! Pass manager for orchestrating decomposition.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use digicircs_ir::Circuit;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{DecomposeControlled, DecomposePhases, ExpandPauliRotations, RejectCustomGates};

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Build the decomposition pipeline selected by `options`.
    ///
    /// Custom gates are always rejected at the end, since nothing downstream
    /// can carry them.
    pub fn decomposition(options: &DecompositionOptions) -> Self {
        let mut pm = Self::new();
        if options.exponential_pauli {
            pm.add_pass(ExpandPauliRotations);
        }
        if options.controlled {
            pm.add_pass(DecomposeControlled);
        }
        if options.phase {
            pm.add_pass(DecomposePhases);
        }
        pm.add_pass(RejectCustomGates);
        pm
    }

    /// Run all passes on the given circuit.
    #[instrument(skip(self, circuit))]
    pub fn run(&self, circuit: &mut Circuit) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            circuit.num_qubits()
        );

        for pass in &self.passes {
            if pass.should_run(circuit) {
                debug!("Running pass: {}", pass.name());
                pass.run(circuit)?;
                debug!("Pass {} completed, ops: {}", pass.name(), circuit.len());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}",
            circuit.depth(),
            circuit.len()
        );

        Ok(())
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Which families of gates the decomposition pipeline expands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionOptions {
    /// Expand exponentiated Pauli strings that are not two letters long.
    pub exponential_pauli: bool,
    /// Expand controlled gates other than CX and controlled rotations.
    pub controlled: bool,
    /// Expand phase-type and generalized single-qubit gates.
    pub phase: bool,
}

impl Default for DecompositionOptions {
    fn default() -> Self {
        Self {
            exponential_pauli: true,
            controlled: true,
            phase: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digicircs_ir::QubitId;

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn test_pass_manager_run() {
        let pm = PassManager::new();

        let mut circuit = Circuit::with_size("test", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        pm.run(&mut circuit).unwrap();
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn test_decomposition_respects_options() {
        let all = PassManager::decomposition(&DecompositionOptions::default());
        assert_eq!(all.len(), 4);

        let none = PassManager::decomposition(&DecompositionOptions {
            exponential_pauli: false,
            controlled: false,
            phase: false,
        });
        assert_eq!(none.len(), 1);
    }
}
