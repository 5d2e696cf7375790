//! Verification passes.

use digicircs_ir::{Circuit, Gate};

use crate::error::{CompileError, CompileResult};
use crate::pass::Pass;

/// Fails on the first custom gate left in the circuit.
pub struct RejectCustomGates;

impl Pass for RejectCustomGates {
    fn name(&self) -> &'static str {
        "RejectCustomGates"
    }

    fn run(&self, circuit: &mut Circuit) -> CompileResult<()> {
        let custom = circuit.instructions().iter().find_map(|inst| match inst.as_gate() {
            Some(Gate::Custom(g)) => Some(g),
            _ => None,
        });
        match custom {
            Some(g) => Err(CompileError::UnsupportedGate(g.name.clone())),
            None => Ok(()),
        }
    }
}
