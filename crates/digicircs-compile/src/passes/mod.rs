//! Built-in decomposition passes.
//!
//! Every pass rebuilds the circuit instruction by instruction, replacing the
//! gates it knows how to expand and copying everything else unchanged.

mod controlled;
mod pauli;
mod phase;
mod verification;

pub use controlled::DecomposeControlled;
pub use pauli::ExpandPauliRotations;
pub use phase::DecomposePhases;
pub use verification::RejectCustomGates;

use digicircs_ir::{Circuit, Instruction, StandardGate};

use crate::error::CompileResult;

/// Rebuild `circuit`, splicing in the expansion of every instruction for
/// which `expand` returns `Some`.
pub(crate) fn rewrite(
    circuit: &mut Circuit,
    mut expand: impl FnMut(&Instruction) -> CompileResult<Option<Vec<Instruction>>>,
) -> CompileResult<()> {
    let mut out = Circuit::with_size(circuit.name(), circuit.num_qubits());
    for inst in circuit.instructions() {
        match expand(inst)? {
            Some(replacement) => {
                for r in replacement {
                    out.apply(r)?;
                }
            }
            None => {
                out.apply(inst.clone())?;
            }
        }
    }
    *circuit = out;
    Ok(())
}

/// The standard gate of a gate instruction, if any.
pub(crate) fn standard_gate(inst: &Instruction) -> Option<&StandardGate> {
    inst.as_gate()?.as_standard()
}
