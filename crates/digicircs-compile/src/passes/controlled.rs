//! Decomposition of controlled gates into CX and single-qubit rotations.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use digicircs_ir::{Circuit, Instruction, ParameterExpression, QubitId, StandardGate};

use super::{rewrite, standard_gate};
use crate::error::CompileResult;
use crate::pass::Pass;

/// Expands CY, CZ, CH, CP, SWAP and Toffoli gates.
///
/// CX and the controlled rotations are kept, everything else is rewritten
/// into CX plus H and axis rotations. Results are exact up to global phase.
pub struct DecomposeControlled;

impl Pass for DecomposeControlled {
    fn name(&self) -> &'static str {
        "DecomposeControlled"
    }

    fn run(&self, circuit: &mut Circuit) -> CompileResult<()> {
        rewrite(circuit, |inst| {
            Ok(standard_gate(inst).and_then(|gate| decompose(gate, &inst.qubits)))
        })
    }

    fn should_run(&self, circuit: &Circuit) -> bool {
        circuit
            .instructions()
            .iter()
            .any(|inst| standard_gate(inst).is_some_and(is_expandable))
    }
}

fn is_expandable(gate: &StandardGate) -> bool {
    matches!(
        gate,
        StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::CP(_)
            | StandardGate::Swap
            | StandardGate::CCX
    )
}

fn h(q: QubitId) -> Instruction {
    Instruction::single_qubit_gate(StandardGate::H, q)
}

fn rz(theta: impl Into<ParameterExpression>, q: QubitId) -> Instruction {
    Instruction::single_qubit_gate(StandardGate::Rz(theta.into()), q)
}

fn cx(c: QubitId, t: QubitId) -> Instruction {
    Instruction::two_qubit_gate(StandardGate::CX, c, t)
}

fn decompose(gate: &StandardGate, qubits: &[QubitId]) -> Option<Vec<Instruction>> {
    match (gate, qubits) {
        (StandardGate::CY, &[c, t]) => Some(vec![rz(-FRAC_PI_2, t), cx(c, t), rz(FRAC_PI_2, t)]),
        (StandardGate::CZ, &[c, t]) => Some(vec![h(t), cx(c, t), h(t)]),
        (StandardGate::CH, &[c, t]) => Some(vec![
            rz(FRAC_PI_2, t),
            h(t),
            rz(FRAC_PI_4, t),
            cx(c, t),
            rz(-FRAC_PI_4, t),
            h(t),
            rz(-FRAC_PI_2, t),
        ]),
        (StandardGate::CP(theta), &[c, t]) => {
            let half = theta.clone() / ParameterExpression::constant(2.0);
            Some(vec![
                rz(half.clone(), c),
                cx(c, t),
                rz(-half.clone(), t),
                cx(c, t),
                rz(half, t),
            ])
        }
        (StandardGate::Swap, &[a, b]) => Some(vec![cx(a, b), cx(b, a), cx(a, b)]),
        (StandardGate::CCX, &[c1, c2, t]) => Some(vec![
            h(t),
            cx(c2, t),
            rz(-FRAC_PI_4, t),
            cx(c1, t),
            rz(FRAC_PI_4, t),
            cx(c2, t),
            rz(-FRAC_PI_4, t),
            cx(c1, t),
            rz(FRAC_PI_4, c2),
            rz(FRAC_PI_4, t),
            h(t),
            cx(c1, c2),
            rz(FRAC_PI_4, c1),
            rz(-FRAC_PI_4, c2),
            cx(c1, c2),
        ]),
        _ => None,
    }
}
