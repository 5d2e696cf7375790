//! Expansion of exponentiated Pauli strings.

use std::f64::consts::FRAC_PI_2;

use digicircs_ir::{Circuit, Instruction, Pauli, ParameterExpression, QubitId, StandardGate};

use super::{rewrite, standard_gate};
use crate::error::CompileResult;
use crate::pass::Pass;

/// Expands `ExpPauli` gates whose string is not exactly two letters long.
///
/// Two-letter strings are left alone because the string grammar names them
/// directly (`XY=t=c=θ`). A single letter becomes the matching axis
/// rotation. Longer strings are rotated into the Z basis, the parity is
/// collected onto the last qubit with a CX ladder, and an Rz is applied
/// there before everything is undone.
pub struct ExpandPauliRotations;

impl Pass for ExpandPauliRotations {
    fn name(&self) -> &'static str {
        "ExpandPauliRotations"
    }

    fn run(&self, circuit: &mut Circuit) -> CompileResult<()> {
        rewrite(circuit, |inst| {
            Ok(match standard_gate(inst) {
                Some(StandardGate::ExpPauli(paulis, theta)) if paulis.len() != 2 => {
                    Some(expand(paulis.paulis(), theta, &inst.qubits))
                }
                _ => None,
            })
        })
    }

    fn should_run(&self, circuit: &Circuit) -> bool {
        circuit.instructions().iter().any(|inst| {
            matches!(standard_gate(inst), Some(StandardGate::ExpPauli(p, _)) if p.len() != 2)
        })
    }
}

fn expand(paulis: &[Pauli], theta: &ParameterExpression, qubits: &[QubitId]) -> Vec<Instruction> {
    if let ([pauli], [q]) = (paulis, qubits) {
        let gate = match pauli {
            Pauli::X => StandardGate::Rx(theta.clone()),
            Pauli::Y => StandardGate::Ry(theta.clone()),
            Pauli::Z => StandardGate::Rz(theta.clone()),
        };
        return vec![Instruction::single_qubit_gate(gate, *q)];
    }

    let Some(&last) = qubits.last() else {
        return vec![];
    };

    let mut out = Vec::with_capacity(4 * qubits.len() + 1);
    for (pauli, &q) in paulis.iter().zip(qubits) {
        out.extend(into_z_basis(*pauli, q));
    }
    for pair in qubits.windows(2) {
        out.push(Instruction::two_qubit_gate(StandardGate::CX, pair[0], pair[1]));
    }
    out.push(Instruction::single_qubit_gate(StandardGate::Rz(theta.clone()), last));
    for pair in qubits.windows(2).rev() {
        out.push(Instruction::two_qubit_gate(StandardGate::CX, pair[0], pair[1]));
    }
    for (pauli, &q) in paulis.iter().zip(qubits) {
        out.extend(from_z_basis(*pauli, q));
    }
    out
}

fn into_z_basis(pauli: Pauli, q: QubitId) -> Option<Instruction> {
    match pauli {
        Pauli::X => Some(Instruction::single_qubit_gate(StandardGate::H, q)),
        Pauli::Y => Some(Instruction::single_qubit_gate(
            StandardGate::Rx(FRAC_PI_2.into()),
            q,
        )),
        Pauli::Z => None,
    }
}

fn from_z_basis(pauli: Pauli, q: QubitId) -> Option<Instruction> {
    match pauli {
        Pauli::X => Some(Instruction::single_qubit_gate(StandardGate::H, q)),
        Pauli::Y => Some(Instruction::single_qubit_gate(
            StandardGate::Rx((-FRAC_PI_2).into()),
            q,
        )),
        Pauli::Z => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(circuit: &Circuit) -> Vec<&str> {
        circuit.instructions().iter().map(Instruction::name).collect()
    }

    #[test]
    fn test_single_letter_becomes_rotation() {
        let mut circuit = Circuit::with_size("test", 1);
        circuit
            .exp_pauli("Y".parse().unwrap(), 0.4, [QubitId(0)])
            .unwrap();
        ExpandPauliRotations.run(&mut circuit).unwrap();
        assert_eq!(names(&circuit), vec!["ry"]);
    }

    #[test]
    fn test_two_letters_are_kept() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit
            .exp_pauli("XY".parse().unwrap(), 0.4, [QubitId(0), QubitId(1)])
            .unwrap();
        assert!(!ExpandPauliRotations.should_run(&circuit));
    }

    #[test]
    fn test_three_letter_ladder() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit
            .exp_pauli(
                "XZY".parse().unwrap(),
                ParameterExpression::symbol("a"),
                [QubitId(0), QubitId(1), QubitId(2)],
            )
            .unwrap();
        ExpandPauliRotations.run(&mut circuit).unwrap();
        assert_eq!(
            names(&circuit),
            vec!["h", "rx", "cx", "cx", "rz", "cx", "cx", "h", "rx"]
        );
        let rz = &circuit.instructions()[4];
        assert_eq!(rz.qubits, vec![QubitId(2)]);
        assert_eq!(rz.parameter(), Some(&ParameterExpression::symbol("a")));
    }
}
