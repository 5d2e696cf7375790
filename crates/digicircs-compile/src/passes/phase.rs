//! Decomposition of phase-type and generalized single-qubit gates.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use digicircs_ir::{Circuit, Instruction, ParameterExpression, StandardGate};

use super::{rewrite, standard_gate};
use crate::error::CompileResult;
use crate::pass::Pass;

/// Rewrites S, T, their adjoints, √X, P and U as axis rotations and drops
/// identities.
pub struct DecomposePhases;

impl Pass for DecomposePhases {
    fn name(&self) -> &'static str {
        "DecomposePhases"
    }

    fn run(&self, circuit: &mut Circuit) -> CompileResult<()> {
        rewrite(circuit, |inst| {
            let Some(gate) = standard_gate(inst) else {
                return Ok(None);
            };
            let [q] = inst.qubits[..] else {
                return Ok(None);
            };
            let single = |g: StandardGate| Instruction::single_qubit_gate(g, q);
            let angle = ParameterExpression::constant;

            Ok(match gate {
                StandardGate::I => Some(vec![]),
                StandardGate::S => Some(vec![single(StandardGate::Rz(angle(FRAC_PI_2)))]),
                StandardGate::T => Some(vec![single(StandardGate::Rz(angle(FRAC_PI_4)))]),
                StandardGate::Sdg => Some(vec![single(StandardGate::Rz(angle(-FRAC_PI_2)))]),
                StandardGate::Tdg => Some(vec![single(StandardGate::Rz(angle(-FRAC_PI_4)))]),
                StandardGate::SX => Some(vec![single(StandardGate::Rx(angle(FRAC_PI_2)))]),
                StandardGate::P(theta) => Some(vec![single(StandardGate::Rz(theta.clone()))]),
                StandardGate::U(theta, phi, lambda) => Some(vec![
                    single(StandardGate::Rz(lambda.clone())),
                    single(StandardGate::Ry(theta.clone())),
                    single(StandardGate::Rz(phi.clone())),
                ]),
                _ => None,
            })
        })
    }

    fn should_run(&self, circuit: &Circuit) -> bool {
        circuit.instructions().iter().any(|inst| {
            matches!(
                standard_gate(inst),
                Some(
                    StandardGate::I
                        | StandardGate::S
                        | StandardGate::T
                        | StandardGate::Sdg
                        | StandardGate::Tdg
                        | StandardGate::SX
                        | StandardGate::P(_)
                        | StandardGate::U(_, _, _)
                )
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digicircs_ir::QubitId;

    #[test]
    fn test_u_becomes_zyz() {
        let mut circuit = Circuit::with_size("test", 1);
        circuit
            .gate(
                StandardGate::U(0.1.into(), 0.2.into(), 0.3.into()),
                [QubitId(0)],
            )
            .unwrap();
        DecomposePhases.run(&mut circuit).unwrap();

        let params: Vec<f64> = circuit
            .instructions()
            .iter()
            .map(|i| i.parameter().unwrap().as_f64().unwrap())
            .collect();
        assert_eq!(params, vec![0.3, 0.1, 0.2]);
        assert_eq!(circuit.instructions()[1].name(), "ry");
    }

    #[test]
    fn test_identity_is_dropped() {
        let mut circuit = Circuit::with_size("test", 1);
        circuit
            .gate(StandardGate::I, [QubitId(0)])
            .unwrap()
            .gate(StandardGate::Tdg, [QubitId(0)])
            .unwrap();
        DecomposePhases.run(&mut circuit).unwrap();
        assert_eq!(circuit.len(), 1);
        assert_eq!(circuit.instructions()[0].name(), "rz");
    }
}
