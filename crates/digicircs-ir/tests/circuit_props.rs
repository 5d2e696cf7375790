//! Property-based tests for the circuit builder.

use digicircs_ir::{Circuit, IrError, ParameterExpression, QubitId};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    Rx(u32, f64),
    Cx(u32, u32),
    Crz(u32, u32, f64),
}

impl GateOp {
    fn apply(&self, circuit: &mut Circuit) {
        match *self {
            GateOp::H(q) => {
                circuit.h(QubitId(q)).unwrap();
            }
            GateOp::Rx(q, theta) => {
                circuit.rx(theta, QubitId(q)).unwrap();
            }
            GateOp::Cx(c, t) => {
                circuit.cx(QubitId(c), QubitId(t)).unwrap();
            }
            GateOp::Crz(c, t, theta) => {
                circuit.crz(theta, QubitId(c), QubitId(t)).unwrap();
            }
        }
    }
}

/// Angles on a grid of eighths, exact in both binary and decimal.
fn arb_angle() -> impl Strategy<Value = f64> {
    (-24_i32..=24).prop_map(|k| f64::from(k) / 8.0)
}

fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    let pair = (0..num_qubits, 1..num_qubits).prop_map(move |(a, shift)| (a, (a + shift) % num_qubits));
    prop_oneof![
        (0..num_qubits).prop_map(GateOp::H),
        (0..num_qubits, arb_angle()).prop_map(|(q, t)| GateOp::Rx(q, t)),
        pair.clone().prop_map(|(c, t)| GateOp::Cx(c, t)),
        (pair, arb_angle()).prop_map(|((c, t), theta)| GateOp::Crz(c, t, theta)),
    ]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (2_u32..=5).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_gate_op(num_qubits), 0..=12).prop_map(move |ops| {
            let mut circuit = Circuit::with_size("prop", num_qubits);
            for op in &ops {
                op.apply(&mut circuit);
            }
            circuit
        })
    })
}

proptest! {
    #[test]
    fn depth_never_exceeds_gate_count(circuit in arb_circuit()) {
        prop_assert!(circuit.depth() <= circuit.len());
        prop_assert_eq!(circuit.depth() == 0, circuit.is_empty());
    }

    #[test]
    fn json_round_trip_preserves_circuit(circuit in arb_circuit()) {
        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, circuit);
    }

    #[test]
    fn binding_removes_the_free_symbol(value in -10.0..10.0_f64) {
        let expr = ParameterExpression::symbol("theta") * ParameterExpression::constant(2.0);
        prop_assert_eq!(expr.free_symbols().into_iter().collect::<Vec<_>>(), vec!["theta"]);
        let bound = expr.bind("theta", value);
        prop_assert!(bound.free_symbols().is_empty());
        prop_assert!((bound.as_f64().unwrap() - 2.0 * value).abs() < 1e-12);
    }
}

#[test]
fn test_out_of_range_qubit_is_rejected() {
    let mut circuit = Circuit::with_size("small", 2);
    let err = circuit.h(QubitId(2)).unwrap_err();
    assert!(matches!(err, IrError::QubitNotFound { .. }));
    assert!(circuit.is_empty());
}
