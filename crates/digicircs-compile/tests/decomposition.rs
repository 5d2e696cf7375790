//! End-to-end checks of the decomposition pipeline.

use digicircs_compile::{CompileError, DecompositionOptions, PassManager};
use digicircs_ir::{Circuit, CustomGate, ParameterExpression, QubitId, StandardGate};
use proptest::prelude::*;

/// Gates every lowered circuit may contain.
const LOWERED: &[&str] = &[
    "h", "x", "y", "z", "rx", "ry", "rz", "cx", "crx", "cry", "crz", "rxx", "ryy", "rzz",
];

fn lower(circuit: &mut Circuit) {
    PassManager::decomposition(&DecompositionOptions::default())
        .run(circuit)
        .unwrap();
}

#[test]
fn test_mixed_circuit_is_lowered() {
    let mut circuit = Circuit::with_size("mixed", 4);
    circuit
        .h(QubitId(0))
        .unwrap()
        .cy(QubitId(0), QubitId(1))
        .unwrap()
        .swap(QubitId(1), QubitId(2))
        .unwrap()
        .exp_pauli(
            "ZZZZ".parse().unwrap(),
            0.7,
            [QubitId(0), QubitId(1), QubitId(2), QubitId(3)],
        )
        .unwrap()
        .gate(StandardGate::Sdg, [QubitId(3)])
        .unwrap();

    lower(&mut circuit);

    for inst in circuit.instructions() {
        assert!(LOWERED.contains(&inst.name()), "unexpected {}", inst.name());
    }
    assert_eq!(circuit.num_qubits(), 4);
}

#[test]
fn test_disabled_family_is_kept() {
    let mut circuit = Circuit::with_size("keep", 2);
    circuit.cz(QubitId(0), QubitId(1)).unwrap();

    let pm = PassManager::decomposition(&DecompositionOptions {
        controlled: false,
        ..DecompositionOptions::default()
    });
    pm.run(&mut circuit).unwrap();

    assert_eq!(circuit.len(), 1);
    assert_eq!(circuit.instructions()[0].name(), "cz");
}

#[test]
fn test_custom_gate_fails() {
    let mut circuit = Circuit::with_size("custom", 2);
    circuit
        .gate(
            CustomGate::new("fsim", 2).with_params(vec![ParameterExpression::symbol("a")]),
            [QubitId(0), QubitId(1)],
        )
        .unwrap();

    let pm = PassManager::decomposition(&DecompositionOptions::default());
    assert!(matches!(pm.run(&mut circuit), Err(CompileError::UnsupportedGate(_))));
}

fn arb_gate() -> impl Strategy<Value = StandardGate> {
    prop_oneof![
        Just(StandardGate::CY),
        Just(StandardGate::CZ),
        Just(StandardGate::CH),
        Just(StandardGate::Swap),
        (-3.0..3.0_f64).prop_map(|t| StandardGate::CP(t.into())),
        Just(StandardGate::Sdg),
        Just(StandardGate::Tdg),
        Just(StandardGate::SX),
        (-3.0..3.0_f64).prop_map(|t| StandardGate::P(t.into())),
    ]
}

proptest! {
    #[test]
    fn lowering_is_idempotent(gates in prop::collection::vec(arb_gate(), 1..12)) {
        let mut circuit = Circuit::with_size("random", 2);
        for gate in gates {
            let qubits = if gate.num_qubits() == 2 {
                vec![QubitId(0), QubitId(1)]
            } else {
                vec![QubitId(1)]
            };
            circuit.gate(gate, qubits).unwrap();
        }

        lower(&mut circuit);
        let once = circuit.clone();
        lower(&mut circuit);

        prop_assert_eq!(once, circuit);
    }
}
