//! Size metrics for circuit strings and circuits.

use rustc_hash::FxHashSet;

use digicircs_compile::{DecompositionOptions, PassManager};
use digicircs_ir::{Circuit, StandardGate};

use crate::config::GrammarConfig;
use crate::error::{QStrError, QStrResult};
use crate::token::CircuitString;

/// Number of gate tokens, no-ops excluded.
pub fn count_gates(circuit: &CircuitString) -> usize {
    circuit.iter().filter(|t| !t.is_nop()).count()
}

/// Number of tokens whose name is a parameterized gate, ignoring case.
pub fn count_parameterized(circuit: &CircuitString, config: &GrammarConfig) -> usize {
    circuit
        .iter()
        .filter(|t| config.vocabulary.is_parameterized_ignore_case(&t.name))
        .count()
}

/// Number of moments when gates are packed greedily in string order.
///
/// A new moment starts whenever a gate touches a qubit already used in the
/// current one. Controls of one-qubit gates are ignored. An empty string has
/// no moments.
pub fn count_moments(circuit: &CircuitString, config: &GrammarConfig) -> QStrResult<usize> {
    let mut moments = 0;
    let mut used = FxHashSet::default();

    for token in circuit.iter().filter(|t| !t.is_nop()) {
        let target = token
            .target
            .ok_or_else(|| QStrError::MissingTarget(token.to_string()))?;
        let control = token
            .control
            .filter(|_| !config.vocabulary.is_one_qubit(&token.name));

        let clash = used.contains(&target) || control.is_some_and(|c| used.contains(&c));
        if moments == 0 || clash {
            moments += 1;
            used.clear();
        }
        used.insert(target);
        used.extend(control);
    }

    Ok(moments)
}

/// Number of CNOTs after lowering the circuit with `options`.
pub fn count_cnots(circuit: &Circuit, options: &DecompositionOptions) -> QStrResult<usize> {
    let mut lowered = circuit.clone();
    PassManager::decomposition(options)
        .run(&mut lowered)
        .map_err(|e| QStrError::UnsupportedCircuit(e.to_string()))?;

    Ok(lowered
        .gates()
        .filter(|inst| {
            matches!(
                inst.as_gate().and_then(|g| g.as_standard()),
                Some(StandardGate::CX)
            )
        })
        .count())
}
