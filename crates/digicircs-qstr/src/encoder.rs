//! Circuit to circuit string.
//!
//! Every gate goes through a fixed list of recognizers, tried in order:
//!
//! 1. **direct**: one target, at most one control, at most one angle, with a
//!    name the vocabulary and decoder both know (`CX` becomes `CNOT`, `CRz`
//!    becomes `CRZ`).
//! 2. **pauli**: two-letter exponentiated Pauli products, named by their
//!    letters and written on `(first operand, second operand)`.
//!
//! If any gate is left unrecognized, the circuit is lowered once with the
//! configured decomposition passes and encoded again.

use tracing::warn;

use digicircs_compile::PassManager;
use digicircs_ir::{Circuit, Instruction, ParameterExpression, QubitId, StandardGate};

use crate::config::GrammarConfig;
use crate::decoder::GateKind;
use crate::error::{QStrError, QStrResult};
use crate::token::{CircuitString, GateToken};

/// A recognizer returns `Ok(None)` when the gate does not have its shape.
type Recognizer = fn(&StandardGate, &[QubitId], &GrammarConfig) -> QStrResult<Option<GateToken>>;

const RECOGNIZERS: [Recognizer; 2] = [recognize_direct, recognize_pauli];

/// Encode a circuit as a circuit string.
///
/// Barriers are skipped. Parameters with more than one free variable cannot be
/// written in the grammar and fail the whole encode.
pub fn encode(circuit: &Circuit, config: &GrammarConfig) -> QStrResult<CircuitString> {
    match encode_pass(circuit, config) {
        Err(QStrError::UnsupportedCircuit(reason)) => {
            warn!(
                "Circuit '{}' needs decomposition before encoding: {reason}",
                circuit.name()
            );
            let mut lowered = circuit.clone();
            PassManager::decomposition(&config.decomposition)
                .run(&mut lowered)
                .map_err(|e| QStrError::UnsupportedCircuit(e.to_string()))?;
            encode_pass(&lowered, config)
        }
        other => other,
    }
}

fn encode_pass(circuit: &Circuit, config: &GrammarConfig) -> QStrResult<CircuitString> {
    circuit
        .gates()
        .map(|inst| {
            encode_instruction(inst, config)?.ok_or_else(|| {
                QStrError::UnsupportedCircuit(format!(
                    "no circuit-string form for gate '{}' on {:?}",
                    inst.name(),
                    inst.qubits
                ))
            })
        })
        .collect()
}

/// Encode a single instruction, or `None` when no recognizer applies.
pub fn encode_instruction(inst: &Instruction, config: &GrammarConfig) -> QStrResult<Option<GateToken>> {
    let Some(gate) = inst.as_gate().and_then(|g| g.as_standard()) else {
        return Ok(None);
    };
    for recognize in RECOGNIZERS {
        if let Some(token) = recognize(gate, &inst.qubits, config)? {
            return Ok(Some(token));
        }
    }
    Ok(None)
}

fn recognize_direct(
    gate: &StandardGate,
    qubits: &[QubitId],
    config: &GrammarConfig,
) -> QStrResult<Option<GateToken>> {
    let (control, target) = match (gate.num_controls(), qubits) {
        (0, &[t]) => (None, t),
        (1, &[c, t]) => (Some(c), t),
        _ => return Ok(None),
    };
    let param = match gate.parameters()[..] {
        [] => None,
        [p] => Some(param_text(p)?),
        _ => return Ok(None),
    };

    let mut name = gate.base_name().to_uppercase();
    if control.is_some() && config.vocabulary.is_one_qubit(&name) {
        match config.casting.upcast(&name) {
            Some(up) => name = up.to_string(),
            None => return Ok(None),
        }
    }
    if config.vocabulary.class_of(&name).is_none() || GateKind::from_name(&name).is_none() {
        return Ok(None);
    }

    Ok(Some(GateToken {
        name,
        target: Some(target.index()),
        control: control.map(QubitId::index),
        param,
    }))
}

fn recognize_pauli(
    gate: &StandardGate,
    qubits: &[QubitId],
    config: &GrammarConfig,
) -> QStrResult<Option<GateToken>> {
    let Some(paulis) = gate.pauli_string() else {
        return Ok(None);
    };
    let (&[first, second], &[target, control]) = (paulis.paulis(), qubits) else {
        return Ok(None);
    };
    let name = format!("{}{}", first.as_char(), second.as_char());
    if config.vocabulary.class_of(&name).is_none() {
        return Ok(None);
    }
    let param = match gate.parameters()[..] {
        [p] => Some(param_text(p)?),
        _ => return Ok(None),
    };

    Ok(Some(GateToken {
        name,
        target: Some(target.index()),
        control: Some(control.index()),
        param,
    }))
}

/// Text of a gate angle: the number, or the single free variable.
fn param_text(param: &ParameterExpression) -> QStrResult<String> {
    if let ParameterExpression::Constant(v) = param {
        return Ok(v.to_string());
    }
    let symbols = param.free_symbols();
    match symbols.len() {
        0 => param.as_f64().map(|v| v.to_string()).ok_or_else(|| {
            QStrError::UnsupportedCircuit(format!("parameter '{param}' does not evaluate"))
        }),
        1 => Ok(symbols.into_iter().map(str::to_string).collect()),
        n => Err(QStrError::UnsupportedCircuit(format!(
            "parameter '{param}' has {n} free variables, at most one is supported"
        ))),
    }
}
