//! Circuit string to circuit.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use tracing::warn;

use digicircs_ir::{Circuit, ParameterExpression, PauliString, QubitId, StandardGate};

use crate::config::{GrammarConfig, pauli_pair};
use crate::error::{QStrError, QStrResult};
use crate::normalize::{NormalizeOptions, normalize_token};
use crate::random::RandomSource;
use crate::token::{CircuitString, GateToken};

/// Gate names the decoder can build directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    X,
    Y,
    Z,
    H,
    S,
    T,
    Rx,
    Ry,
    Rz,
    Cnot,
    Cx,
    Cy,
    Cz,
    CRx,
    CRy,
    CRz,
}

impl GateKind {
    /// Look up an upper-case gate name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "X" => GateKind::X,
            "Y" => GateKind::Y,
            "Z" => GateKind::Z,
            "H" => GateKind::H,
            "S" => GateKind::S,
            "T" => GateKind::T,
            "RX" => GateKind::Rx,
            "RY" => GateKind::Ry,
            "RZ" => GateKind::Rz,
            "CNOT" => GateKind::Cnot,
            "CX" => GateKind::Cx,
            "CY" => GateKind::Cy,
            "CZ" => GateKind::Cz,
            "CRX" => GateKind::CRx,
            "CRY" => GateKind::CRy,
            "CRZ" => GateKind::CRz,
            _ => return None,
        })
    }

    /// Build the gate and its operand list (controls first).
    ///
    /// Returns `None` when the operands do not fit this kind, e.g. a rotation
    /// without an angle or a CNOT without a control.
    fn instantiate(
        self,
        target: QubitId,
        control: Option<QubitId>,
        param: Option<ParameterExpression>,
    ) -> Option<(StandardGate, Vec<QubitId>)> {
        use GateKind as K;

        let gate = match (self, control, param) {
            (K::X, None, None) => StandardGate::X,
            (K::Y, None, None) => StandardGate::Y,
            (K::Z, None, None) => StandardGate::Z,
            (K::H, None, None) => StandardGate::H,
            (K::S, None, None) => StandardGate::S,
            (K::T, None, None) => StandardGate::T,
            (K::X | K::Cnot | K::Cx, Some(_), None) => StandardGate::CX,
            (K::Y | K::Cy, Some(_), None) => StandardGate::CY,
            (K::Z | K::Cz, Some(_), None) => StandardGate::CZ,
            (K::H, Some(_), None) => StandardGate::CH,
            (K::S, Some(_), None) => StandardGate::CP(FRAC_PI_2.into()),
            (K::T, Some(_), None) => StandardGate::CP(FRAC_PI_4.into()),
            (K::Rx, None, Some(p)) => StandardGate::Rx(p),
            (K::Ry, None, Some(p)) => StandardGate::Ry(p),
            (K::Rz, None, Some(p)) => StandardGate::Rz(p),
            (K::Rx | K::CRx, Some(_), Some(p)) => StandardGate::CRx(p),
            (K::Ry | K::CRy, Some(_), Some(p)) => StandardGate::CRy(p),
            (K::Rz | K::CRz, Some(_), Some(p)) => StandardGate::CRz(p),
            _ => return None,
        };

        let qubits = control.into_iter().chain([target]).collect();
        Some((gate, qubits))
    }
}

/// Decode a circuit string into a circuit.
///
/// Each token is upper-cased and normalized first. No-op tokens are skipped
/// with a warning. The register size is one past the largest qubit index.
pub fn decode(
    circuit: &CircuitString,
    options: NormalizeOptions,
    config: &GrammarConfig,
    rng: &mut RandomSource,
) -> QStrResult<Circuit> {
    let mut gates = Vec::with_capacity(circuit.len());
    for token in circuit {
        if token.is_nop() {
            warn!("Skipping no-op gate token '{token}'");
            continue;
        }
        let mut upper = token.clone();
        upper.name = upper.name.to_uppercase();
        let normalized = normalize_token(&upper, options, config, rng)?;
        gates.push(translate(&normalized)?);
    }

    let mut num_qubits: u32 = 0;
    for qubit in gates.iter().flat_map(|(_, qubits)| qubits) {
        let size = qubit
            .index()
            .checked_add(1)
            .ok_or(QStrError::QubitOutOfRange(qubit.index()))?;
        num_qubits = num_qubits.max(size);
    }

    let mut out = Circuit::with_size("decoded", num_qubits);
    for (gate, qubits) in gates {
        out.gate(gate, qubits)?;
    }
    Ok(out)
}

/// Parse and decode a circuit string.
pub fn decode_str(
    text: &str,
    options: NormalizeOptions,
    config: &GrammarConfig,
    rng: &mut RandomSource,
) -> QStrResult<Circuit> {
    decode(&text.parse()?, options, config, rng)
}

/// Translate one normalized token into a gate and its operands.
fn translate(token: &GateToken) -> QStrResult<(StandardGate, Vec<QubitId>)> {
    let target = token
        .target
        .map(QubitId)
        .ok_or_else(|| QStrError::MissingTarget(token.to_string()))?;
    let control = token.control.map(QubitId);
    let param = token.param.as_deref().map(ParameterExpression::from_literal);

    if let Some(built) =
        GateKind::from_name(&token.name).and_then(|kind| kind.instantiate(target, control, param.clone()))
    {
        return Ok(built);
    }

    // Two-letter Pauli names act on (target, control) as exp(-i θ/2 P⊗Q).
    let bad = |reason: &str| QStrError::BadGateSpec {
        token: token.to_string(),
        reason: reason.to_string(),
    };
    let (first, second) = pauli_pair(&token.name).ok_or_else(|| bad("unsupported gate name"))?;
    let control = control.ok_or_else(|| bad("Pauli-string gate needs a control qubit"))?;
    let param = param.ok_or_else(|| bad("Pauli-string gate needs a parameter"))?;
    if control == target {
        return Err(bad("Pauli-string gate acts on one qubit twice"));
    }
    let paulis: PauliString = format!("{first}{second}").parse()?;

    Ok((StandardGate::ExpPauli(paulis, param), vec![target, control]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use digicircs_ir::Instruction;

    fn decode_default(text: &str) -> QStrResult<Circuit> {
        let mut rng = RandomSource::seeded(0);
        let options = NormalizeOptions {
            fix_params: true,
            remove_controls: false,
        };
        decode_str(text, options, &GrammarConfig::default(), &mut rng)
    }

    #[test]
    fn test_decode_mixed_circuit() {
        let circuit = decode_default("H=0=nop=nop@X=1=nop=nop@RX=1=0=0.1@XX=0=3=0.2@XY=0=1=0.2").unwrap();
        let names: Vec<&str> = circuit.instructions().iter().map(Instruction::name).collect();
        assert_eq!(names, vec!["h", "x", "crx", "exp_pauli", "exp_pauli"]);
        assert_eq!(circuit.num_qubits(), 4);

        let crx = &circuit.instructions()[2];
        assert_eq!(crx.controls(), &[QubitId(0)]);
        assert_eq!(crx.targets(), &[QubitId(1)]);

        let xx = &circuit.instructions()[3];
        assert_eq!(xx.qubits, vec![QubitId(0), QubitId(3)]);
    }

    #[test]
    fn test_lowercase_names_are_accepted() {
        let circuit = decode_default("cnot=1=0=nop").unwrap();
        assert_eq!(circuit.instructions()[0].name(), "cx");
    }

    #[test]
    fn test_symbolic_parameter() {
        let circuit = decode_default("CRZ=0=1=theta").unwrap();
        let param = circuit.instructions()[0].parameter().unwrap();
        assert_eq!(param, &ParameterExpression::symbol("theta"));
    }

    #[test]
    fn test_missing_target() {
        let err = decode_default("X=nop=nop=nop").unwrap_err();
        assert!(matches!(err, QStrError::MissingTarget(_)));
    }

    #[test]
    fn test_nop_token_is_skipped() {
        let circuit = decode_default("nop=nop=nop=nop@H=0=nop=nop").unwrap();
        assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn test_unknown_name_fails_whole_decode() {
        let err = decode_default("H=0=nop=nop@FOO=1=nop=nop").unwrap_err();
        assert!(matches!(err, QStrError::UnknownGate { .. }));
    }

    #[test]
    fn test_bad_gate_spec_for_vocabulary_outside_decoder() {
        let mut config = GrammarConfig::default();
        config.vocabulary.static_1q.push("SWAPPY".into());
        let mut rng = RandomSource::seeded(0);
        let err = decode_str("SWAPPY=0=nop=nop", NormalizeOptions::default(), &config, &mut rng)
            .unwrap_err();
        assert!(matches!(err, QStrError::BadGateSpec { .. }));
    }

    #[test]
    fn test_largest_qubit_index_is_rejected() {
        let err = decode_default("X=4294967295=nop=nop").unwrap_err();
        assert!(matches!(err, QStrError::QubitOutOfRange(u32::MAX)));

        let circuit = decode_default("X=4294967294=nop=nop").unwrap();
        assert_eq!(circuit.num_qubits(), u32::MAX);
    }

    #[test]
    fn test_empty_string_decodes_to_empty_circuit() {
        let circuit = decode_default("").unwrap();
        assert!(circuit.is_empty());
        assert_eq!(circuit.num_qubits(), 0);
    }
}
