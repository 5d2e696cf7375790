//! Canonicalization of gate tokens.
//!
//! | Input | Result |
//! |-------|--------|
//! | name outside the vocabulary | `UnknownGate` |
//! | one-qubit gate with a control | control dropped (when removing controls) |
//! | two-qubit gate, control `nop` or equal to target | down-cast to one-qubit form |
//! | static gate with a parameter | parameter dropped |
//! | parameterized gate without a parameter | sampled angle or fresh variable name |

use crate::config::{GateClass, GrammarConfig};
use crate::error::{QStrError, QStrResult};
use crate::random::RandomSource;
use crate::token::{CircuitString, GateToken};

/// How missing parameters and stray controls are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Sample numeric angles instead of variable names.
    pub fix_params: bool,
    /// Drop controls from one-qubit gates.
    pub remove_controls: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            fix_params: true,
            remove_controls: true,
        }
    }
}

/// Canonical form of one gate token.
///
/// The explicit no-op token is returned unchanged.
pub fn normalize_token(
    token: &GateToken,
    options: NormalizeOptions,
    config: &GrammarConfig,
    rng: &mut RandomSource,
) -> QStrResult<GateToken> {
    if token.is_nop() {
        return Ok(token.clone());
    }

    let mut class = config
        .vocabulary
        .class_of(&token.name)
        .ok_or_else(|| QStrError::UnknownGate {
            name: token.name.clone(),
            token: token.to_string(),
        })?;
    let mut out = token.clone();

    if class.is_two_qubit() && (out.control.is_none() || out.control == out.target) {
        out.name = config.casting.downcast(&out.name)?;
        out.control = None;
        class = config
            .vocabulary
            .class_of(&out.name)
            .filter(|c| !c.is_two_qubit())
            .unwrap_or_else(|| class.downcast());
    }

    if !class.is_two_qubit() && options.remove_controls {
        out.control = None;
    }

    match class {
        GateClass::Static1q | GateClass::Static2q => out.param = None,
        GateClass::Param1q | GateClass::Param2q => {
            if out.param.is_none() {
                out.param = Some(fresh_param(options.fix_params, config, rng));
            }
        }
    }

    Ok(out)
}

/// A sampled angle, or a variable name when parameters are not fixed.
pub fn fresh_param(fix_params: bool, config: &GrammarConfig, rng: &mut RandomSource) -> String {
    if fix_params {
        let value = rng.normal(config.param_mean, config.param_scale);
        format!("{value:.prec$}", prec = config.precision)
    } else {
        rng.placeholder(config.placeholder_len)
    }
}

/// Normalize every token of a circuit string, dropping no-op tokens.
pub fn preprocess_circuit(
    circuit: &CircuitString,
    options: NormalizeOptions,
    config: &GrammarConfig,
    rng: &mut RandomSource,
) -> QStrResult<CircuitString> {
    circuit
        .iter()
        .filter(|token| !token.is_nop())
        .map(|token| normalize_token(token, options, config, rng))
        .collect()
}
