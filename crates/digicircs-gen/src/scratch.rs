//! Circuits sampled gate by gate, without a topology.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

use serde::{Deserialize, Serialize};

use digicircs_qstr::{CircuitString, GateToken, GateVocabulary, RandomSource};

use crate::error::{GenError, GenResult, check_weights};

/// Settings of [`circuit_from_scratch`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchOptions {
    /// Number of gates. Drawn from `[min_gates, max_gates)` when `None`.
    pub n_gates: Option<usize>,
    pub min_gates: usize,
    pub max_gates: usize,
    /// Relative share of one- and two-qubit gates.
    pub weights_1q2q: [f64; 2],
    /// Largest `|target - control|`. `None` means unbounded.
    pub max_distance: Option<u32>,
    /// Sample angles instead of writing variable names.
    pub fix_params: bool,
    /// Decimal digits of sampled angles.
    pub precision: usize,
}

impl Default for ScratchOptions {
    fn default() -> Self {
        Self {
            n_gates: None,
            min_gates: 5,
            max_gates: 100,
            weights_1q2q: [0.5, 0.5],
            max_distance: None,
            fix_params: true,
            precision: 4,
        }
    }
}

/// Sample a circuit gate by gate and shuffle it.
///
/// One-qubit angles follow `N(pi/2, pi/4)` and two-qubit angles
/// `N(pi/2, pi/3)`. Qubits may be reused freely, so the result has no moment
/// structure. Returns the circuit and its number of parameters.
pub fn circuit_from_scratch(
    n_qubits: u32,
    options: &ScratchOptions,
    pool: &GateVocabulary,
    rng: &mut RandomSource,
) -> GenResult<(CircuitString, usize)> {
    rng.reseed();
    let n_gates = match options.n_gates {
        Some(n) => n,
        None if options.min_gates < options.max_gates => {
            rng.gen_range(options.min_gates..options.max_gates)
        }
        None => {
            return Err(GenError::InvalidRange {
                min: options.min_gates,
                max: options.max_gates,
            });
        }
    };

    let total = check_weights(&options.weights_1q2q)?;
    let n_1q = (n_gates as f64 * options.weights_1q2q[0] / total) as usize;
    let n_2q = n_gates - n_1q;
    let needed = if n_2q > 0 { 2 } else { u32::from(n_1q > 0) };
    if n_qubits < needed {
        return Err(GenError::NotEnoughQubits {
            needed,
            found: n_qubits,
        });
    }

    let (params_1q, params_2q) = if options.fix_params {
        (
            rng.normal_array(n_1q, FRAC_PI_2, FRAC_PI_4),
            rng.normal_array(n_2q, FRAC_PI_2, FRAC_PI_3),
        )
    } else {
        (Vec::new(), Vec::new())
    };

    let gates_1q = pool.one_qubit_gates();
    let gates_2q = pool.two_qubit_gates();
    let precision = options.precision;
    let mut n_params = 0;
    let mut param_text = |value: Option<&f64>| {
        let text = match value {
            Some(v) => format!("{v:.precision$}"),
            None => format!("param{n_params}"),
        };
        n_params += 1;
        text
    };

    let mut tokens = Vec::with_capacity(n_gates);
    for i in 0..n_1q {
        let name = rng.choose(&gates_1q).ok_or(GenError::EmptyGatePool("one-qubit"))?;
        let target = rng.gen_range(0..n_qubits as usize) as u32;
        let mut token = GateToken::new(name.clone(), target);
        if pool.param_1q.contains(name) {
            token.param = Some(param_text(params_1q.get(i)));
        }
        tokens.push(token);
    }

    for i in 0..n_2q {
        let name = rng.choose(&gates_2q).ok_or(GenError::EmptyGatePool("two-qubit"))?;
        let target = rng.gen_range(0..n_qubits as usize) as u32;
        let others: Vec<u32> = (0..n_qubits).filter(|&q| q != target).collect();
        let near: Vec<u32> = match options.max_distance {
            Some(d) => others.iter().copied().filter(|q| q.abs_diff(target) <= d).collect(),
            None => Vec::new(),
        };
        let candidates = if near.is_empty() { &others } else { &near };
        let control = candidates[rng.gen_range(0..candidates.len())];

        let mut token = GateToken::new(name.clone(), target).with_control(control);
        if pool.param_2q.contains(name) {
            token.param = Some(param_text(params_2q.get(i)));
        }
        tokens.push(token);
    }

    rng.shuffle(&mut tokens);
    Ok((CircuitString::from(tokens), n_params))
}
