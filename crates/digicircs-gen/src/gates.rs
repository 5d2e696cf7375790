//! Gate assignment: filling topology slots with gate names.
//!
//! Gates are emitted without parameters. [`crate::add_params`] fills them in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use digicircs_qstr::{CircuitString, GateToken, GateVocabulary, RandomSource};

use crate::error::{GenError, GenResult, check_weights};
use crate::topology::{Moment, Topology, TopologyOptions, gen_topology};

/// Default class weights when [`gen_circuit_gates`] builds its own topology.
pub const DEFAULT_GATE_WEIGHTS: [f64; 3] = [0.2, 0.4, 0.4];

/// Gates left out of every moment after a local-rotation moment.
const LOCAL_ROTATION_AXIS: [&str; 2] = ["Z", "RZ"];

/// Order in which moments receive parameterized gates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// First moments first.
    Early,
    /// Moments in shuffled order.
    #[default]
    Random,
    /// Last moments first.
    Late,
}

impl FromStr for Strategy {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "early" => Ok(Strategy::Early),
            "random" => Ok(Strategy::Random),
            "late" => Ok(Strategy::Late),
            other => Err(GenError::InvalidStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Early => "early",
            Strategy::Random => "random",
            Strategy::Late => "late",
        })
    }
}

fn pick<'a>(pool: &'a [String], kind: &'static str, rng: &mut RandomSource) -> GenResult<&'a str> {
    rng.choose(pool)
        .map(String::as_str)
        .ok_or(GenError::EmptyGatePool(kind))
}

/// Fill one moment with gates drawn uniformly from the vocabulary.
///
/// One-qubit slots come first, then two-qubit slots.
pub fn gen_gates_one_moment(
    moment: &Moment,
    pool: &GateVocabulary,
    rng: &mut RandomSource,
) -> GenResult<CircuitString> {
    let gates_1q = pool.one_qubit_gates();
    let gates_2q = pool.two_qubit_gates();
    let mut out = CircuitString::default();

    rng.reseed();
    for &site in &moment.one_qubit {
        out.push(GateToken::new(pick(&gates_1q, "one-qubit", rng)?, site));
    }
    for &(target, control) in &moment.two_qubit {
        out.push(GateToken::new(pick(&gates_2q, "two-qubit", rng)?, target).with_control(control));
    }
    Ok(out)
}

/// Fill every moment of `topology`.
pub fn gen_gates(
    topology: &Topology,
    pool: &GateVocabulary,
    rng: &mut RandomSource,
) -> GenResult<CircuitString> {
    let mut out = Vec::with_capacity(topology.gate_count());
    for moment in &topology.moments {
        out.extend(gen_gates_one_moment(moment, pool, rng)?);
    }
    Ok(CircuitString::from(out))
}

/// Generate a topology and fill it.
pub fn gen_circuit_gates(
    n_qubits: u32,
    n_moments: usize,
    options: &TopologyOptions,
    pool: &GateVocabulary,
    rng: &mut RandomSource,
) -> GenResult<CircuitString> {
    let topology = gen_topology(n_qubits, n_moments, options, rng)?;
    gen_gates(&topology, pool, rng)
}

/// Parameter budget of [`gen_gates_fixed_params`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamBudget {
    /// Number of parameterized gates.
    pub n_params: usize,
    /// Relative share of one- and two-qubit parameterized gates.
    pub weights_1q2q: [f64; 2],
    pub strategy: Strategy,
    /// The topology starts with a local-rotation moment.
    pub local_rot_moment: bool,
}

impl Default for ParamBudget {
    fn default() -> Self {
        Self {
            n_params: 0,
            weights_1q2q: [0.5, 0.5],
            strategy: Strategy::Random,
            local_rot_moment: false,
        }
    }
}

/// Split `n_params` into one- and two-qubit budgets that fit the slots.
fn split_budget(n_params: usize, weights: [f64; 2], n_1q: usize, n_2q: usize) -> GenResult<(usize, usize)> {
    let total = check_weights(&weights)?;
    let mut n_params = n_params;
    if n_params > n_1q + n_2q {
        warn!(
            "Requested {n_params} parameterized gates but the topology has {} slots",
            n_1q + n_2q
        );
        n_params = n_1q + n_2q;
    }

    let mut p_1q = ((weights[0] / total) * n_params as f64) as usize;
    let mut p_2q = n_params - p_1q;
    if p_1q >= n_1q {
        p_1q = n_1q;
        p_2q = n_params - p_1q;
        warn!("Parameter split adjusted to {p_1q} one-qubit and {p_2q} two-qubit gates");
    } else if p_2q >= n_2q {
        p_2q = n_2q;
        p_1q = n_params - p_2q;
        warn!("Parameter split adjusted to {p_1q} one-qubit and {p_2q} two-qubit gates");
    }
    Ok((p_1q, p_2q))
}

/// Fill `topology` with exactly `budget.n_params` parameterized gates where
/// the slots allow it.
///
/// Moments are visited in the order of `budget.strategy`; each takes as many
/// parameterized gates as the remaining budget allows. The output keeps
/// topology order. Moments that come out empty are skipped with a warning.
pub fn gen_gates_fixed_params(
    topology: &Topology,
    budget: &ParamBudget,
    pool: &GateVocabulary,
    rng: &mut RandomSource,
) -> GenResult<CircuitString> {
    let (mut left_1q, mut left_2q) =
        split_budget(budget.n_params, budget.weights_1q2q, topology.n_1q, topology.n_2q)?;

    let mut pool = pool.clone();
    if budget.local_rot_moment {
        for list in [&mut pool.static_1q, &mut pool.param_1q] {
            list.retain(|g| !LOCAL_ROTATION_AXIS.contains(&g.as_str()));
        }
    }

    let mut ordering: Vec<usize> = (0..topology.moments.len()).collect();
    match budget.strategy {
        Strategy::Early => {}
        Strategy::Late => ordering.reverse(),
        Strategy::Random => {
            rng.reseed();
            rng.shuffle(&mut ordering);
        }
    }

    let mut filled = vec![CircuitString::default(); topology.moments.len()];
    for index in ordering {
        let moment = &topology.moments[index];
        let n_1q = moment.one_qubit.len().min(left_1q);
        let n_2q = moment.two_qubit.len().min(left_2q);
        filled[index] = fill_moment_fixed(moment, n_1q, n_2q, &pool, rng)?;
        left_1q -= n_1q;
        left_2q -= n_2q;
    }

    let mut out = Vec::with_capacity(topology.gate_count());
    for (index, moment) in filled.into_iter().enumerate() {
        if moment.is_empty() {
            warn!("Moment {index} is empty");
        }
        out.extend(moment);
    }
    Ok(CircuitString::from(out))
}

/// The first `n_1q` one-qubit and `n_2q` two-qubit slots get parameterized gates.
fn fill_moment_fixed(
    moment: &Moment,
    n_1q: usize,
    n_2q: usize,
    pool: &GateVocabulary,
    rng: &mut RandomSource,
) -> GenResult<CircuitString> {
    let mut out = CircuitString::default();
    for (i, &site) in moment.one_qubit.iter().enumerate() {
        rng.reseed();
        let name = if i < n_1q {
            pick(&pool.param_1q, "parameterized one-qubit", rng)?
        } else {
            pick(&pool.static_1q, "static one-qubit", rng)?
        };
        out.push(GateToken::new(name, site));
    }
    for (i, &(target, control)) in moment.two_qubit.iter().enumerate() {
        rng.reseed();
        let name = if i < n_2q {
            pick(&pool.param_2q, "parameterized two-qubit", rng)?
        } else {
            pick(&pool.static_2q, "static two-qubit", rng)?
        };
        out.push(GateToken::new(name, target).with_control(control));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topology() -> Topology {
        Topology::from_moments(vec![
            Moment {
                one_qubit: vec![0, 4],
                two_qubit: vec![(2, 3)],
            },
            Moment {
                one_qubit: vec![1, 5],
                two_qubit: vec![(0, 2), (3, 4)],
            },
        ])
    }

    fn count_param(circuit: &CircuitString, pool: &GateVocabulary) -> usize {
        circuit
            .iter()
            .filter(|t| pool.is_parameterized_ignore_case(&t.name))
            .count()
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("late".parse::<Strategy>().unwrap(), Strategy::Late);
        assert_eq!(Strategy::Early.to_string(), "early");
        assert!(matches!(
            "middle".parse::<Strategy>(),
            Err(GenError::InvalidStrategy(_))
        ));
    }

    #[test]
    fn test_gates_follow_topology() {
        let pool = GateVocabulary::default();
        let circuit = gen_gates(&topology(), &pool, &mut RandomSource::from_entropy()).unwrap();
        assert_eq!(circuit.len(), 7);

        let shape: Vec<(u32, Option<u32>)> =
            circuit.iter().map(|t| (t.target.unwrap(), t.control)).collect();
        assert_eq!(
            shape,
            vec![
                (0, None),
                (4, None),
                (2, Some(3)),
                (1, None),
                (5, None),
                (0, Some(2)),
                (3, Some(4)),
            ]
        );
        for token in &circuit {
            assert!(token.param.is_none());
            assert_eq!(pool.is_one_qubit(&token.name), token.control.is_none());
        }
    }

    #[test]
    fn test_restricted_pool() {
        let pool = GateVocabulary {
            static_1q: vec![],
            param_1q: vec!["RX".into()],
            static_2q: vec![],
            param_2q: vec!["XY".into()],
        };
        let moment = &topology().moments[0];
        let circuit = gen_gates_one_moment(moment, &pool, &mut RandomSource::seeded(0)).unwrap();
        assert_eq!(circuit.to_string(), "RX=0=nop=nop@RX=4=nop=nop@XY=2=3=nop");
    }

    #[test]
    fn test_empty_pool() {
        let pool = GateVocabulary {
            static_2q: vec![],
            param_2q: vec![],
            ..GateVocabulary::default()
        };
        let err = gen_gates(&topology(), &pool, &mut RandomSource::seeded(0)).unwrap_err();
        assert!(matches!(err, GenError::EmptyGatePool(_)));
    }

    #[test]
    fn test_fixed_budget_is_met() {
        let pool = GateVocabulary::default();
        for strategy in [Strategy::Early, Strategy::Random, Strategy::Late] {
            let budget = ParamBudget {
                n_params: 4,
                strategy,
                ..ParamBudget::default()
            };
            let circuit =
                gen_gates_fixed_params(&topology(), &budget, &pool, &mut RandomSource::from_entropy())
                    .unwrap();
            assert_eq!(circuit.len(), 7);
            assert_eq!(count_param(&circuit, &pool), 4);
        }
    }

    #[test]
    fn test_early_and_late_placement() {
        let pool = GateVocabulary::default();
        let mut budget = ParamBudget {
            n_params: 2,
            weights_1q2q: [1.0, 0.0],
            strategy: Strategy::Early,
            ..ParamBudget::default()
        };
        let early =
            gen_gates_fixed_params(&topology(), &budget, &pool, &mut RandomSource::seeded(1)).unwrap();
        assert!(pool.param_1q.contains(&early.tokens()[0].name));
        assert!(pool.param_1q.contains(&early.tokens()[1].name));
        assert!(pool.static_1q.contains(&early.tokens()[3].name));

        budget.strategy = Strategy::Late;
        let late =
            gen_gates_fixed_params(&topology(), &budget, &pool, &mut RandomSource::seeded(1)).unwrap();
        assert!(pool.static_1q.contains(&late.tokens()[0].name));
        assert!(pool.param_1q.contains(&late.tokens()[3].name));
        assert!(pool.param_1q.contains(&late.tokens()[4].name));
    }

    #[test]
    fn test_budget_is_clamped() {
        assert_eq!(split_budget(20, [0.5, 0.5], 4, 3).unwrap(), (4, 3));
        assert_eq!(split_budget(4, [0.5, 0.5], 1, 5).unwrap(), (1, 3));
        assert_eq!(split_budget(4, [0.5, 0.5], 5, 1).unwrap(), (3, 1));
        assert!(split_budget(4, [0.0, 0.0], 5, 1).is_err());
    }

    #[test]
    fn test_local_rotation_pools() {
        let pool = GateVocabulary::default();
        let budget = ParamBudget {
            n_params: 1,
            local_rot_moment: true,
            ..ParamBudget::default()
        };
        for _ in 0..20 {
            let circuit =
                gen_gates_fixed_params(&topology(), &budget, &pool, &mut RandomSource::from_entropy())
                    .unwrap();
            assert!(circuit.iter().all(|t| t.name != "Z" && t.name != "RZ"));
        }
        assert!(pool.static_1q.iter().any(|g| g == "Z"));
    }
}
