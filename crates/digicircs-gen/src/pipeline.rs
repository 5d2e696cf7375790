//! Topology, gates and parameters in one call.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use digicircs_qstr::{CircuitString, GateVocabulary, GrammarConfig, RandomSource};

use crate::error::GenResult;
use crate::gates::{ParamBudget, Strategy, gen_gates, gen_gates_fixed_params};
use crate::params::{ParamSource, add_params};
use crate::topology::{DEFAULT_CLASS_WEIGHTS, TopologyOptions, gen_topology};

/// Settings of the generator pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub n_qubits: u32,
    pub n_moments: usize,
    /// Relative weights of idle, one-qubit and two-qubit qubits.
    pub weights: [f64; 3],
    pub max_distance: Option<u32>,
    pub local_rot_moment: bool,
    /// Exact number of parameterized gates. `None` leaves it to chance.
    pub n_params: Option<usize>,
    pub weights_1q2q: [f64; 2],
    pub strategy: Strategy,
    /// Sample angles instead of writing variable names.
    pub fix_params: bool,
    /// Gates to draw from.
    pub pool: GateVocabulary,
    pub seed: Option<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n_qubits: 4,
            n_moments: 4,
            weights: DEFAULT_CLASS_WEIGHTS,
            max_distance: None,
            local_rot_moment: false,
            n_params: None,
            weights_1q2q: [0.5, 0.5],
            strategy: Strategy::Random,
            fix_params: true,
            pool: GateVocabulary::default(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Topology settings.
    pub fn topology_options(&self) -> TopologyOptions {
        TopologyOptions {
            weights: self.weights,
            max_distance: self.max_distance,
            local_rot_moment: self.local_rot_moment,
        }
    }
}

/// Generate one circuit string and its number of parameters.
pub fn generate(
    config: &GeneratorConfig,
    grammar: &GrammarConfig,
    rng: &mut RandomSource,
) -> GenResult<(CircuitString, usize)> {
    let topology = gen_topology(config.n_qubits, config.n_moments, &config.topology_options(), rng)?;

    let gates = match config.n_params {
        Some(n_params) => {
            let budget = ParamBudget {
                n_params,
                weights_1q2q: config.weights_1q2q,
                strategy: config.strategy,
                local_rot_moment: config.local_rot_moment,
            };
            gen_gates_fixed_params(&topology, &budget, &config.pool, rng)?
        }
        None => gen_gates(&topology, &config.pool, rng)?,
    };
    debug!("Assigned {} gates", gates.len());

    let source = if config.fix_params {
        ParamSource::Sampled
    } else {
        ParamSource::Symbolic
    };
    add_params(&gates, &config.pool, source, grammar, rng)
}

/// Generate `n` circuit strings.
pub fn generate_corpus(
    n: usize,
    config: &GeneratorConfig,
    grammar: &GrammarConfig,
    rng: &mut RandomSource,
) -> GenResult<Vec<CircuitString>> {
    let corpus = (0..n)
        .map(|_| generate(config, grammar, rng).map(|(circuit, _)| circuit))
        .collect::<GenResult<Vec<_>>>()?;
    info!(
        "Generated {} circuits on {} qubits with {} moments",
        corpus.len(),
        config.n_qubits,
        config.n_moments
    );
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use digicircs_qstr::count_moments;

    #[test]
    fn test_generate_fixed_budget() {
        let config = GeneratorConfig {
            n_qubits: 6,
            n_moments: 5,
            n_params: Some(3),
            ..GeneratorConfig::default()
        };
        let grammar = GrammarConfig::default();
        let (circuit, n_params) =
            generate(&config, &grammar, &mut RandomSource::from_entropy()).unwrap();
        assert!(n_params <= 3);
        assert!(count_moments(&circuit, &grammar).unwrap() <= 5);
    }

    #[test]
    fn test_seeded_corpus_repeats() {
        let config = GeneratorConfig {
            seed: Some(7),
            ..GeneratorConfig::default()
        };
        let grammar = GrammarConfig::default();
        let a = generate_corpus(3, &config, &grammar, &mut RandomSource::seeded(7)).unwrap();
        let b = generate_corpus(3, &config, &grammar, &mut RandomSource::seeded(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = "n_qubits: 8\nstrategy: late\nn_params: 4\nweights: [0.1, 0.5, 0.4]\n";
        let config: GeneratorConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.n_qubits, 8);
        assert_eq!(config.strategy, Strategy::Late);
        assert_eq!(config.n_params, Some(4));
        assert_eq!(config.n_moments, 4);
        assert!(config.fix_params);
    }
}
