//! Parameter assignment.

use digicircs_qstr::{CircuitString, GateVocabulary, GrammarConfig, RandomSource};

use crate::error::{GenError, GenResult};

/// Parameters for [`add_params`].
#[derive(Debug, Clone, Copy, Default)]
pub enum ParamSource<'a> {
    /// Sample `N(mean, scale)` from the grammar settings.
    #[default]
    Sampled,
    /// Use these values in order.
    Given(&'a [f64]),
    /// Write variable names `param0`, `param1`, ...
    Symbolic,
}

/// Give every parameterized gate a parameter.
///
/// Gate names match the vocabulary ignoring case. Other gates are left as
/// they are. Returns the new string and the number of parameters written.
pub fn add_params(
    circuit: &CircuitString,
    pool: &GateVocabulary,
    source: ParamSource<'_>,
    config: &GrammarConfig,
    rng: &mut RandomSource,
) -> GenResult<(CircuitString, usize)> {
    let needed = circuit
        .iter()
        .filter(|t| pool.is_parameterized_ignore_case(&t.name))
        .count();

    let sampled;
    let values: &[f64] = match source {
        ParamSource::Sampled => {
            rng.reseed();
            sampled = rng.normal_array(circuit.len(), config.param_mean, config.param_scale);
            &sampled
        }
        ParamSource::Given(values) if values.len() < needed => {
            return Err(GenError::MissingParams {
                needed,
                given: values.len(),
            });
        }
        ParamSource::Given(values) => values,
        ParamSource::Symbolic => &[],
    };

    let precision = config.precision;
    let mut count = 0;
    let out = circuit
        .iter()
        .map(|token| {
            let mut token = token.clone();
            if pool.is_parameterized_ignore_case(&token.name) {
                token.param = Some(match source {
                    ParamSource::Symbolic => format!("param{count}"),
                    _ => format!("{:.precision$}", values[count]),
                });
                count += 1;
            }
            token
        })
        .collect();
    Ok((out, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: ParamSource<'_>, seed: u32) -> (String, usize) {
        let circuit: CircuitString = "RZ=0=nop=nop@RZ=4=nop=nop@CNOT=2=3=nop".parse().unwrap();
        let (out, n) = add_params(
            &circuit,
            &GateVocabulary::default(),
            source,
            &GrammarConfig::default(),
            &mut RandomSource::seeded(seed),
        )
        .unwrap();
        (out.to_string(), n)
    }

    #[test]
    fn test_seeded_parameters() {
        assert_eq!(
            run(ParamSource::Sampled, 0),
            ("RZ=0=nop=2.9563@RZ=4=nop=1.8851@CNOT=2=3=nop".to_string(), 2)
        );
    }

    #[test]
    fn test_given_parameters() {
        let values = [0.09762701, 0.43037873, 0.20552675];
        assert_eq!(
            run(ParamSource::Given(&values), 0).0,
            "RZ=0=nop=0.0976@RZ=4=nop=0.4304@CNOT=2=3=nop"
        );
    }

    #[test]
    fn test_too_few_given_parameters() {
        let circuit: CircuitString = "RX=0=nop=nop@CRY=1=0=nop".parse().unwrap();
        let err = add_params(
            &circuit,
            &GateVocabulary::default(),
            ParamSource::Given(&[1.0]),
            &GrammarConfig::default(),
            &mut RandomSource::seeded(0),
        )
        .unwrap_err();
        assert!(matches!(err, GenError::MissingParams { needed: 2, given: 1 }));
    }

    #[test]
    fn test_symbolic_parameters() {
        assert_eq!(
            run(ParamSource::Symbolic, 0),
            ("RZ=0=nop=param0@RZ=4=nop=param1@CNOT=2=3=nop".to_string(), 2)
        );
    }

    #[test]
    fn test_lowercase_names_match() {
        let circuit: CircuitString = "rx=0=nop=nop@h=1=nop=nop".parse().unwrap();
        let (out, n) = add_params(
            &circuit,
            &GateVocabulary::default(),
            ParamSource::Symbolic,
            &GrammarConfig::default(),
            &mut RandomSource::seeded(0),
        )
        .unwrap();
        assert_eq!(n, 1);
        assert_eq!(out.to_string(), "rx=0=nop=param0@h=1=nop=nop");
    }
}
