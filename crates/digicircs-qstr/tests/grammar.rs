//! Grammar-level properties of normalization and the string codec.

use digicircs_qstr::{
    CircuitString, GateToken, GrammarConfig, NormalizeOptions, QStrError, RandomSource,
    count_moments, decode, encode, normalize_token, preprocess_circuit,
};
use proptest::prelude::*;

const NAMES: &[&str] = &[
    "X", "Y", "Z", "H", "CNOT", "RX", "RY", "RZ", "CRX", "CRY", "CRZ", "XX", "XY", "XZ", "YY",
    "YZ", "ZZ",
];

fn token_strategy() -> impl Strategy<Value = GateToken> {
    (
        prop::sample::select(NAMES),
        0_u32..6,
        prop::option::of(0_u32..6),
        prop::option::of(-3.0_f64..3.0),
    )
        .prop_map(|(name, target, control, param)| GateToken {
            name: name.to_string(),
            target: Some(target),
            control,
            param: param.map(|p| format!("{p:.4}")),
        })
}

fn circuit_strategy() -> impl Strategy<Value = CircuitString> {
    prop::collection::vec(token_strategy(), 0..12).prop_map(CircuitString::from)
}

fn same_param(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(x), Ok(y)) => x == y,
            _ => a == b,
        },
        _ => false,
    }
}

proptest! {
    #[test]
    fn normalization_is_idempotent(token in token_strategy(), fix in any::<bool>()) {
        let config = GrammarConfig::default();
        let options = NormalizeOptions { fix_params: fix, remove_controls: true };
        let mut rng = RandomSource::seeded(11);

        let once = normalize_token(&token, options, &config, &mut rng).unwrap();
        let twice = normalize_token(&once, options, &config, &mut rng).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn canonical_strings_survive_decode_then_encode(circuit in circuit_strategy()) {
        let config = GrammarConfig::default();
        let options = NormalizeOptions::default();
        let mut rng = RandomSource::seeded(5);

        let canonical = preprocess_circuit(&circuit, options, &config, &mut rng).unwrap();
        let decoded = decode(&canonical, options, &config, &mut rng).unwrap();
        let encoded = encode(&decoded, &config).unwrap();

        prop_assert_eq!(encoded.len(), canonical.len());
        for (got, want) in encoded.iter().zip(canonical.iter()) {
            prop_assert_eq!(&got.name, &want.name);
            prop_assert_eq!(got.target, want.target);
            prop_assert_eq!(got.control, want.control);
            prop_assert!(same_param(got.param.as_deref(), want.param.as_deref()));
        }
    }

    #[test]
    fn canonical_tokens_never_lack_parameters(token in token_strategy()) {
        let config = GrammarConfig::default();
        let mut rng = RandomSource::seeded(3);
        let out = normalize_token(&token, NormalizeOptions::default(), &config, &mut rng).unwrap();

        let class = config.vocabulary.class_of(&out.name).unwrap();
        prop_assert_eq!(class.is_parameterized(), out.param.is_some());
        if !class.is_two_qubit() {
            prop_assert_eq!(out.control, None);
        } else {
            prop_assert!(out.control.is_some() && out.control != out.target);
        }
    }
}

#[test]
fn test_downcast_scenarios() {
    let config = GrammarConfig::default();
    let mut rng = RandomSource::seeded(0);
    for text in ["CNOT=0=0=0.1", "CNOT=0=nop=0.1"] {
        let token: GateToken = text.parse().unwrap();
        let out = normalize_token(&token, NormalizeOptions::default(), &config, &mut rng).unwrap();
        assert_eq!(out.to_string(), "X=0=nop=nop");
    }
}

#[test]
fn test_placeholder_injection_with_seed() {
    let config = GrammarConfig::default();
    let options = NormalizeOptions {
        fix_params: false,
        remove_controls: true,
    };
    let token: GateToken = "RX=0=1=nop".parse().unwrap();

    let mut first = RandomSource::seeded(42);
    let mut second = RandomSource::seeded(42);
    let a = normalize_token(&token, options, &config, &mut first).unwrap();
    let b = normalize_token(&token, options, &config, &mut second).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.control, None);
    let param = a.param.unwrap();
    assert_eq!(param.len(), 4);
    assert!(param.starts_with(|c: char| c.is_ascii_uppercase()));
}

#[test]
fn test_moment_count_literal() {
    let circuit: CircuitString = "H=0=nop=nop@X=1=nop=nop@RX=1=0=0.1@RY=0=1=0.2"
        .parse()
        .unwrap();
    assert_eq!(count_moments(&circuit, &GrammarConfig::default()).unwrap(), 2);
}

#[test]
fn test_bad_token_aborts_whole_decode() {
    let config = GrammarConfig::default();
    let mut rng = RandomSource::seeded(0);
    let circuit: CircuitString = "H=0=nop=nop@X=nop=nop=nop@H=1=nop=nop".parse().unwrap();
    let err = decode(&circuit, NormalizeOptions::default(), &config, &mut rng).unwrap_err();
    assert!(matches!(err, QStrError::MissingTarget(_)));
}
