//! Gate vocabulary, casting table and grammar settings.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use serde::{Deserialize, Serialize};

use digicircs_compile::DecompositionOptions;

use crate::error::{QStrError, QStrResult};

/// Sentinel for an absent field.
pub const NOP: &str = "nop";

/// Separator between gate tokens in a circuit string.
pub const GATE_SEPARATOR: char = '@';

/// Separator between the fields of a gate token.
pub const FIELD_SEPARATOR: char = '=';

const PAULIS: [char; 3] = ['X', 'Y', 'Z'];

/// Vocabulary class of a gate name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateClass {
    /// Fixed one-qubit gate.
    Static1q,
    /// Fixed two-qubit gate.
    Static2q,
    /// One-qubit gate with an angle.
    Param1q,
    /// Two-qubit gate with an angle.
    Param2q,
}

impl GateClass {
    /// Whether gates of this class act on a target and a control.
    pub fn is_two_qubit(self) -> bool {
        matches!(self, GateClass::Static2q | GateClass::Param2q)
    }

    /// Whether gates of this class carry a parameter.
    pub fn is_parameterized(self) -> bool {
        matches!(self, GateClass::Param1q | GateClass::Param2q)
    }

    /// The one-qubit class with the same parameterization.
    pub fn downcast(self) -> Self {
        if self.is_parameterized() {
            GateClass::Param1q
        } else {
            GateClass::Static1q
        }
    }
}

/// Gate names, partitioned into the four vocabulary classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateVocabulary {
    pub static_1q: Vec<String>,
    pub static_2q: Vec<String>,
    pub param_1q: Vec<String>,
    pub param_2q: Vec<String>,
}

impl Default for GateVocabulary {
    fn default() -> Self {
        let names = |v: &[&str]| -> Vec<String> { v.iter().map(|s| (*s).to_string()).collect() };
        Self {
            static_1q: names(&["X", "Y", "Z", "H"]),
            static_2q: names(&["CNOT"]),
            param_1q: names(&["RX", "RY", "RZ"]),
            param_2q: names(&[
                "CRX", "CRY", "CRZ", "XX", "XY", "XZ", "YY", "YZ", "ZZ",
            ]),
        }
    }
}

impl GateVocabulary {
    /// Class of `name`, or `None` when it is not in the vocabulary.
    ///
    /// One-qubit classes are checked first.
    pub fn class_of(&self, name: &str) -> Option<GateClass> {
        let has = |v: &[String]| v.iter().any(|g| g == name);
        if has(&self.static_1q) {
            Some(GateClass::Static1q)
        } else if has(&self.param_1q) {
            Some(GateClass::Param1q)
        } else if has(&self.static_2q) {
            Some(GateClass::Static2q)
        } else if has(&self.param_2q) {
            Some(GateClass::Param2q)
        } else {
            None
        }
    }

    /// Check whether `name` is a one-qubit gate.
    pub fn is_one_qubit(&self, name: &str) -> bool {
        self.class_of(name).is_some_and(|class| !class.is_two_qubit())
    }

    /// Check whether `name` is parameterized, ignoring ASCII case.
    pub fn is_parameterized_ignore_case(&self, name: &str) -> bool {
        self.param_1q
            .iter()
            .chain(&self.param_2q)
            .any(|g| g.eq_ignore_ascii_case(name))
    }

    /// Static then parameterized one-qubit gates.
    pub fn one_qubit_gates(&self) -> Vec<String> {
        self.static_1q.iter().chain(&self.param_1q).cloned().collect()
    }

    /// Static then parameterized two-qubit gates.
    pub fn two_qubit_gates(&self) -> Vec<String> {
        self.static_2q.iter().chain(&self.param_2q).cloned().collect()
    }
}

/// Bidirectional mapping between two-qubit gates and their one-qubit forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastTable {
    /// Two-qubit name to one-qubit name.
    pub down: BTreeMap<String, String>,
    /// One-qubit name to two-qubit name.
    pub up: BTreeMap<String, String>,
}

impl Default for CastTable {
    fn default() -> Self {
        let pairs = [("CNOT", "X"), ("CRX", "RX"), ("CRY", "RY"), ("CRZ", "RZ")];
        Self {
            down: pairs
                .iter()
                .map(|(two, one)| ((*two).to_string(), (*one).to_string()))
                .collect(),
            up: pairs
                .iter()
                .map(|(two, one)| ((*one).to_string(), (*two).to_string()))
                .collect(),
        }
    }
}

impl CastTable {
    /// One-qubit form of a two-qubit gate.
    ///
    /// Names missing from the table fall back to the Pauli rule: a
    /// two-letter Pauli string `AB` becomes the rotation `RB`.
    pub fn downcast(&self, name: &str) -> QStrResult<String> {
        if let Some(one) = self.down.get(name) {
            return Ok(one.clone());
        }
        match pauli_pair(name) {
            Some((_, second)) => Ok(format!("R{second}")),
            None => Err(QStrError::InvalidCast(name.to_string())),
        }
    }

    /// Controlled form of a one-qubit gate.
    pub fn upcast(&self, name: &str) -> Option<&str> {
        self.up.get(name).map(String::as_str)
    }
}

/// Split a two-letter Pauli name such as `"XY"` into its letters.
pub fn pauli_pair(name: &str) -> Option<(char, char)> {
    let mut chars = name.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) if PAULIS.contains(&a) && PAULIS.contains(&b) => Some((a, b)),
        _ => None,
    }
}

/// Settings shared by the normalizer and the string codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    pub vocabulary: GateVocabulary,
    pub casting: CastTable,
    /// Mean of sampled angles.
    pub param_mean: f64,
    /// Standard deviation of sampled angles.
    pub param_scale: f64,
    /// Decimal digits of sampled angles.
    pub precision: usize,
    /// Length of generated variable names.
    pub placeholder_len: usize,
    /// Which gate families the encoder may decompose.
    pub decomposition: DecompositionOptions,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            vocabulary: GateVocabulary::default(),
            casting: CastTable::default(),
            param_mean: FRAC_PI_2,
            param_scale: FRAC_PI_4,
            precision: 4,
            placeholder_len: 4,
            decomposition: DecompositionOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_lookup() {
        let vocab = GateVocabulary::default();
        assert_eq!(vocab.class_of("H"), Some(GateClass::Static1q));
        assert_eq!(vocab.class_of("RY"), Some(GateClass::Param1q));
        assert_eq!(vocab.class_of("CNOT"), Some(GateClass::Static2q));
        assert_eq!(vocab.class_of("YZ"), Some(GateClass::Param2q));
        assert_eq!(vocab.class_of("S"), None);
        assert!(vocab.is_parameterized_ignore_case("crz"));
        assert!(!vocab.is_parameterized_ignore_case("cnot"));
    }

    #[test]
    fn test_downcast() {
        let cast = CastTable::default();
        assert_eq!(cast.downcast("CNOT").unwrap(), "X");
        assert_eq!(cast.downcast("CRY").unwrap(), "RY");
        assert_eq!(cast.downcast("XY").unwrap(), "RY");
        assert_eq!(cast.downcast("ZZ").unwrap(), "RZ");
        assert!(matches!(cast.downcast("SWAP"), Err(QStrError::InvalidCast(_))));
    }

    #[test]
    fn test_upcast() {
        let cast = CastTable::default();
        assert_eq!(cast.upcast("X"), Some("CNOT"));
        assert_eq!(cast.upcast("RZ"), Some("CRZ"));
        assert_eq!(cast.upcast("H"), None);
    }

    #[test]
    fn test_pauli_pair() {
        assert_eq!(pauli_pair("XZ"), Some(('X', 'Z')));
        assert_eq!(pauli_pair("XZY"), None);
        assert_eq!(pauli_pair("RX"), None);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GrammarConfig = serde_yaml_ng::from_str("precision: 2\n").unwrap();
        assert_eq!(config.precision, 2);
        assert_eq!(config.vocabulary, GateVocabulary::default());
        assert_eq!(config.placeholder_len, 4);
    }
}
