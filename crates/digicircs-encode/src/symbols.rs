//! Symbol scanning and dictionaries.
//!
//! A corpus of circuit strings is scanned into three symbol sets (gate names,
//! targets, controls). Each set becomes a [`SymbolTable`], a bijection between
//! symbols and dense indices. Name and control tables always contain `nop`,
//! so padding can be represented; the target table does not.
//!
//! Indices are assigned in sorted symbol order. Tables must still be stored
//! next to every tensor they encoded, since a different corpus gives
//! different indices.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use digicircs_qstr::{CircuitString, GateToken, NOP};

use crate::dataset::write_atomic;
use crate::error::{EncodeError, EncodeResult};

/// One of the three symbolic fields of a gate token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Target,
    Control,
}

impl Field {
    /// All fields in token order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Target, Field::Control];

    /// Lower-case field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Target => "target",
            Field::Control => "control",
        }
    }

    /// The symbol this field has in `token`.
    pub fn symbol_of(self, token: &GateToken) -> String {
        let qubit = |q: Option<u32>| q.map_or_else(|| NOP.to_string(), |q| q.to_string());
        match self {
            Field::Name => token.name.clone(),
            Field::Target => qubit(token.target),
            Field::Control => qubit(token.control),
        }
    }
}

/// Raw symbols seen in a corpus, plus the longest circuit length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSets {
    pub names: BTreeSet<String>,
    pub targets: BTreeSet<String>,
    pub controls: BTreeSet<String>,
    pub max_gates: usize,
}

impl SymbolSets {
    /// Scan a corpus.
    pub fn scan<'a>(corpus: impl IntoIterator<Item = &'a CircuitString>) -> Self {
        let mut sets = Self::default();
        for circuit in corpus {
            sets.add(circuit);
        }
        sets
    }

    /// Add the symbols of one circuit.
    pub fn add(&mut self, circuit: &CircuitString) {
        for token in circuit {
            self.names.insert(Field::Name.symbol_of(token));
            self.targets.insert(Field::Target.symbol_of(token));
            self.controls.insert(Field::Control.symbol_of(token));
        }
        self.max_gates = self.max_gates.max(circuit.len());
    }
}

/// Bijection between symbols and `0..len`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTable", into = "StoredTable")]
pub struct SymbolTable {
    index: FxHashMap<String, usize>,
    symbols: Vec<String>,
}

impl SymbolTable {
    /// Assign indices in iteration order, skipping repeats.
    pub fn from_symbols(symbols: impl IntoIterator<Item = String>) -> Self {
        let mut table = Self {
            index: FxHashMap::default(),
            symbols: Vec::new(),
        };
        for symbol in symbols {
            if !table.index.contains_key(&symbol) {
                table.index.insert(symbol.clone(), table.symbols.len());
                table.symbols.push(symbol);
            }
        }
        table
    }

    /// Index of `symbol`.
    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.index.get(symbol).copied()
    }

    /// Symbol at `index`.
    pub fn symbol(&self, index: usize) -> Option<&str> {
        self.symbols.get(index).map(String::as_str)
    }

    /// Symbols in index order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Check whether `symbol` is in the table.
    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Persisted form: the forward map and its reverse.
#[derive(Serialize, Deserialize)]
struct StoredTable {
    forward: BTreeMap<String, usize>,
    reverse: BTreeMap<usize, String>,
}

impl From<SymbolTable> for StoredTable {
    fn from(table: SymbolTable) -> Self {
        Self {
            forward: table.index.into_iter().collect(),
            reverse: table.symbols.into_iter().enumerate().collect(),
        }
    }
}

impl TryFrom<StoredTable> for SymbolTable {
    type Error = EncodeError;

    fn try_from(stored: StoredTable) -> Result<Self, Self::Error> {
        if stored.forward.len() != stored.reverse.len() {
            return Err(EncodeError::CorruptDictionary(format!(
                "{} forward entries but {} reverse entries",
                stored.forward.len(),
                stored.reverse.len()
            )));
        }
        let mut symbols = Vec::with_capacity(stored.reverse.len());
        for (expected, (index, symbol)) in stored.reverse.into_iter().enumerate() {
            if index != expected {
                return Err(EncodeError::CorruptDictionary(format!(
                    "reverse indices are not dense, missing {expected}"
                )));
            }
            if stored.forward.get(&symbol) != Some(&index) {
                return Err(EncodeError::CorruptDictionary(format!(
                    "symbol '{symbol}' maps to {:?} but is stored at {index}",
                    stored.forward.get(&symbol)
                )));
            }
            symbols.push(symbol);
        }
        Ok(Self::from_symbols(symbols))
    }
}

/// The three dictionaries of a corpus and its padded circuit length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTables {
    pub names: SymbolTable,
    pub targets: SymbolTable,
    pub controls: SymbolTable,
    pub max_gates: usize,
}

impl SymbolTables {
    /// Build dictionaries from scanned symbols, adding `nop` to the name and
    /// control tables.
    pub fn build(mut sets: SymbolSets) -> Self {
        sets.names.insert(NOP.to_string());
        sets.controls.insert(NOP.to_string());
        let tables = Self {
            names: SymbolTable::from_symbols(sets.names),
            targets: SymbolTable::from_symbols(sets.targets),
            controls: SymbolTable::from_symbols(sets.controls),
            max_gates: sets.max_gates,
        };
        debug!(
            "Built symbol tables: {} names, {} targets, {} controls, max {} gates",
            tables.names.len(),
            tables.targets.len(),
            tables.controls.len(),
            tables.max_gates
        );
        tables
    }

    /// Scan a corpus and build its dictionaries.
    pub fn from_corpus<'a>(corpus: impl IntoIterator<Item = &'a CircuitString>) -> Self {
        Self::build(SymbolSets::scan(corpus))
    }

    /// The table of `field`.
    pub fn table(&self, field: Field) -> &SymbolTable {
        match field {
            Field::Name => &self.names,
            Field::Target => &self.targets,
            Field::Control => &self.controls,
        }
    }

    /// Index of `symbol` in the table of `field`.
    pub fn lookup(&self, field: Field, symbol: &str) -> EncodeResult<usize> {
        self.table(field)
            .index_of(symbol)
            .ok_or_else(|| EncodeError::UnknownSymbol {
                field: field.as_str(),
                symbol: symbol.to_string(),
            })
    }

    /// Widths of the name, target and control segments.
    pub fn widths(&self) -> [usize; 3] {
        [self.names.len(), self.targets.len(), self.controls.len()]
    }

    /// Width of one multi-hot row.
    pub fn row_width(&self, encode_params: bool) -> usize {
        self.widths().iter().sum::<usize>() + usize::from(encode_params)
    }

    /// Number of qubits implied by the numeric target and control symbols.
    pub fn count_qubits(&self) -> usize {
        self.targets
            .symbols()
            .iter()
            .chain(self.controls.symbols())
            .filter_map(|s| s.parse::<usize>().ok())
            .max()
            .map_or(0, |q| q.saturating_add(1))
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> EncodeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate JSON.
    pub fn from_json(json: &str) -> EncodeResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                EncodeError::CorruptDictionary(e.to_string())
            } else {
                EncodeError::Json(e)
            }
        })
    }

    /// Write to `path`, replacing it atomically.
    pub fn save(&self, path: &Path) -> EncodeResult<()> {
        write_atomic(path, self.to_json()?.as_bytes())
    }

    /// Read from `path`.
    pub fn load(path: &Path) -> EncodeResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<CircuitString> {
        [
            "H=0=nop=nop@X=1=nop=nop@RX=1=0=0.1@XX=0=3=0.2@XY=0=1=0.2",
            "Y=0=nop=nop@X=1=nop=nop@RY=1=0=0.1@ZZ=0=3=0.2",
        ]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect()
    }

    #[test]
    fn test_scan() {
        let sets = SymbolSets::scan(&corpus());
        let names: Vec<&str> = sets.names.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["H", "RX", "RY", "X", "XX", "XY", "Y", "ZZ"]);
        assert_eq!(sets.targets.len(), 2);
        assert!(sets.controls.contains("nop"));
        assert_eq!(sets.max_gates, 5);
    }

    #[test]
    fn test_nop_is_always_present() {
        let corpus: Vec<CircuitString> = vec!["CNOT=0=1=nop".parse().unwrap()];
        let tables = SymbolTables::from_corpus(&corpus);
        assert!(tables.names.contains(NOP));
        assert!(tables.controls.contains(NOP));
        assert!(!tables.targets.contains(NOP));
    }

    #[test]
    fn test_lookup_unknown_symbol() {
        let tables = SymbolTables::from_corpus(&corpus());
        assert_eq!(tables.lookup(Field::Target, "1").unwrap(), 1);
        let err = tables.lookup(Field::Name, "CRZ").unwrap_err();
        assert!(matches!(err, EncodeError::UnknownSymbol { field: "name", .. }));
    }

    #[test]
    fn test_count_qubits() {
        let tables = SymbolTables::from_corpus(&corpus());
        assert_eq!(tables.count_qubits(), 4);
        assert_eq!(tables.row_width(true), 9 + 2 + 4 + 1);
    }

    #[test]
    fn test_count_qubits_saturates() {
        let mut sets = SymbolSets::default();
        sets.targets.insert(usize::MAX.to_string());
        let tables = SymbolTables::build(sets);
        assert_eq!(tables.count_qubits(), usize::MAX);
    }

    #[test]
    fn test_json_round_trip() {
        let tables = SymbolTables::from_corpus(&corpus());
        let back = SymbolTables::from_json(&tables.to_json().unwrap()).unwrap();
        assert_eq!(back, tables);
    }

    #[test]
    fn test_corrupt_dictionary_is_rejected() {
        let json = r#"{
            "names": {"forward": {"H": 0, "nop": 1}, "reverse": {"0": "H", "1": "X"}},
            "targets": {"forward": {"0": 0}, "reverse": {"0": "0"}},
            "controls": {"forward": {"nop": 0}, "reverse": {"0": "nop"}},
            "max_gates": 1
        }"#;
        let err = SymbolTables::from_json(json).unwrap_err();
        assert!(matches!(err, EncodeError::CorruptDictionary(_)));
    }
}
