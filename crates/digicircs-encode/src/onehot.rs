//! One-hot encoding of circuit strings.
//!
//! Each gate becomes three indicator vectors (name, target, control) and,
//! optionally, its numeric parameter. Circuits are padded at the end to a
//! fixed length with `nop` gates.

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use digicircs_qstr::{CircuitString, GateToken, NOP};

use crate::error::{EncodeError, EncodeResult};
use crate::symbols::{Field, SymbolTables};

/// Parameter value used for padding and for parameters that are not numbers.
pub const DEFAULT_FALLBACK_PARAM: f64 = 0.2;

/// How parameters are written into tensors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Append the parameter to every gate.
    pub encode_params: bool,
    /// Stand-in for padding and non-numeric parameters.
    pub fallback_param: f64,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            encode_params: true,
            fallback_param: DEFAULT_FALLBACK_PARAM,
        }
    }
}

/// Dictionary indices of one gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateCode {
    pub name: usize,
    pub target: usize,
    pub control: usize,
    pub param: Option<f64>,
}

impl GateCode {
    /// Name, target and control indices.
    pub fn indices(&self) -> [usize; 3] {
        [self.name, self.target, self.control]
    }
}

/// Indicator vectors of one gate.
#[derive(Debug, Clone, PartialEq)]
pub struct OneHotGate {
    pub name: Array1<f64>,
    pub target: Array1<f64>,
    pub control: Array1<f64>,
    pub param: Option<f64>,
}

impl OneHotGate {
    /// The three indicator vectors in field order.
    pub fn segments(&self) -> [&Array1<f64>; 3] {
        [&self.name, &self.target, &self.control]
    }

    /// Indicators concatenated, parameter last.
    pub fn to_row(&self) -> Array1<f64> {
        self.name
            .iter()
            .chain(&self.target)
            .chain(&self.control)
            .copied()
            .chain(self.param)
            .collect()
    }
}

/// Dictionary indices of every gate, padded to `max_len`.
///
/// Padding uses the `nop` index of each table, or index 0 for a table
/// without `nop`.
pub fn to_codes(
    circuit: &CircuitString,
    max_len: usize,
    tables: &SymbolTables,
    options: &EncodeOptions,
) -> EncodeResult<Vec<GateCode>> {
    if circuit.len() > max_len {
        return Err(EncodeError::TooManyGates {
            found: circuit.len(),
            max: max_len,
        });
    }

    let param_of = |token: &GateToken| {
        options.encode_params.then(|| {
            token
                .param
                .as_deref()
                .and_then(|p| p.parse::<f64>().ok())
                .unwrap_or(options.fallback_param)
        })
    };

    let mut codes = circuit
        .iter()
        .map(|token| {
            Ok(GateCode {
                name: tables.lookup(Field::Name, &Field::Name.symbol_of(token))?,
                target: tables.lookup(Field::Target, &Field::Target.symbol_of(token))?,
                control: tables.lookup(Field::Control, &Field::Control.symbol_of(token))?,
                param: param_of(token),
            })
        })
        .collect::<EncodeResult<Vec<_>>>()?;

    let padding = GateCode {
        name: tables.names.index_of(NOP).unwrap_or(0),
        target: tables.targets.index_of(NOP).unwrap_or(0),
        control: tables.controls.index_of(NOP).unwrap_or(0),
        param: options.encode_params.then_some(options.fallback_param),
    };
    codes.resize(max_len, padding);
    Ok(codes)
}

fn indicator(width: usize, index: usize, field: Field) -> EncodeResult<Array1<f64>> {
    if index >= width {
        return Err(EncodeError::ShapeMismatch {
            expected: format!("{} index below {width}", field.as_str()),
            found: index.to_string(),
        });
    }
    let mut v = Array1::zeros(width);
    v[index] = 1.0;
    Ok(v)
}

/// One-hot encode a circuit string, padded to `max_len`.
///
/// Returns the dictionary indices alongside the indicator vectors.
pub fn to_one_hot(
    circuit: &CircuitString,
    max_len: usize,
    tables: &SymbolTables,
    options: &EncodeOptions,
) -> EncodeResult<(Vec<GateCode>, Vec<OneHotGate>)> {
    let codes = to_codes(circuit, max_len, tables, options)?;
    let [n_names, n_targets, n_controls] = tables.widths();
    let gates = codes
        .iter()
        .map(|code| {
            Ok(OneHotGate {
                name: indicator(n_names, code.name, Field::Name)?,
                target: indicator(n_targets, code.target, Field::Target)?,
                control: indicator(n_controls, code.control, Field::Control)?,
                param: code.param,
            })
        })
        .collect::<EncodeResult<Vec<_>>>()?;
    Ok((codes, gates))
}

/// Decode one-hot gates back into a circuit string.
///
/// Each indicator is read by its largest entry. Gates without a parameter
/// get the placeholder `nop{position}`. Padding gates are kept.
pub fn from_one_hot(gates: &[OneHotGate], tables: &SymbolTables) -> EncodeResult<CircuitString> {
    let widths = tables.widths();
    gates
        .iter()
        .enumerate()
        .map(|(position, gate)| {
            let mut indices = [0; 3];
            for ((slot, segment), (field, width)) in indices
                .iter_mut()
                .zip(gate.segments())
                .zip(Field::ALL.into_iter().zip(widths))
            {
                if segment.len() != width {
                    return Err(EncodeError::ShapeMismatch {
                        expected: format!("{} segment of width {width}", field.as_str()),
                        found: segment.len().to_string(),
                    });
                }
                *slot = argmax(segment.view());
            }
            decode_gate(indices, gate.param, position, tables)
        })
        .collect()
}

/// Index of the first largest entry.
pub(crate) fn argmax(values: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// Rebuild a token from its indices.
pub(crate) fn decode_gate(
    indices: [usize; 3],
    param: Option<f64>,
    position: usize,
    tables: &SymbolTables,
) -> EncodeResult<GateToken> {
    let mut symbols = [""; 3];
    for ((symbol, index), field) in symbols.iter_mut().zip(indices).zip(Field::ALL) {
        *symbol = tables
            .table(field)
            .symbol(index)
            .ok_or_else(|| EncodeError::ShapeMismatch {
                expected: format!("{} index below {}", field.as_str(), tables.table(field).len()),
                found: index.to_string(),
            })?;
    }
    let param = match param {
        Some(p) => p.to_string(),
        None => format!("{NOP}{position}"),
    };
    let [name, target, control] = symbols;
    Ok(format!("{name}={target}={control}={param}").parse::<GateToken>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn setup() -> (CircuitString, SymbolTables) {
        let circuit: CircuitString = "H=0=nop=nop@X=1=nop=nop@RX=1=0=0.1@XY=0=3=0.2@RY=0=1=0.2"
            .parse()
            .unwrap();
        let tables = SymbolTables::from_corpus([&circuit]);
        (circuit, tables)
    }

    #[test]
    fn test_decimal_codes_and_padding() {
        let (circuit, tables) = setup();
        let codes = to_codes(&circuit, 7, &tables, &EncodeOptions::default()).unwrap();
        assert_eq!(codes.len(), 7);

        // names: H, RX, RY, X, XY, nop
        assert_eq!(codes[0].name, 0);
        assert_eq!(codes[0].param, Some(DEFAULT_FALLBACK_PARAM));
        assert_eq!(codes[2].param, Some(0.1));

        let pad = codes[6];
        assert_eq!(tables.names.symbol(pad.name), Some(NOP));
        assert_eq!(pad.target, 0);
        assert_eq!(tables.controls.symbol(pad.control), Some(NOP));
    }

    #[test]
    fn test_one_hot_vectors() {
        let (circuit, tables) = setup();
        let (_, gates) = to_one_hot(&circuit, 5, &tables, &EncodeOptions::default()).unwrap();
        assert_eq!(gates[0].name, array![1., 0., 0., 0., 0., 0.]);
        assert_eq!(gates[0].target, array![1., 0.]);
        assert_eq!(gates[3].control, array![0., 0., 1., 0.]);
        assert_eq!(gates[3].param, Some(0.2));
    }

    #[test]
    fn test_round_trip_with_params() {
        let (circuit, tables) = setup();
        let (_, gates) = to_one_hot(&circuit, 6, &tables, &EncodeOptions::default()).unwrap();
        let decoded = from_one_hot(&gates, &tables).unwrap();
        assert_eq!(
            decoded.to_string(),
            "H=0=nop=0.2@X=1=nop=0.2@RX=1=0=0.1@XY=0=3=0.2@RY=0=1=0.2@nop=0=nop=0.2"
        );
    }

    #[test]
    fn test_round_trip_without_params() {
        let (circuit, tables) = setup();
        let options = EncodeOptions {
            encode_params: false,
            ..EncodeOptions::default()
        };
        let (_, gates) = to_one_hot(&circuit, 5, &tables, &options).unwrap();
        let decoded = from_one_hot(&gates, &tables).unwrap();
        assert_eq!(
            decoded.to_string(),
            "H=0=nop=nop0@X=1=nop=nop1@RX=1=0=nop2@XY=0=3=nop3@RY=0=1=nop4"
        );
    }

    #[test]
    fn test_too_many_gates() {
        let (circuit, tables) = setup();
        let err = to_codes(&circuit, 3, &tables, &EncodeOptions::default()).unwrap_err();
        assert!(matches!(err, EncodeError::TooManyGates { found: 5, max: 3 }));
    }

    #[test]
    fn test_unknown_symbol() {
        let (_, tables) = setup();
        let other: CircuitString = "CRZ=0=1=0.5".parse().unwrap();
        let err = to_codes(&other, 5, &tables, &EncodeOptions::default()).unwrap_err();
        assert!(matches!(err, EncodeError::UnknownSymbol { field: "name", .. }));
    }

    #[test]
    fn test_argmax_picks_first_maximum() {
        assert_eq!(argmax(array![0.1, 0.9, 0.9].view()), 1);
        assert_eq!(argmax(array![0.0, 0.0].view()), 0);
    }
}
