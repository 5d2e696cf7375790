//! Multi-hot encoding: the one-hot segments of a gate in one flat row.
//!
//! Row layout is `[names | targets | controls | param]`, the parameter
//! column only present when parameters are encoded.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, ArrayViewMut1, Axis, s};

use digicircs_qstr::CircuitString;

use crate::error::{EncodeError, EncodeResult};
use crate::onehot::{EncodeOptions, GateCode, argmax, decode_gate, to_codes};
use crate::symbols::SymbolTables;

/// Multi-hot encode a circuit string as a `(max_len, width)` matrix.
pub fn to_multi_hot(
    circuit: &CircuitString,
    max_len: usize,
    tables: &SymbolTables,
    options: &EncodeOptions,
) -> EncodeResult<(Vec<GateCode>, Array2<f64>)> {
    let codes = to_codes(circuit, max_len, tables, options)?;
    let mut out = Array2::zeros((max_len, tables.row_width(options.encode_params)));
    for (row, code) in out.outer_iter_mut().zip(&codes) {
        fill_row(row, code, tables)?;
    }
    Ok((codes, out))
}

fn fill_row(mut row: ArrayViewMut1<'_, f64>, code: &GateCode, tables: &SymbolTables) -> EncodeResult<()> {
    let mut offset = 0;
    for (index, width) in code.indices().into_iter().zip(tables.widths()) {
        if index >= width {
            return Err(EncodeError::ShapeMismatch {
                expected: format!("index below {width}"),
                found: index.to_string(),
            });
        }
        row[offset + index] = 1.0;
        offset += width;
    }
    if let Some(param) = code.param {
        row[offset] = param;
    }
    Ok(())
}

/// Decode a `(n_gates, width)` multi-hot matrix, noisy or not.
///
/// Each segment is read by its largest entry. Without encoded parameters
/// every gate gets the placeholder `nop{position}`.
pub fn from_multi_hot(
    mhe: ArrayView2<'_, f64>,
    tables: &SymbolTables,
    encode_params: bool,
) -> EncodeResult<CircuitString> {
    check_width(mhe.ncols(), tables, encode_params)?;
    let [n_names, n_targets, n_controls] = tables.widths();
    let bounds = [
        0,
        n_names,
        n_names + n_targets,
        n_names + n_targets + n_controls,
    ];

    mhe.outer_iter()
        .enumerate()
        .map(|(position, row)| {
            let mut indices = [0; 3];
            for (i, slot) in indices.iter_mut().enumerate() {
                *slot = argmax(row.slice(s![bounds[i]..bounds[i + 1]]));
            }
            let param = encode_params.then(|| row[bounds[3]]);
            decode_gate(indices, param, position, tables)
        })
        .collect()
}

fn check_width(found: usize, tables: &SymbolTables, encode_params: bool) -> EncodeResult<()> {
    let expected = tables.row_width(encode_params);
    if found != expected {
        return Err(EncodeError::ShapeMismatch {
            expected: format!("row width {expected}"),
            found: format!("row width {found}"),
        });
    }
    Ok(())
}

/// Encode a corpus as a `(n_circuits, max_gates, width)` tensor.
pub fn encode_batch(
    corpus: &[CircuitString],
    tables: &SymbolTables,
    options: &EncodeOptions,
) -> EncodeResult<Array3<f64>> {
    let width = tables.row_width(options.encode_params);
    let mut out = Array3::zeros((corpus.len(), tables.max_gates, width));
    for (mut slab, circuit) in out.outer_iter_mut().zip(corpus) {
        let (_, mhe) = to_multi_hot(circuit, tables.max_gates, tables, options)?;
        slab.assign(&mhe);
    }
    Ok(out)
}

/// Decode every circuit of a batch tensor.
pub fn decode_batch(
    tensor: ArrayView3<'_, f64>,
    tables: &SymbolTables,
    encode_params: bool,
) -> EncodeResult<Vec<CircuitString>> {
    check_width(tensor.len_of(Axis(2)), tables, encode_params)?;
    tensor
        .outer_iter()
        .map(|mhe| from_multi_hot(mhe, tables, encode_params))
        .collect()
}
