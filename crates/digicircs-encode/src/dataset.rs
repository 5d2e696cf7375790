//! Encoded datasets stored together with their symbol tables.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ndarray::{Array3, Axis};
use serde::{Deserialize, Serialize};
use tracing::info;

use digicircs_qstr::CircuitString;

use crate::error::{EncodeError, EncodeResult};
use crate::multihot::{decode_batch, encode_batch};
use crate::onehot::EncodeOptions;
use crate::symbols::SymbolTables;

/// A multi-hot tensor and the dictionaries that decode it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub tables: SymbolTables,
    pub options: EncodeOptions,
    /// Shape `(n_circuits, max_gates, row_width)`.
    pub tensor: Array3<f64>,
}

impl Dataset {
    /// Build dictionaries from `corpus` and encode every circuit.
    pub fn build(corpus: &[CircuitString], options: EncodeOptions) -> EncodeResult<Self> {
        let tables = SymbolTables::from_corpus(corpus);
        let tensor = encode_batch(corpus, &tables, &options)?;
        info!(
            "Encoded {} circuits into a tensor of shape {:?}",
            corpus.len(),
            tensor.dim()
        );
        Ok(Self {
            tables,
            options,
            tensor,
        })
    }

    /// Number of circuits.
    pub fn len(&self) -> usize {
        self.tensor.len_of(Axis(0))
    }

    /// Check whether the dataset holds no circuits.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode every circuit, padding included.
    pub fn decode(&self) -> EncodeResult<Vec<CircuitString>> {
        decode_batch(self.tensor.view(), &self.tables, self.options.encode_params)
    }

    fn validate(&self) -> EncodeResult<()> {
        let (_, gates, width) = self.tensor.dim();
        let expected = (self.tables.max_gates, self.tables.row_width(self.options.encode_params));
        if (gates, width) != expected {
            return Err(EncodeError::ShapeMismatch {
                expected: format!("(_, {}, {})", expected.0, expected.1),
                found: format!("{:?}", self.tensor.dim()),
            });
        }
        Ok(())
    }

    /// Write as JSON, replacing `path` atomically.
    pub fn save(&self, path: &Path) -> EncodeResult<()> {
        write_atomic(path, serde_json::to_string(self)?.as_bytes())
    }

    /// Read and check that the tensor matches the tables.
    pub fn load(path: &Path) -> EncodeResult<Self> {
        let dataset: Self = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        dataset.validate()?;
        Ok(dataset)
    }
}

/// Write `contents` to a sibling temp file, then rename it over `path`.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> EncodeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
