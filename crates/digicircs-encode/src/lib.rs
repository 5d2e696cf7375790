//! Tensor Encodings of Circuit Strings for Digicircs
//!
//! This crate turns a corpus of circuit strings into fixed-shape numeric
//! tensors and back:
//!
//! - [`SymbolTables`]: three dictionaries (gate names, targets, controls)
//!   scanned from a corpus. Name and control tables always contain `nop`.
//! - [`to_one_hot`] / [`from_one_hot`]: per-gate indicator vectors.
//! - [`to_multi_hot`] / [`from_multi_hot`]: the same vectors as one flat row
//!   per gate, `[names | targets | controls | param]`.
//! - [`add_noise`] / [`remove_noise`]: uniform noise on indicator cells.
//! - [`Dataset`]: a batch tensor persisted with the tables that decode it.
//!
//! # Example
//!
//! ```rust
//! use digicircs_encode::{EncodeOptions, SymbolTables, from_multi_hot, to_multi_hot};
//! use digicircs_qstr::CircuitString;
//!
//! let circuit: CircuitString = "H=0=nop=nop@RX=1=0=0.1".parse().unwrap();
//! let tables = SymbolTables::from_corpus([&circuit]);
//!
//! let (_, mhe) = to_multi_hot(&circuit, 3, &tables, &EncodeOptions::default()).unwrap();
//! assert_eq!(mhe.nrows(), 3);
//!
//! let decoded = from_multi_hot(mhe.view(), &tables, true).unwrap();
//! assert_eq!(decoded.to_string(), "H=0=nop=0.2@RX=1=0=0.1@nop=0=nop=0.2");
//! ```
//!
//! Dictionaries depend on the corpus they were scanned from. Keep them next
//! to every tensor they encoded.

pub mod dataset;
pub mod error;
pub mod multihot;
pub mod noise;
pub mod onehot;
pub mod symbols;

pub use dataset::Dataset;
pub use error::{EncodeError, EncodeResult};
pub use multihot::{decode_batch, encode_batch, from_multi_hot, to_multi_hot};
pub use noise::{add_noise, remove_noise};
pub use onehot::{
    DEFAULT_FALLBACK_PARAM, EncodeOptions, GateCode, OneHotGate, from_one_hot, to_codes,
    to_one_hot,
};
pub use symbols::{Field, SymbolSets, SymbolTable, SymbolTables};
