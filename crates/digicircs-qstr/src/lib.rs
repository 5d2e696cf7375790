//! Circuit-String Grammar and Codec for Digicircs
//!
//! A circuit string is an ordered list of gate tokens of the form
//! `name=target=control=param`, joined by `@`. Absent fields are written `nop`.
//! This crate parses and prints the grammar, brings tokens into canonical
//! form, and converts between circuit strings and [`digicircs_ir::Circuit`].
//!
//! # Canonical Form
//!
//! | Token | Canonical |
//! |-------|-----------|
//! | `CNOT=0=0=0.1` | `X=0=nop=nop` |
//! | `XY=2=nop=0.3` | `RY=2=nop=0.3` |
//! | `H=1=nop=0.5` | `H=1=nop=nop` |
//! | `RX=0=1=nop` | `RX=0=nop=<sampled angle or variable>` |
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use digicircs_qstr::{GrammarConfig, NormalizeOptions, RandomSource, decode_str, encode};
//!
//! let config = GrammarConfig::default();
//! let mut rng = RandomSource::seeded(0);
//!
//! let text = "H=0=nop=nop@CRX=1=0=0.1@XY=0=3=0.2";
//! let circuit = decode_str(text, NormalizeOptions::default(), &config, &mut rng).unwrap();
//! assert_eq!(circuit.num_qubits(), 4);
//!
//! let encoded = encode(&circuit, &config).unwrap();
//! assert_eq!(encoded.to_string(), text);
//! ```
//!
//! # Randomness
//!
//! Every stochastic operation takes a [`RandomSource`]. A seeded source
//! restarts from its seed before each draw site, so results do not depend on
//! how many draws happened earlier.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod random;
pub mod token;

pub use config::{CastTable, GateClass, GateVocabulary, GrammarConfig, NOP};
pub use decoder::{GateKind, decode, decode_str};
pub use encoder::{encode, encode_instruction};
pub use error::{QStrError, QStrResult};
pub use metrics::{count_cnots, count_gates, count_moments, count_parameterized};
pub use normalize::{NormalizeOptions, fresh_param, normalize_token, preprocess_circuit};
pub use random::RandomSource;
pub use token::{CircuitString, GateToken};
