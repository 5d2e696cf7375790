//! Random Circuit Generation for Digicircs
//!
//! Circuits are generated in three stages:
//!
//! 1. [`gen_topology`]: moments of disjoint one- and two-qubit slots.
//! 2. [`gen_gates`] or [`gen_gates_fixed_params`]: gate names for the slots.
//! 3. [`add_params`]: sampled angles or variable names.
//!
//! [`generate`] runs all three from a [`GeneratorConfig`].
//! [`circuit_from_scratch`] skips the topology and samples gates one by one.
//!
//! # Example
//!
//! ```rust
//! use digicircs_gen::{GeneratorConfig, generate};
//! use digicircs_qstr::{GrammarConfig, RandomSource};
//!
//! let config = GeneratorConfig { n_qubits: 5, n_moments: 3, ..GeneratorConfig::default() };
//! let mut rng = RandomSource::seeded(42);
//! let (circuit, n_params) = generate(&config, &GrammarConfig::default(), &mut rng).unwrap();
//! assert!(circuit.len() <= 15);
//! assert!(n_params <= circuit.len());
//! ```
//!
//! A seeded [`RandomSource`](digicircs_qstr::RandomSource) restarts before
//! each draw site, so every moment of a seeded topology comes out the same.

pub mod error;
pub mod gates;
pub mod params;
pub mod pipeline;
pub mod scratch;
pub mod topology;

pub use error::{GenError, GenResult};
pub use gates::{
    DEFAULT_GATE_WEIGHTS, ParamBudget, Strategy, gen_circuit_gates, gen_gates,
    gen_gates_fixed_params, gen_gates_one_moment,
};
pub use params::{ParamSource, add_params};
pub use pipeline::{GeneratorConfig, generate, generate_corpus};
pub use scratch::{ScratchOptions, circuit_from_scratch};
pub use topology::{
    DEFAULT_CLASS_WEIGHTS, Moment, Topology, TopologyOptions, gen_moment, gen_topology,
};
