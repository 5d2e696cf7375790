//! Digicircs Decomposition Framework
//!
//! Lowers circuits to the gate shapes that the circuit-string grammar can
//! carry: one target, at most one control, at most one angle. The string
//! encoder falls back to this crate when a circuit contains anything else.
//!
//! # Architecture
//!
//! ```text
//! Input Circuit
//!       |
//!       v
//! +-------------+
//! | PassManager |  <-- DecompositionOptions
//! +-------------+
//!       |
//!       +-- ExpandPauliRotations
//!       +-- DecomposeControlled
//!       +-- DecomposePhases
//!       +-- RejectCustomGates
//!       |
//!       v
//! Output Circuit (CX, controlled rotations, 1q rotations, H)
//! ```
//!
//! # Example
//!
//! ```rust
//! use digicircs_compile::{DecompositionOptions, PassManager};
//! use digicircs_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("toffoli", 3);
//! circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
//!
//! let pm = PassManager::decomposition(&DecompositionOptions::default());
//! pm.run(&mut circuit).unwrap();
//!
//! assert!(circuit.instructions().iter().all(|i| i.num_qubits() <= 2));
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;

pub use error::{CompileError, CompileResult};
pub use manager::{DecompositionOptions, PassManager};
pub use pass::Pass;
pub use passes::{DecomposeControlled, DecomposePhases, ExpandPauliRotations, RejectCustomGates};
