//! Digicircs Circuit Intermediate Representation
//!
//! Core data structures for the circuits that the string codec reads and
//! writes: qubit indices, gates, parameter expressions, instructions and a
//! flat [`Circuit`] builder.
//!
//! # Example
//!
//! ```rust
//! use digicircs_ir::{Circuit, ParameterExpression, QubitId};
//!
//! let mut circuit = Circuit::with_size("example", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit
//!     .crx(ParameterExpression::symbol("Ab3x"), QubitId(0), QubitId(1))
//!     .unwrap();
//!
//! assert_eq!(circuit.len(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X`, `Y`, `Z`, `H` | 1 | Pauli and Hadamard gates |
//! | `S`, `Sdg`, `T`, `Tdg`, `SX` | 1 | Phase-type gates |
//! | `Rx`, `Ry`, `Rz`, `P`, `U` | 1 | Rotation gates |
//! | `CX`, `CY`, `CZ`, `CH` | 2 | Controlled Clifford gates |
//! | `CRx`, `CRy`, `CRz`, `CP` | 2 | Controlled rotations |
//! | `RXX`, `RYY`, `RZZ`, `Swap` | 2 | Two-qubit interactions |
//! | `ExpPauli` | n | Exponentiated Pauli string |
//! | `CCX` | 3 | Toffoli gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, Pauli, PauliString, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::ParameterExpression;
pub use qubit::QubitId;
