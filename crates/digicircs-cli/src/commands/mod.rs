//! CLI command implementations.

pub mod common;
pub mod dataset;
pub mod decode;
pub mod encode;
pub mod generate;
pub mod preprocess;
pub mod stats;
pub mod version;
