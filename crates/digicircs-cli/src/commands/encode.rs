//! Encode command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use digicircs_ir::Circuit;
use digicircs_qstr::encode;

use super::common::{Settings, write_lines};

/// Execute the encode command.
pub fn execute(settings: &Settings, input: &Path) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("File not found: {}", input.display());
    }
    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read file: {}", input.display()))?;
    let circuit: Circuit = serde_json::from_str(&source)
        .with_context(|| format!("Invalid circuit file: {}", input.display()))?;

    let encoded = encode(&circuit, &settings.grammar)?;
    write_lines(None, [encoded])
}
