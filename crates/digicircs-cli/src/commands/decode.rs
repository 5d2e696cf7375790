//! Decode command implementation.

use std::path::Path;

use anyhow::{Context, Result};

use digicircs_qstr::{NormalizeOptions, RandomSource, decode_str};

use super::common::{Settings, write_lines};

/// Execute the decode command.
pub fn execute(settings: &Settings, text: &str, output: Option<&Path>, seed: Option<u32>) -> Result<()> {
    let mut rng = RandomSource::new(seed);
    let circuit = decode_str(text, NormalizeOptions::default(), &settings.grammar, &mut rng)?;
    let json = serde_json::to_string_pretty(&circuit).context("Failed to serialize circuit")?;
    write_lines(output, [json])
}
