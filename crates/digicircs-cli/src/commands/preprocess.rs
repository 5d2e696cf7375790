//! Preprocess command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use digicircs_qstr::{NormalizeOptions, RandomSource, preprocess_circuit};

use super::common::{Settings, read_corpus, write_lines};

/// Execute the preprocess command.
pub fn execute(
    settings: &Settings,
    input: &Path,
    output: Option<&Path>,
    symbolic: bool,
    keep_controls: bool,
    seed: Option<u32>,
) -> Result<()> {
    let corpus = read_corpus(input)?;
    let options = NormalizeOptions {
        fix_params: !symbolic,
        remove_controls: !keep_controls,
    };
    let mut rng = RandomSource::new(seed);

    let canonical = corpus
        .iter()
        .enumerate()
        .map(|(i, circuit)| {
            preprocess_circuit(circuit, options, &settings.grammar, &mut rng)
                .with_context(|| format!("Circuit {} could not be normalized", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    write_lines(output, &canonical)?;
    eprintln!(
        "{} Normalized {} circuits",
        style("✓").green().bold(),
        canonical.len()
    );
    Ok(())
}
