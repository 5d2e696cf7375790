//! Dataset command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use digicircs_encode::{Dataset, EncodeOptions};

use super::common::{Settings, read_corpus};

/// Execute the dataset command.
pub fn execute(
    settings: &Settings,
    input: &Path,
    output: &Path,
    no_params: bool,
    tables: Option<&Path>,
) -> Result<()> {
    let corpus = read_corpus(input)?;
    eprintln!(
        "{} Encoding {} circuits from {}",
        style("→").cyan().bold(),
        style(corpus.len()).green(),
        style(input.display()).yellow()
    );

    let options = EncodeOptions {
        encode_params: settings.encode.encode_params && !no_params,
        ..settings.encode
    };
    let dataset = Dataset::build(&corpus, options)?;
    dataset.save(output)?;
    if let Some(path) = tables {
        dataset.tables.save(path)?;
    }

    let (n, gates, width) = dataset.tensor.dim();
    println!("{} Dataset written", style("✓").green().bold());
    println!("  Shape:   ({n}, {gates}, {width})");
    println!(
        "  Symbols: {} names, {} targets, {} controls",
        dataset.tables.names.len(),
        dataset.tables.targets.len(),
        dataset.tables.controls.len()
    );
    println!("  Output:  {}", style(output.display()).green());
    Ok(())
}
