//! Stats command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use digicircs_encode::SymbolTables;
use digicircs_qstr::{count_gates, count_moments, count_parameterized};

use super::common::{Settings, read_corpus};

/// Execute the stats command.
pub fn execute(settings: &Settings, input: &Path) -> Result<()> {
    let corpus = read_corpus(input)?;
    let grammar = &settings.grammar;

    println!(
        "{:>6}  {:>6}  {:>6}  {:>7}",
        style("#").bold(),
        style("gates").bold(),
        style("params").bold(),
        style("moments").bold()
    );
    for (i, circuit) in corpus.iter().enumerate() {
        println!(
            "{:>6}  {:>6}  {:>6}  {:>7}",
            i + 1,
            count_gates(circuit),
            count_parameterized(circuit, grammar),
            count_moments(circuit, grammar)?
        );
    }

    let tables = SymbolTables::from_corpus(&corpus);
    println!();
    println!("Circuits:  {}", corpus.len());
    println!("Max gates: {}", tables.max_gates);
    println!("Qubits:    {}", tables.count_qubits());
    println!("Names:     {}", tables.names.symbols().join(", "));
    Ok(())
}
