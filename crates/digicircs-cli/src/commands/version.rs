//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - reversible encodings of quantum circuits",
        style("Digicircs").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  digicircs-ir       Gate-level circuit representation");
    println!("  digicircs-compile  Decomposition passes");
    println!("  digicircs-qstr     Circuit-string grammar and codec");
    println!("  digicircs-encode   One-hot and multi-hot tensors");
    println!("  digicircs-gen      Random circuit generation");
    println!("  digicircs-cli      Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
