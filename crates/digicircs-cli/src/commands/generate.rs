//! Generate command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use digicircs_gen::{GeneratorConfig, ScratchOptions, circuit_from_scratch, generate};
use digicircs_qstr::RandomSource;

use super::common::{Settings, progress, write_lines};

/// Command-line overrides of the generator settings.
pub struct Request<'a> {
    pub count: usize,
    pub qubits: Option<u32>,
    pub moments: Option<usize>,
    pub params: Option<usize>,
    pub strategy: Option<&'a str>,
    pub scratch: bool,
    pub symbolic: bool,
    pub seed: Option<u32>,
}

impl Request<'_> {
    /// Apply the overrides to `base`.
    pub fn apply(&self, base: &GeneratorConfig) -> Result<GeneratorConfig> {
        let mut config = base.clone();
        if let Some(qubits) = self.qubits {
            config.n_qubits = qubits;
        }
        if let Some(moments) = self.moments {
            config.n_moments = moments;
        }
        if self.params.is_some() {
            config.n_params = self.params;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.parse()?;
        }
        if self.symbolic {
            config.fix_params = false;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

/// Execute the generate command.
pub fn execute(settings: &Settings, request: &Request<'_>, output: Option<&Path>) -> Result<()> {
    let config = request.apply(&settings.generator)?;
    let mut rng = RandomSource::new(config.seed);

    eprintln!(
        "{} Generating {} circuits on {} qubits",
        style("→").cyan().bold(),
        style(request.count).green(),
        style(config.n_qubits).yellow()
    );

    let scratch = ScratchOptions {
        max_distance: config.max_distance,
        fix_params: config.fix_params,
        precision: settings.grammar.precision,
        ..ScratchOptions::default()
    };

    let bar = progress(request.count, "generating")?;
    let mut corpus = Vec::with_capacity(request.count);
    let mut total_params = 0;
    for _ in 0..request.count {
        let (circuit, n_params) = if request.scratch {
            circuit_from_scratch(config.n_qubits, &scratch, &config.pool, &mut rng)?
        } else {
            generate(&config, &settings.grammar, &mut rng)?
        };
        total_params += n_params;
        corpus.push(circuit);
        bar.inc(1);
    }
    bar.finish_and_clear();

    write_lines(output, &corpus)?;
    eprintln!(
        "{} Generated {} circuits with {} parameters",
        style("✓").green().bold(),
        corpus.len(),
        total_params
    );
    Ok(())
}
