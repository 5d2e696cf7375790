//! Digicircs Command-Line Interface
//!
//! Generates circuit-string corpora, converts between circuit strings and
//! circuits, and builds multi-hot datasets.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{common, dataset, decode, encode, generate, preprocess, stats, version};

/// Digicircs - reversible string and tensor encodings of quantum circuits
#[derive(Parser)]
#[command(name = "digicircs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (YAML)
    #[arg(short, long, global = true, env = "DIGICIRCS_CONFIG")]
    config: Option<PathBuf>,

    /// Random seed; the same seed reproduces the same output
    #[arg(long, global = true)]
    seed: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random circuit strings, one per line
    Generate {
        /// Number of circuits
        #[arg(short, long, default_value = "10")]
        count: usize,

        /// Number of qubits
        #[arg(short, long)]
        qubits: Option<u32>,

        /// Number of moments
        #[arg(short, long)]
        moments: Option<usize>,

        /// Exact number of parameterized gates
        #[arg(long)]
        params: Option<usize>,

        /// Parameter placement (early, random, late)
        #[arg(long)]
        strategy: Option<String>,

        /// Sample gates one by one instead of moment by moment
        #[arg(long)]
        scratch: bool,

        /// Write variable names instead of angles
        #[arg(long)]
        symbolic: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Bring circuit strings into canonical form
    Preprocess {
        /// Corpus file, one circuit string per line
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write variable names for missing angles
        #[arg(long)]
        symbolic: bool,

        /// Keep controls on one-qubit gates
        #[arg(long)]
        keep_controls: bool,
    },

    /// Decode a circuit string into a JSON circuit
    Decode {
        /// Circuit string
        circuit: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Encode a JSON circuit as a circuit string
    Encode {
        /// JSON circuit file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Build a multi-hot dataset from a corpus
    Dataset {
        /// Corpus file, one circuit string per line
        #[arg(short, long)]
        input: PathBuf,

        /// Dataset file (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Leave parameters out of the tensor
        #[arg(long)]
        no_params: bool,

        /// Also write the symbol tables to this file
        #[arg(long)]
        tables: Option<PathBuf>,
    },

    /// Print size statistics of a corpus
    Stats {
        /// Corpus file, one circuit string per line
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = common::load_settings(cli.config.as_deref()).and_then(|settings| {
        match cli.command {
            Commands::Generate {
                count,
                qubits,
                moments,
                params,
                strategy,
                scratch,
                symbolic,
                output,
            } => generate::execute(
                &settings,
                &generate::Request {
                    count,
                    qubits,
                    moments,
                    params,
                    strategy: strategy.as_deref(),
                    scratch,
                    symbolic,
                    seed: cli.seed,
                },
                output.as_deref(),
            ),

            Commands::Preprocess {
                input,
                output,
                symbolic,
                keep_controls,
            } => preprocess::execute(
                &settings,
                &input,
                output.as_deref(),
                symbolic,
                keep_controls,
                cli.seed,
            ),

            Commands::Decode { circuit, output } => {
                decode::execute(&settings, &circuit, output.as_deref(), cli.seed)
            }

            Commands::Encode { input } => encode::execute(&settings, &input),

            Commands::Dataset {
                input,
                output,
                no_params,
                tables,
            } => dataset::execute(&settings, &input, &output, no_params, tables.as_deref()),

            Commands::Stats { input } => stats::execute(&settings, &input),

            Commands::Version => {
                version::execute();
                Ok(())
            }
        }
    });

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
