//! Shared helpers for CLI commands.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use digicircs_encode::EncodeOptions;
use digicircs_gen::GeneratorConfig;
use digicircs_qstr::{CircuitString, GrammarConfig};

/// Contents of the YAML settings file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grammar: GrammarConfig,
    pub generator: GeneratorConfig,
    pub encode: EncodeOptions,
}

/// Default settings path (`<config dir>/digicircs/config.yaml`).
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("digicircs").join("config.yaml"))
}

/// Load settings from `path`, else from the default path if it exists, else
/// use defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_settings_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => return Ok(Settings::default()),
        },
    };
    debug!("Loading settings from {}", path.display());
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    serde_yaml_ng::from_str(&source)
        .with_context(|| format!("Invalid settings file: {}", path.display()))
}

/// Read a corpus: one circuit string per line, blank lines and `#` comments
/// skipped.
pub fn read_corpus(path: &Path) -> Result<Vec<CircuitString>> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    source
        .lines()
        .enumerate()
        .map(|(i, line)| (i, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(i, line)| {
            line.parse()
                .with_context(|| format!("{}:{}: invalid circuit string", path.display(), i + 1))
        })
        .collect()
}

/// Write `lines` to `output`, or to stdout.
pub fn write_lines<I>(output: Option<&Path>, lines: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    let mut text = String::new();
    for line in lines {
        text.push_str(&line.to_string());
        text.push('\n');
    }
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write file: {}", path.display())),
        None => std::io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout"),
    }
}

/// A progress bar over `len` items, drawn on stderr.
pub fn progress(len: usize, message: &'static str) -> Result<ProgressBar> {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    bar.set_message(message);
    Ok(bar)
}
