pub mod settings;
pub mod validate;

use crate::Input;
use anyhow::{Context, Result};
use colored::Colorize;
use form_validator::{Document, FormConfig, FormValidator, LogLevel};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Send library logs to stderr. `RUST_LOG` wins over `--verbosity`.
pub fn init_tracing(verbosity: LogLevel) {
    let level = match verbosity {
        LogLevel::Debug => "trace",
        LogLevel::Alpha => "debug",
        LogLevel::Beta => "info",
        LogLevel::Publish => "warn",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("form_validator={0},formcheck={0}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension; anything but `.json` is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    pub fn parse(self, text: &str) -> form_validator::Result<FormConfig> {
        match self {
            ConfigFormat::Toml => FormConfig::from_toml_str(text),
            ConfigFormat::Json => FormConfig::from_json_str(text),
        }
    }
}

pub fn load_document(path: &Path) -> Result<Document> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read form snapshot {}", path.display()))?;
    Document::from_json_str(&json)
        .with_context(|| format!("Invalid form snapshot {}", path.display()))
}

pub fn load_config(path: &Path) -> Result<FormConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let format = ConfigFormat::from_path(path);
    tracing::debug!(?format, path = %path.display(), "Loading config");
    format
        .parse(&text)
        .with_context(|| format!("Invalid config {}", path.display()))
}

/// Load both inputs and build the validator, printing any diagnostics
pub fn build(input: &Input, verbosity: LogLevel) -> Result<(Document, FormValidator)> {
    let document = load_document(&input.form)?;
    let config = load_config(&input.config)?;

    let form = FormValidator::builder()
        .verbosity(verbosity)
        .strict(input.strict)
        .build(&document, &config)
        .context("Configuration rejected in strict mode")?;

    for diagnostic in form.diagnostics() {
        eprintln!("{} {}", "warning:".yellow().bold(), diagnostic);
    }

    Ok((document, form))
}
