mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use form_validator::LogLevel;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "formcheck")]
#[command(version, about = "Check form snapshots against field validation configs", long_about = None)]
struct Cli {
    /// Lowest log level to print: debug, alpha, beta or publish
    #[arg(short, long, global = true, default_value = "beta")]
    verbosity: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a form snapshot; exits with status 1 if it is invalid
    Validate {
        #[command(flatten)]
        input: Input,

        /// Check every field instead of stopping at the first failure
        #[arg(short, long)]
        all: bool,
    },

    /// Print the resolved requirements and messages of every field as JSON
    Settings {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(clap::Args)]
pub struct Input {
    /// JSON snapshot of the form controls
    #[arg(short, long)]
    form: PathBuf,

    /// Field configuration (.toml or .json)
    #[arg(short, long)]
    config: PathBuf,

    /// Fail on unknown options, rejected overrides and unknown placeholders
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::init_tracing(cli.verbosity);

    match cli.command {
        Commands::Validate { input, all } => {
            if !commands::validate::execute(&input, cli.verbosity, all)? {
                std::process::exit(1);
            }
        }
        Commands::Settings { input } => {
            commands::settings::execute(&input, cli.verbosity)?;
        }
    }

    Ok(())
}
