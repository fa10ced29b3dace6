//! Command-line interface for digilib.
//!
//! Starts the interactive catalog console, or prints the resolved
//! configuration.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{load_config, ResolvedConfig};
use crate::library::Catalog;

pub mod console;

pub use console::{Console, MenuChoice};

/// digilib - In-memory library catalog
#[derive(Parser, Debug)]
#[command(name = "digilib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to .digilib/config.yaml in this or a parent directory)
    #[arg(short, long, env = "DIGILIB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive catalog (default)
    Run,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;

        match self.command.unwrap_or(Commands::Run) {
            Commands::Run => run_console(config),
            Commands::Config => show_config(&config),
        }
    }
}

/// Run the menu loop on stdin/stdout with a fresh catalog
fn run_console(config: ResolvedConfig) -> Result<()> {
    tracing::info!(
        default_category = %config.default_category,
        "starting catalog console"
    );

    let mut catalog = Catalog::with_default_category(config.default_category);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), config.console);

    console.run(&mut catalog)
}

/// Print the resolved configuration as YAML
fn show_config(config: &ResolvedConfig) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Failed to render configuration")?;
    print!("{}", yaml);
    Ok(())
}
