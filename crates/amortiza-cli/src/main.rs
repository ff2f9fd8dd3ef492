//! Amortiza CLI - Command-line interface for the Brazilian fixed-income
//! amortization engine.
//!
//! # Usage
//!
//! ```bash
//! # Run a bullet operation described in a request file
//! amortiza run --file operation.yaml
//!
//! # Same, rendered as JSON
//! amortiza run --file operation.json --format json
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod error;
mod output;
mod request;
mod rows;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args, format)?,
    }

    Ok(())
}
