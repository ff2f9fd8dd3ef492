//! The `run` command: loads a structured operation description and prints
//! the resulting payment schedule or daily-return series.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_output, print_single};
use crate::request::{OperationSpec, RunOutput};
use crate::rows::{DailyReturnRow, PaymentRow};

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a JSON or YAML operation description.
    #[arg(long)]
    pub file: PathBuf,
}

fn parse_spec(path: &PathBuf) -> CliResult<OperationSpec> {
    let contents = fs::read_to_string(path)?;
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");

    if is_json {
        serde_json::from_str(&contents).map_err(|e| CliError::InvalidRequest(e.to_string()))
    } else {
        serde_yaml::from_str(&contents).map_err(|e| CliError::InvalidRequest(e.to_string()))
    }
}

/// Runs the `run` command.
pub fn execute(args: RunArgs, format: OutputFormat) -> anyhow::Result<()> {
    let spec = parse_spec(&args.file)?;
    let output = spec.run()?;

    match output {
        RunOutput::Payments(payments) => {
            if payments.is_empty() {
                print_single(&"no payments produced", format)?;
                return Ok(());
            }
            let rows: Vec<PaymentRow> = payments.iter().map(PaymentRow::from).collect();
            print_output(&rows, format)?;
        }
        RunOutput::Daily(daily) => {
            if daily.is_empty() {
                print_single(&"no daily returns produced", format)?;
                return Ok(());
            }
            let rows: Vec<DailyReturnRow> = daily.iter().map(DailyReturnRow::from).collect();
            print_output(&rows, format)?;
        }
    }

    Ok(())
}
