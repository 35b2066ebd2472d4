//! Run command implementation.

use anyhow::Result;
use console::style;

use crate::cli::{OutputFormat, TrialArgs};

use super::common::{load_circuit, print_results, resolve_config, simulate};

/// Execute the run command.
pub fn execute(input: &str, args: &TrialArgs) -> Result<()> {
    let config = resolve_config(args)?;

    if args.format == OutputFormat::Table {
        println!(
            "{} Running {} ({} trials)",
            style("→").cyan().bold(),
            style(input).green(),
            config.trials
        );
    }

    let file = load_circuit(input)?;
    let result = simulate(&file.placements(), file.qubits, &config, args.format)?;
    print_results(&result, args.format)
}
