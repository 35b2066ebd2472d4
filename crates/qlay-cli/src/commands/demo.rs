//! Demo command implementation.

use anyhow::Result;
use console::style;

use crate::cli::{OutputFormat, TrialArgs};

use super::common::{print_results, resolve_config, simulate};

/// Execute the demo command. Without a name, list the demos.
pub fn execute(name: Option<&str>, args: &TrialArgs) -> Result<()> {
    let Some(name) = name else {
        list();
        return Ok(());
    };

    let Some(demo) = qlay_demos::find(name) else {
        anyhow::bail!(
            "Unknown demo: '{name}'. Available: {}",
            qlay_demos::names().join(", ")
        );
    };

    let config = resolve_config(args)?;
    if args.format == OutputFormat::Table {
        println!(
            "{} Running demo {} ({} trials)",
            style("→").cyan().bold(),
            style(demo.name).green(),
            config.trials
        );
        println!("  {}", demo.summary);
        println!("  Expect: {}", style(demo.expectation).dim());
    }

    let result = simulate(&demo.placements, demo.qubits, &config, args.format)?;
    print_results(&result, args.format)
}

fn list() {
    println!("{} Built-in demos:\n", style("Qlay").cyan().bold());
    for demo in qlay_demos::all() {
        println!(
            "  {:<14} {} ({} qubits)",
            style(demo.name).bold(),
            demo.summary,
            demo.qubits
        );
    }
}
