//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit playground and simulator",
        style("Qlay").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qlay-ir           Gate placements and circuit linearization");
    println!("  qlay-engine       Gate dispatch, trial driver, result tallies");
    println!("  qlay-adapter-sim  Local statevector simulator");
    println!("  qlay-cli          Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
