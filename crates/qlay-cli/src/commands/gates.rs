//! Gates command implementation.

use anyhow::Result;
use console::style;

use qlay_adapter_sim::standard_table;

/// Execute the gates command.
pub fn execute() -> Result<()> {
    let table = standard_table()?;
    println!("{} Available gates:\n", style("Qlay").cyan().bold());

    for name in table.names() {
        let capability = table.resolve(name)?;
        let kind = if capability.measures() {
            "measurement"
        } else {
            "unitary"
        };
        let args = match capability.scalar_args() {
            0 => String::new(),
            n => format!(", {n} angle"),
        };
        println!(
            "  {:<8} {} qubit(s){}, {}",
            style(name).bold(),
            capability.arity(),
            args,
            style(kind).dim()
        );
    }
    Ok(())
}
