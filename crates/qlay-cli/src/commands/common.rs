//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use qlay_adapter_sim::{SimRuntime, deg_to_rad, standard_table};
use qlay_engine::{SimulationConfig, SimulationResult, Simulator};
use qlay_ir::{GatePlacement, Orientation};

use crate::cli::{OutputFormat, TrialArgs};

/// A circuit file: qubit line count plus gates with angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitFile {
    /// Number of qubit lines.
    pub qubits: usize,
    /// Gates in any order; `position` decides execution order.
    #[serde(default)]
    pub gates: Vec<GateEntry>,
}

/// One gate in a circuit file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateEntry {
    pub gate: String,
    #[serde(default)]
    pub line: usize,
    pub position: f64,
    /// Degrees.
    #[serde(default)]
    pub angles: Vec<f64>,
    #[serde(default)]
    pub orientation: Orientation,
}

impl CircuitFile {
    /// Placements with angles converted to radians.
    pub fn placements(&self) -> Vec<GatePlacement> {
        self.gates
            .iter()
            .map(|entry| {
                GatePlacement::unchecked(entry.gate.as_str())
                    .on_line(entry.line)
                    .at(entry.position)
                    .with_angles(entry.angles.iter().copied().map(deg_to_rad))
                    .with_orientation(entry.orientation)
            })
            .collect()
    }
}

/// Parse circuit file text. JSON for `.json`, YAML otherwise.
pub fn parse_circuit(source: &str, extension: &str) -> Result<CircuitFile> {
    match extension.to_lowercase().as_str() {
        "json" => serde_json::from_str(source).context("Invalid JSON circuit"),
        _ => serde_yaml_ng::from_str(source).context("Invalid YAML circuit"),
    }
}

/// Load a circuit from a YAML or JSON file.
pub fn load_circuit(path: &str) -> Result<CircuitFile> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");

    parse_circuit(&source, ext).with_context(|| format!("Failed to parse {path}"))
}

/// Resolve trial settings: flags over environment over config file over
/// defaults.
pub fn resolve_config(args: &TrialArgs) -> Result<SimulationConfig> {
    resolve_config_with(args, |key| std::env::var(key).ok())
}

/// [`resolve_config`] with `QLAY_*` overrides read from `lookup`.
pub fn resolve_config_with(
    args: &TrialArgs,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SimulationConfig> {
    let mut config = SimulationConfig::load_with(args.config.as_deref().map(Path::new), lookup)?;
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    config.validate()?;
    debug!(
        trials = config.trials,
        seed = ?config.seed,
        workers = config.workers,
        max_qubits = config.max_qubits,
        "Resolved run settings"
    );
    Ok(config)
}

/// Build and simulate placements on the local statevector simulator.
///
/// Only the table format prints progress text to stdout, so JSON output
/// stays machine-readable.
pub fn simulate(
    placements: &[GatePlacement],
    qubits: usize,
    config: &SimulationConfig,
    format: OutputFormat,
) -> Result<SimulationResult> {
    let runtime = SimRuntime::from_config(config);
    let gates = standard_table()?;
    let sim = Simulator::new(&runtime, &gates);

    let circuit = sim.build_circuit(placements, qubits)?;
    if format == OutputFormat::Table {
        println!(
            "  Circuit: {} qubits, {} gates, {} measurements",
            circuit.qubit_count(),
            circuit.len(),
            circuit.measurement_names().count()
        );
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(format!("Running {} trials...", config.trials));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = sim.run_configured(&circuit, config);
    spinner.finish_and_clear();
    Ok(result?)
}

/// Print a result in the requested format.
pub fn print_results(result: &SimulationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Table => print_table(result),
    }
    Ok(())
}

fn print_table(result: &SimulationResult) {
    println!(
        "\n{} Results ({} trials):",
        style("✓").green().bold(),
        result.completed_trials()
    );

    if result.is_empty() {
        println!("  {}", style("No measurement gates.").dim());
        return;
    }

    for (name, tally) in result.iter() {
        let ones = tally.one_fraction() * 100.0;
        let bar: String = "█".repeat((ones / 2.0).round() as usize);
        println!(
            "  {}: ZERO {:>7}  ONE {:>7} ({:>5.1}%) {}",
            style(name).cyan(),
            tally.zeros,
            tally.ones,
            ones,
            style(bar).green()
        );
    }

    if result.is_cancelled() {
        println!(
            "\n  {} stopped after {} of {} trials",
            style("Cancelled:").yellow(),
            result.completed_trials(),
            result.requested_trials()
        );
    }
}
