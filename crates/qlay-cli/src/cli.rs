//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};

/// Qlay - drag-and-drop quantum circuits, simulated headless
#[derive(Parser, Debug)]
#[command(name = "qlay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Trial settings shared by `run` and `demo`. Unset flags fall back to the
/// config file, then `QLAY_*` environment variables, then defaults.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TrialArgs {
    /// Number of trials
    #[arg(short, long)]
    pub trials: Option<u64>,

    /// Seed for reproducible runs
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Worker threads (1 = sequential)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// How results are printed.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tally table with bars
    #[default]
    Table,
    /// JSON document
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate a circuit file (YAML or JSON)
    Run {
        /// Input circuit file
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        trials: TrialArgs,
    },

    /// Simulate a built-in demo circuit
    Demo {
        /// Demo name (omit to list them)
        name: Option<String>,

        #[command(flatten)]
        trials: TrialArgs,
    },

    /// List the available gates
    Gates,

    /// Show version information
    Version,
}
