//! Qlay Command-Line Interface
//!
//! The main entry point for the `qlay` tool.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use qlay_cli::cli::{Cli, Commands};
use qlay_cli::commands::{demo, gates, run, version};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_filter()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run { input, trials } => run::execute(&input, &trials),
        Commands::Demo { name, trials } => demo::execute(name.as_deref(), &trials),
        Commands::Gates => gates::execute(),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
