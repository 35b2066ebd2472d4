//! Complete Demo Suite
//!
//! Runs every built-in circuit on the local simulator and prints its tallies.

use clap::Parser;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use qlay_adapter_sim::{SimRuntime, standard_table};
use qlay_demos::{create_progress_bar, print_header, print_result, print_section, print_success};
use qlay_engine::{DEFAULT_TRIALS, SimulationResult, Simulator};

#[derive(Parser, Debug)]
#[command(name = "demo-all")]
#[command(about = "Run every built-in Qlay demo circuit")]
struct Args {
    /// Trials per demo
    #[arg(short, long, default_value_t = DEFAULT_TRIALS)]
    trials: u64,

    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run a single demo by name
    #[arg(long)]
    only: Option<String>,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let start = Instant::now();
    print_header("Qlay Demo Suite");

    let demos: Vec<_> = qlay_demos::all()
        .into_iter()
        .filter(|demo| args.only.as_deref().is_none_or(|name| demo.name == name))
        .collect();
    if demos.is_empty() {
        eprintln!(
            "Error: no demo named {:?}. Available: {}",
            args.only.as_deref().unwrap_or_default(),
            qlay_demos::names().join(", ")
        );
        std::process::exit(1);
    }

    let runtime = match args.seed {
        Some(seed) => SimRuntime::with_seed(seed),
        None => SimRuntime::init(),
    };
    let gates = match standard_table() {
        Ok(gates) => gates,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let sim = Simulator::new(&runtime, &gates);

    let pb = create_progress_bar(demos.len() as u64, "running demos");
    let mut outcomes = Vec::with_capacity(demos.len());
    for demo in &demos {
        pb.set_message(demo.name);
        tracing::debug!(demo = demo.name, qubits = demo.qubits, "running demo");
        let outcome = sim
            .build_circuit(&demo.placements, demo.qubits)
            .and_then(|circuit| sim.run(&circuit, args.trials));
        outcomes.push(outcome);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mut failures = 0;
    for (demo, outcome) in demos.iter().zip(outcomes) {
        print_section(demo.summary);
        print_result("Demo", demo.name);
        print_result("Qubits", demo.qubits);
        print_result("Expect", demo.expectation);
        match outcome {
            Ok(result) => print_tallies(&result),
            Err(e) => {
                failures += 1;
                eprintln!("  Error: {e}");
            }
        }
    }

    println!();
    print_result("Total time", format!("{:.2?}", start.elapsed()));
    if failures > 0 {
        std::process::exit(1);
    }
    print_success("All demos complete!");
}

fn print_tallies(result: &SimulationResult) {
    for (name, tally) in result.iter() {
        print_result(name, tally);
    }
}
