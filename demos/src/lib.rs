//! Qlay Demo Suite
//!
//! Example circuits from the Qlay library's teaching material, expressed as
//! placement sets so they run through exactly the same path as a drawn
//! circuit:
//!
//! - **hadamard** / **pauli-x**: single-qubit basics
//! - **bell** / **ghz**: entanglement via `CNOT` ladders
//! - **superdense**: two classical bits over one entangled qubit
//! - **deutsch-jozsa**: one query decides constant vs balanced
//!
//! ```rust
//! use qlay_demos::demo;
//!
//! let bell = demo::find("bell").unwrap();
//! assert_eq!(bell.qubits, 2);
//! ```

pub mod demo;

pub use demo::{Demo, all, find, names};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for demo operations.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(template) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    ) {
        pb.set_style(template.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}
