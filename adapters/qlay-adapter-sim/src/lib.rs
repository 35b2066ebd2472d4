//! Qlay Local Statevector Simulator
//!
//! The simulation library behind `qlay-engine`: a dense statevector with
//! per-context RNG streams, plus the standard gate set as a dispatch table.
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```rust
//! use qlay_adapter_sim::{SimRuntime, standard_table};
//! use qlay_engine::Simulator;
//! use qlay_ir::GatePlacement;
//!
//! let runtime = SimRuntime::with_seed(7);
//! let gates = standard_table()?;
//! let sim = Simulator::new(&runtime, &gates);
//!
//! let placements = vec![
//!     GatePlacement::new("H", &gates)?.at(0.0),
//!     GatePlacement::new("M", &gates)?.at(80.0),
//! ];
//! let circuit = sim.build_circuit(&placements, 1)?;
//! let result = sim.run(&circuit, 1000)?;
//!
//! let m0 = result.get("M0").unwrap();
//! assert_eq!(m0.total(), 1000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod gates;
mod runtime;
mod statevector;

pub use gates::{STANDARD_GATES, standard_table};
pub use runtime::SimRuntime;
pub use statevector::Statevector;

/// Convert degrees to radians.
pub fn deg_to_rad(angle: f64) -> f64 {
    angle.to_radians()
}
