//! Qlay Simulation Engine
//!
//! Executes a [`Circuit`](qlay_ir::Circuit) repeatedly against a quantum
//! simulation library and tallies the outcome of every measurement point.
//!
//! # Core Components
//!
//! - **Backend surface**: [`QuantumRuntime`] allocates [`StateContext`]s;
//!   the library supplies both
//! - **Dispatch**: [`GateTable`] maps function identifiers to tagged
//!   [`GateFn`] entry points and doubles as the circuit model's catalog
//! - **Driver**: [`Simulator`] runs trials sequentially, cancellably or
//!   across worker threads
//! - **Results**: [`SimulationResult`] holds one [`Tally`] per measurement
//!
//! # Example
//!
//! ```rust
//! use qlay_engine::{
//!     EngineResult, GateFn, GateTable, QuantumRuntime, Simulator, StateContext,
//! };
//! use qlay_ir::GatePlacement;
//!
//! /// Classical bits standing in for qubits.
//! struct Bits(Vec<bool>);
//!
//! impl StateContext for Bits {
//!     fn num_qubits(&self) -> usize {
//!         self.0.len()
//!     }
//!     fn reset(&mut self) {
//!         self.0.fill(false);
//!     }
//! }
//!
//! struct Classical;
//!
//! impl QuantumRuntime for Classical {
//!     type Context = Bits;
//!     fn allocate(&self, num_qubits: usize) -> EngineResult<Bits> {
//!         Ok(Bits(vec![false; num_qubits]))
//!     }
//! }
//!
//! let gates = GateTable::new()
//!     .with("X", GateFn::Single(|b: &mut Bits, q| b.0[q.index()] ^= true))?
//!     .with("M", GateFn::Measure(|b: &mut Bits, q| b.0[q.index()]))?;
//!
//! let placements = vec![
//!     GatePlacement::new("X", &gates)?.at(0.0),
//!     GatePlacement::new("M", &gates)?.at(80.0),
//! ];
//!
//! let sim = Simulator::new(&Classical, &gates);
//! let circuit = sim.build_circuit(&placements, 1)?;
//! let result = sim.run(&circuit, 10)?;
//! assert_eq!(result.get("M0").map(|t| t.ones), Some(10));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod result;

pub use backend::{QuantumRuntime, Qubit, StateContext};
pub use config::{DEFAULT_MAX_QUBITS, DEFAULT_TRIALS, MAX_SUPPORTED_QUBITS, SimulationConfig};
pub use dispatch::{GateCapability, GateFn, GateTable};
pub use driver::{CancelToken, Simulator};
pub use error::{EngineError, EngineResult, OperandKind};
pub use result::{SimulationResult, Tally};
