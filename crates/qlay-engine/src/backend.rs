//! The quantum-simulation surface the engine drives.
//!
//! The engine never does state-vector math itself. A simulation library
//! plugs in by implementing [`QuantumRuntime`] (process-wide lifecycle and
//! allocation) and [`StateContext`] (one N-qubit state that can be reset).
//! Gates are plain functions over the context, registered by name in a
//! [`GateTable`](crate::dispatch::GateTable).

use std::fmt;

use crate::error::EngineResult;

/// Handle to one qubit of a state context.
///
/// Only obtainable through [`StateContext::qubit`], which checks the index
/// against the context's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Qubit(usize);

impl Qubit {
    /// Index of the qubit within its context.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// A quantum state sized for a fixed number of qubits.
///
/// Released on drop.
pub trait StateContext {
    /// Number of qubits in the state.
    fn num_qubits(&self) -> usize;

    /// Return to the all-zero initial state without reallocating.
    fn reset(&mut self);

    /// Handle for qubit `index`, if it exists.
    fn qubit(&self, index: usize) -> Option<Qubit> {
        (index < self.num_qubits()).then_some(Qubit(index))
    }
}

/// An initialised simulation library.
///
/// Construct one before the first run and drop it at shutdown; the engine
/// borrows it for the duration of each run.
pub trait QuantumRuntime: Sync {
    /// State context type produced by this runtime.
    type Context: StateContext + Send;

    /// Allocate a context for `num_qubits` qubits in the initial state.
    fn allocate(&self, num_qubits: usize) -> EngineResult<Self::Context>;
}
