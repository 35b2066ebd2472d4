//! Error types for the IR crate.

use thiserror::Error;

use crate::registry::PlacementId;

/// Errors that can occur while placing gates or building circuits.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// The function identifier is not registered in the gate catalog.
    #[error("Unknown gate: '{0}'")]
    UnknownGate(String),

    /// An argument (qubit line count, line positions, ...) is invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A gate operand refers to a qubit line that does not exist.
    #[error("Gate '{gate}' addresses qubit {qubit}, but the circuit has {qubit_count} qubits")]
    QubitOutOfRange {
        /// Function identifier of the offending gate.
        gate: String,
        /// The out-of-range qubit index (may be negative for a control above line 0).
        qubit: isize,
        /// Number of qubit lines in the circuit.
        qubit_count: usize,
    },

    /// No placement with this id exists in the registry.
    #[error("Placement {0} not found")]
    PlacementNotFound(PlacementId),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
