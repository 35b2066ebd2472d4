//! Error types for the engine crate.

use std::fmt;

use qlay_ir::IrError;
use thiserror::Error;

/// Which operand list an arity check failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// Scalar (angle) arguments.
    Scalar,
    /// Qubit operands.
    Qubit,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandKind::Scalar => write!(f, "scalar arguments"),
            OperandKind::Qubit => write!(f, "qubit operands"),
        }
    }
}

/// Errors that can occur while dispatching gates or running simulations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The function identifier is not registered in the dispatch table.
    #[error("Unknown gate: '{0}'")]
    UnknownGate(String),

    /// A gate was invoked with the wrong number of operands.
    #[error("Gate '{gate}' requires {expected} {operand}, got {got}")]
    ArityMismatch {
        /// Function identifier of the gate.
        gate: String,
        /// Which operand list was wrong.
        operand: OperandKind,
        /// Registered count.
        expected: usize,
        /// Supplied count.
        got: usize,
    },

    /// Bad qubit count, trial count or registration.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A gate operand refers to a qubit line that does not exist.
    #[error("Gate '{gate}' addresses qubit {qubit}, but the circuit has {qubit_count} qubits")]
    QubitOutOfRange {
        /// Function identifier of the offending gate.
        gate: String,
        /// The out-of-range qubit index.
        qubit: isize,
        /// Number of qubits in the circuit.
        qubit_count: usize,
    },

    /// The runtime cannot allocate a state of this size.
    #[error("Circuit exceeds runtime capabilities: {0}")]
    CircuitTooLarge(String),

    /// A gate's outcome disagrees with whether its signature measures.
    #[error("Gate '{gate}' violates its measurement signature (measures: {measures})")]
    MeasurementMismatch {
        /// Function identifier of the gate.
        gate: String,
        /// Whether the dispatch table declares the gate as measuring.
        measures: bool,
    },

    /// The identifier is already registered.
    #[error("Gate '{0}' is already registered")]
    DuplicateGate(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<IrError> for EngineError {
    fn from(err: IrError) -> Self {
        match err {
            IrError::UnknownGate(gate) => EngineError::UnknownGate(gate),
            IrError::QubitOutOfRange {
                gate,
                qubit,
                qubit_count,
            } => EngineError::QubitOutOfRange {
                gate,
                qubit,
                qubit_count,
            },
            other => EngineError::InvalidArgument(other.to_string()),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
