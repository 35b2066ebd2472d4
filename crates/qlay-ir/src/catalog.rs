//! Gate signatures as seen by the circuit model.
//!
//! The IR never invokes a gate. It only needs to know, for a function
//! identifier, how many qubit operands and scalar arguments the gate takes
//! and whether it reports a measurement outcome. Anything that can answer
//! that question implements [`GateCatalog`]; the engine's dispatch table is
//! the canonical implementation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Number of qubit operands a gate acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arity {
    /// Acts on the qubit at the placement's line.
    One,
    /// Acts on the placement's line and one neighbouring control line.
    Two,
}

impl Arity {
    /// Number of qubit operands.
    #[inline]
    pub fn count(self) -> usize {
        match self {
            Arity::One => 1,
            Arity::Two => 2,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Static description of a gate capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateSignature {
    /// Number of scalar (radian) arguments, supplied before the qubits.
    pub scalar_args: usize,
    /// Number of qubit operands.
    pub arity: Arity,
    /// Whether the gate returns a boolean measurement outcome.
    pub measures: bool,
}

impl GateSignature {
    /// A non-measuring single-qubit gate without parameters.
    pub const fn single() -> Self {
        Self {
            scalar_args: 0,
            arity: Arity::One,
            measures: false,
        }
    }

    /// A single-qubit gate parameterised by one angle.
    pub const fn angle() -> Self {
        Self {
            scalar_args: 1,
            arity: Arity::One,
            measures: false,
        }
    }

    /// A non-measuring two-qubit gate.
    pub const fn pair() -> Self {
        Self {
            scalar_args: 0,
            arity: Arity::Two,
            measures: false,
        }
    }

    /// A single-qubit measurement.
    pub const fn measurement() -> Self {
        Self {
            scalar_args: 0,
            arity: Arity::One,
            measures: true,
        }
    }
}

/// Lookup of gate signatures by function identifier.
pub trait GateCatalog {
    /// Signature registered under `function_id`, if any.
    fn signature(&self, function_id: &str) -> Option<GateSignature>;

    /// Signature of `function_id`, or [`IrError::UnknownGate`].
    fn resolve_signature(&self, function_id: &str) -> IrResult<GateSignature> {
        self.signature(function_id)
            .ok_or_else(|| IrError::UnknownGate(function_id.to_string()))
    }

    /// Qubit-operand arity of `function_id`, discovered without invoking it.
    fn arity(&self, function_id: &str) -> IrResult<Arity> {
        self.resolve_signature(function_id).map(|sig| sig.arity)
    }

    /// Whether `function_id` denotes a measurement capability.
    fn is_measurement(&self, function_id: &str) -> IrResult<bool> {
        self.resolve_signature(function_id).map(|sig| sig.measures)
    }
}

/// A plain signature map, for front ends that need placement validation
/// without linking a gate library.
#[derive(Debug, Clone, Default)]
pub struct SignatureCatalog {
    signatures: FxHashMap<String, GateSignature>,
}

impl SignatureCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a signature.
    pub fn insert(&mut self, function_id: impl Into<String>, signature: GateSignature) {
        self.signatures.insert(function_id.into(), signature);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, function_id: impl Into<String>, signature: GateSignature) -> Self {
        self.insert(function_id, signature);
        self
    }

    /// Number of registered gates.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether no gates are registered.
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

impl GateCatalog for SignatureCatalog {
    fn signature(&self, function_id: &str) -> Option<GateSignature> {
        self.signatures.get(function_id).copied()
    }
}

impl<T: GateCatalog + ?Sized> GateCatalog for &T {
    fn signature(&self, function_id: &str) -> Option<GateSignature> {
        (**self).signature(function_id)
    }
}
