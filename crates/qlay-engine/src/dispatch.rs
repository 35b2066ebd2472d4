//! Gate dispatch table.
//!
//! Maps a function identifier to a tagged capability descriptor. The table
//! is populated once at startup, so every identifier a circuit uses can be
//! checked before any state is allocated.

use rustc_hash::FxHashMap;
use tracing::debug;

use qlay_ir::{Arity, GateCatalog, GateSignature};

use crate::backend::Qubit;
use crate::error::{EngineError, EngineResult, OperandKind};

/// Entry point of a gate in the simulation library.
///
/// Two-qubit gates receive `(primary, control)`.
pub enum GateFn<C> {
    /// Single-qubit gate without parameters.
    Single(fn(&mut C, Qubit)),
    /// Single-qubit gate with one angle (radians).
    Angle(fn(&mut C, f64, Qubit)),
    /// Two-qubit gate.
    Pair(fn(&mut C, Qubit, Qubit)),
    /// Single-qubit measurement returning the observed basis state.
    Measure(fn(&mut C, Qubit) -> bool),
    /// Anything else: explicit signature, arguments passed as slices.
    Custom {
        /// Declared signature.
        signature: GateSignature,
        /// Entry point.
        apply: fn(&mut C, &[f64], &[Qubit]) -> Option<bool>,
    },
}

impl<C> Clone for GateFn<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for GateFn<C> {}

impl<C> GateFn<C> {
    /// Signature implied by the entry point's shape.
    pub fn signature(&self) -> GateSignature {
        match self {
            GateFn::Single(_) => GateSignature::single(),
            GateFn::Angle(_) => GateSignature::angle(),
            GateFn::Pair(_) => GateSignature::pair(),
            GateFn::Measure(_) => GateSignature::measurement(),
            GateFn::Custom { signature, .. } => *signature,
        }
    }
}

/// A named gate capability.
pub struct GateCapability<C> {
    name: String,
    entry: GateFn<C>,
}

impl<C> GateCapability<C> {
    /// Function identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared signature.
    pub fn signature(&self) -> GateSignature {
        self.entry.signature()
    }

    /// Number of scalar arguments.
    pub fn scalar_args(&self) -> usize {
        self.signature().scalar_args
    }

    /// Number of qubit operands.
    pub fn arity(&self) -> Arity {
        self.signature().arity
    }

    /// Whether invoking the gate yields a measurement outcome.
    pub fn measures(&self) -> bool {
        self.signature().measures
    }

    /// Check operand counts without invoking.
    pub fn check(&self, args: usize, qubits: usize) -> EngineResult<()> {
        let signature = self.signature();
        if args != signature.scalar_args {
            return Err(self.mismatch(OperandKind::Scalar, signature.scalar_args, args));
        }
        if qubits != signature.arity.count() {
            return Err(self.mismatch(OperandKind::Qubit, signature.arity.count(), qubits));
        }
        Ok(())
    }

    fn mismatch(&self, operand: OperandKind, expected: usize, got: usize) -> EngineError {
        EngineError::ArityMismatch {
            gate: self.name.clone(),
            operand,
            expected,
            got,
        }
    }

    /// Invoke the gate on `ctx`.
    ///
    /// Returns `Some(outcome)` for measuring gates and `None` otherwise. A
    /// custom entry point that breaks this fails with
    /// [`EngineError::MeasurementMismatch`].
    pub fn invoke(&self, ctx: &mut C, args: &[f64], qubits: &[Qubit]) -> EngineResult<Option<bool>> {
        self.check(args.len(), qubits.len())?;
        let outcome = match self.entry {
            GateFn::Single(f) => {
                f(ctx, qubits[0]);
                None
            }
            GateFn::Angle(f) => {
                f(ctx, args[0], qubits[0]);
                None
            }
            GateFn::Pair(f) => {
                f(ctx, qubits[0], qubits[1]);
                None
            }
            GateFn::Measure(f) => Some(f(ctx, qubits[0])),
            GateFn::Custom { signature, apply } => {
                let outcome = apply(ctx, args, qubits);
                if outcome.is_some() != signature.measures {
                    return Err(EngineError::MeasurementMismatch {
                        gate: self.name.clone(),
                        measures: signature.measures,
                    });
                }
                outcome
            }
        };
        Ok(outcome)
    }
}

/// Registry of gate capabilities keyed by function identifier.
pub struct GateTable<C> {
    gates: FxHashMap<String, GateCapability<C>>,
}

impl<C> GateTable<C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            gates: FxHashMap::default(),
        }
    }

    /// Register a capability under `name`.
    ///
    /// Fails with [`EngineError::DuplicateGate`] if the name is taken.
    pub fn register(&mut self, name: impl Into<String>, entry: GateFn<C>) -> EngineResult<()> {
        let name = name.into();
        if self.gates.contains_key(&name) {
            return Err(EngineError::DuplicateGate(name));
        }
        debug!("Registering gate: {}", name);
        self.gates.insert(name.clone(), GateCapability { name, entry });
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, entry: GateFn<C>) -> EngineResult<Self> {
        self.register(name, entry)?;
        Ok(self)
    }

    /// Look up a capability.
    pub fn resolve(&self, function_id: &str) -> EngineResult<&GateCapability<C>> {
        self.gates
            .get(function_id)
            .ok_or_else(|| EngineError::UnknownGate(function_id.to_string()))
    }

    /// Whether `function_id` is registered.
    pub fn contains(&self, function_id: &str) -> bool {
        self.gates.contains_key(function_id)
    }

    /// Registered identifiers, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.gates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

impl<C> Default for GateTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> GateCatalog for GateTable<C> {
    fn signature(&self, function_id: &str) -> Option<GateSignature> {
        self.gates.get(function_id).map(GateCapability::signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call as a string.
    #[derive(Default)]
    struct Log(Vec<String>);

    fn q(index: usize) -> Qubit {
        use crate::backend::StateContext;

        struct Wide;
        impl StateContext for Wide {
            fn num_qubits(&self) -> usize {
                8
            }
            fn reset(&mut self) {}
        }
        Wide.qubit(index).unwrap()
    }

    fn table() -> GateTable<Log> {
        GateTable::new()
            .with("H", GateFn::Single(|log: &mut Log, q| log.0.push(format!("H {q}"))))
            .unwrap()
            .with(
                "Rx",
                GateFn::Angle(|log: &mut Log, a, q| log.0.push(format!("Rx({a}) {q}"))),
            )
            .unwrap()
            .with(
                "CNOT",
                GateFn::Pair(|log: &mut Log, t, c| log.0.push(format!("CNOT {c}->{t}"))),
            )
            .unwrap()
            .with("M", GateFn::Measure(|_: &mut Log, q| q.index() == 1))
            .unwrap()
    }

    #[test]
    fn test_resolve_and_signature() {
        let table = table();
        let rx = table.resolve("Rx").unwrap();
        assert_eq!(rx.scalar_args(), 1);
        assert_eq!(rx.arity(), Arity::One);
        assert!(!rx.measures());

        assert_eq!(table.arity("CNOT").unwrap(), Arity::Two);
        assert!(table.is_measurement("M").unwrap());
        assert_eq!(table.names(), vec!["CNOT", "H", "M", "Rx"]);
    }

    #[test]
    fn test_unknown_gate() {
        let table = table();
        assert!(matches!(
            table.resolve("SRNOT"),
            Err(EngineError::UnknownGate(ref g)) if g == "SRNOT"
        ));
        assert!(!table.contains("SRNOT"));
    }

    #[test]
    fn test_invoke() {
        let table = table();
        let mut log = Log::default();

        table.resolve("H").unwrap().invoke(&mut log, &[], &[q(0)]).unwrap();
        table.resolve("Rx").unwrap().invoke(&mut log, &[0.5], &[q(2)]).unwrap();
        table
            .resolve("CNOT")
            .unwrap()
            .invoke(&mut log, &[], &[q(1), q(0)])
            .unwrap();
        assert_eq!(log.0, vec!["H q0", "Rx(0.5) q2", "CNOT q0->q1"]);

        let m = table.resolve("M").unwrap();
        assert_eq!(m.invoke(&mut log, &[], &[q(1)]).unwrap(), Some(true));
        assert_eq!(m.invoke(&mut log, &[], &[q(0)]).unwrap(), Some(false));
    }

    #[test]
    fn test_scalar_arity_mismatch() {
        let table = table();
        let mut log = Log::default();
        let err = table
            .resolve("Rx")
            .unwrap()
            .invoke(&mut log, &[0.1, 0.2], &[q(0)])
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::ArityMismatch {
                operand: OperandKind::Scalar,
                expected: 1,
                got: 2,
                ..
            }
        ));
        assert!(log.0.is_empty());
    }

    #[test]
    fn test_qubit_arity_mismatch() {
        let table = table();
        let mut log = Log::default();
        let err = table
            .resolve("CNOT")
            .unwrap()
            .invoke(&mut log, &[], &[q(0)])
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::ArityMismatch {
                operand: OperandKind::Qubit,
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_registration() {
        let mut table = table();
        let err = table
            .register("H", GateFn::Single(|_: &mut Log, _| {}))
            .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateGate(ref g) if g == "H"));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_custom_gate() {
        let table: GateTable<Log> = GateTable::new()
            .with(
                "U2",
                GateFn::Custom {
                    signature: GateSignature {
                        scalar_args: 2,
                        arity: Arity::One,
                        measures: false,
                    },
                    apply: |log: &mut Log, args, qubits| {
                        log.0.push(format!("U2({}, {}) {}", args[0], args[1], qubits[0]));
                        None
                    },
                },
            )
            .unwrap();

        let mut log = Log::default();
        let u2 = table.resolve("U2").unwrap();
        assert_eq!(u2.invoke(&mut log, &[1.0, 2.0], &[q(3)]).unwrap(), None);
        assert_eq!(log.0, vec!["U2(1, 2) q3"]);
        assert!(u2.invoke(&mut log, &[1.0], &[q(3)]).is_err());
    }

    #[test]
    fn test_custom_outcome_must_match_signature() {
        let table: GateTable<Log> = GateTable::new()
            .with(
                "Lossy",
                GateFn::Custom {
                    signature: GateSignature {
                        measures: true,
                        ..GateSignature::single()
                    },
                    apply: |_, _, _| None,
                },
            )
            .unwrap()
            .with(
                "Chatty",
                GateFn::Custom {
                    signature: GateSignature::single(),
                    apply: |_, _, _| Some(true),
                },
            )
            .unwrap();

        let mut log = Log::default();
        let err = table
            .resolve("Lossy")
            .unwrap()
            .invoke(&mut log, &[], &[q(0)])
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::MeasurementMismatch { ref gate, measures: true } if gate == "Lossy"
        ));

        let err = table
            .resolve("Chatty")
            .unwrap()
            .invoke(&mut log, &[], &[q(0)])
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::MeasurementMismatch { measures: false, .. }
        ));
    }
}
