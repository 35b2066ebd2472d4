//! Linearization of placements into an executable circuit.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Arity, GateCatalog};
use crate::error::{IrError, IrResult};
use crate::placement::GatePlacement;

/// Prefix of generated measurement point names.
pub const MEASUREMENT_PREFIX: &str = "M";

/// Name of the `ordinal`-th measurement gate in execution order.
pub fn measurement_name(ordinal: usize) -> String {
    format!("{MEASUREMENT_PREFIX}{ordinal}")
}

/// Order placements for execution and name the measurement points.
///
/// Placements are stable-sorted by `position`, so gates fire left to right
/// regardless of their qubit line and equal positions keep insertion order.
/// Every measurement gate is then named `M0`, `M1`, ... in that order; all
/// other placements have their measurement name cleared.
pub fn linearize(
    placements: impl IntoIterator<Item = GatePlacement>,
    catalog: &dyn GateCatalog,
) -> IrResult<Vec<GatePlacement>> {
    let mut ordered: Vec<GatePlacement> = placements.into_iter().collect();
    ordered.sort_by(|a, b| a.position.total_cmp(&b.position));

    let mut ordinal = 0;
    for placement in &mut ordered {
        if catalog.is_measurement(placement.function_id())? {
            placement.set_measurement_name(Some(measurement_name(ordinal)));
            ordinal += 1;
        } else {
            placement.set_measurement_name(None);
        }
    }

    Ok(ordered)
}

/// A linearized, validated circuit program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    qubit_count: usize,
    placements: Vec<GatePlacement>,
}

impl Circuit {
    /// Build a circuit from the current placement set.
    ///
    /// Fails with [`IrError::InvalidArgument`] for a zero line count,
    /// [`IrError::UnknownGate`] for an unregistered identifier and
    /// [`IrError::QubitOutOfRange`] when an operand (including a two-qubit
    /// gate's control line) lies outside the circuit.
    pub fn build<'a>(
        placements: impl IntoIterator<Item = &'a GatePlacement>,
        qubit_line_count: usize,
        catalog: &dyn GateCatalog,
    ) -> IrResult<Self> {
        if qubit_line_count == 0 {
            return Err(IrError::InvalidArgument(
                "a circuit needs at least one qubit line".into(),
            ));
        }

        let placements: Vec<GatePlacement> = placements.into_iter().cloned().collect();
        for placement in &placements {
            validate_operands(placement, qubit_line_count, catalog)?;
        }

        let placements = linearize(placements, catalog)?;
        debug!(
            "Built circuit: {} qubits, {} placements",
            qubit_line_count,
            placements.len()
        );

        Ok(Self {
            qubit_count: qubit_line_count,
            placements,
        })
    }

    /// Number of qubit lines.
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Placements in execution order.
    pub fn placements(&self) -> &[GatePlacement] {
        &self.placements
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the circuit has no placements.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Measurement point names in execution order.
    pub fn measurement_names(&self) -> impl Iterator<Item = &str> {
        self.placements
            .iter()
            .filter_map(GatePlacement::measurement_name)
    }
}

fn validate_operands(
    placement: &GatePlacement,
    qubit_count: usize,
    catalog: &dyn GateCatalog,
) -> IrResult<()> {
    let arity = catalog.arity(placement.function_id())?;
    let out_of_range = |qubit: isize| IrError::QubitOutOfRange {
        gate: placement.function_id().to_string(),
        qubit,
        qubit_count,
    };

    if placement.qubit_index >= qubit_count {
        return Err(out_of_range(placement.qubit_index as isize));
    }
    if arity == Arity::Two {
        let control = placement.control_line();
        if control < 0 || control as usize >= qubit_count {
            return Err(out_of_range(control));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GateSignature, SignatureCatalog};
    use crate::placement::Orientation;

    fn catalog() -> SignatureCatalog {
        SignatureCatalog::new()
            .with("H", GateSignature::single())
            .with("X", GateSignature::single())
            .with("M", GateSignature::measurement())
            .with("CNOT", GateSignature::pair())
    }

    fn gate(id: &str, line: usize, position: f64) -> GatePlacement {
        GatePlacement::unchecked(id).on_line(line).at(position)
    }

    #[test]
    fn test_sorted_by_position() {
        let placements = vec![gate("M", 0, 300.0), gate("H", 0, 100.0), gate("X", 1, 200.0)];
        let circuit = Circuit::build(&placements, 2, &catalog()).unwrap();

        let order: Vec<_> = circuit.placements().iter().map(|p| p.function_id()).collect();
        assert_eq!(order, vec!["H", "X", "M"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let placements = vec![gate("X", 1, 50.0), gate("H", 0, 50.0), gate("M", 0, 50.0)];
        let ordered = linearize(placements, &catalog()).unwrap();

        let order: Vec<_> = ordered.iter().map(|p| p.function_id()).collect();
        assert_eq!(order, vec!["X", "H", "M"]);
    }

    #[test]
    fn test_measurement_names_follow_position_not_line() {
        let placements = vec![gate("M", 0, 400.0), gate("M", 2, 100.0), gate("H", 1, 50.0)];
        let circuit = Circuit::build(&placements, 3, &catalog()).unwrap();

        let names: Vec<_> = circuit.measurement_names().collect();
        assert_eq!(names, vec!["M0", "M1"]);
        assert_eq!(circuit.placements()[1].qubit_index, 2);
        assert_eq!(circuit.placements()[1].measurement_name(), Some("M0"));
        assert_eq!(circuit.placements()[0].measurement_name(), None);
    }

    #[test]
    fn test_names_recomputed_on_every_build() {
        let mut placements = vec![gate("M", 0, 100.0), gate("M", 1, 200.0)];
        let first = Circuit::build(&placements, 2, &catalog()).unwrap();
        assert_eq!(first.placements()[0].qubit_index, 0);

        placements[0].position = 300.0;
        let second = Circuit::build(&placements, 2, &catalog()).unwrap();
        assert_eq!(second.placements()[0].qubit_index, 1);
        assert_eq!(second.placements()[0].measurement_name(), Some("M0"));
    }

    #[test]
    fn test_empty_circuit() {
        let circuit = Circuit::build(&[] as &[GatePlacement], 1, &catalog()).unwrap();
        assert!(circuit.is_empty());
        assert_eq!(circuit.measurement_names().count(), 0);
    }

    #[test]
    fn test_zero_lines_rejected() {
        assert!(matches!(
            Circuit::build(&[] as &[GatePlacement], 0, &catalog()),
            Err(IrError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unknown_gate_rejected() {
        let placements = vec![gate("H", 0, 0.0), gate("Fredkin", 0, 10.0)];
        assert_eq!(
            Circuit::build(&placements, 1, &catalog()),
            Err(IrError::UnknownGate("Fredkin".into()))
        );
    }

    #[test]
    fn test_line_out_of_range() {
        let placements = vec![gate("H", 3, 0.0)];
        assert!(matches!(
            Circuit::build(&placements, 2, &catalog()),
            Err(IrError::QubitOutOfRange { qubit: 3, .. })
        ));
    }

    #[test]
    fn test_control_line_out_of_range() {
        let below = vec![gate("CNOT", 1, 0.0)];
        assert!(matches!(
            Circuit::build(&below, 2, &catalog()),
            Err(IrError::QubitOutOfRange { qubit: 2, .. })
        ));

        let above = vec![gate("CNOT", 0, 0.0).with_orientation(Orientation::Up)];
        assert!(matches!(
            Circuit::build(&above, 2, &catalog()),
            Err(IrError::QubitOutOfRange { qubit: -1, .. })
        ));

        let flipped = vec![gate("CNOT", 1, 0.0).with_orientation(Orientation::Up)];
        assert!(Circuit::build(&flipped, 2, &catalog()).is_ok());
    }
}
