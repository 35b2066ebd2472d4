//! Gate placements on qubit lines.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{Arity, GateCatalog};
use crate::error::{IrError, IrResult};

/// Which neighbouring qubit line supplies a two-qubit gate's control operand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Control on the line below (`+1`).
    #[default]
    Down,
    /// Control on the line above (`-1`).
    Up,
}

impl Orientation {
    /// Signed line offset of the control operand.
    #[inline]
    pub fn sign(self) -> isize {
        match self {
            Orientation::Down => 1,
            Orientation::Up => -1,
        }
    }

    /// The opposite orientation.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Down => Orientation::Up,
            Orientation::Up => Orientation::Down,
        }
    }

    /// Orientation for a `+1`/`-1` sign.
    pub fn from_sign(sign: i32) -> IrResult<Self> {
        match sign {
            1 => Ok(Orientation::Down),
            -1 => Ok(Orientation::Up),
            other => Err(IrError::InvalidArgument(format!(
                "orientation sign must be +1 or -1, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.sign())
    }
}

/// One gate dropped onto the circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatePlacement {
    /// Identifier of the gate operation to invoke.
    #[serde(rename = "gate")]
    function_id: String,
    /// Line of the gate's primary operand.
    #[serde(rename = "line", default)]
    pub qubit_index: usize,
    /// Control direction, only meaningful for two-qubit gates.
    #[serde(default)]
    pub orientation: Orientation,
    /// Horizontal coordinate; the sole ordering key.
    pub position: f64,
    /// Vertical centre, used for snapping to the nearest line.
    #[serde(default)]
    pub vertical_center: f64,
    /// Scalar arguments in radians, in declared order.
    #[serde(rename = "angles", default)]
    pub angle_args: Vec<f64>,
    /// Assigned by linearization to measurement gates only.
    #[serde(skip)]
    measurement_name: Option<String>,
}

impl GatePlacement {
    /// Create a placement for `function_id`, validated against `catalog`.
    pub fn new(function_id: impl Into<String>, catalog: &dyn GateCatalog) -> IrResult<Self> {
        let function_id = function_id.into();
        catalog.resolve_signature(&function_id)?;
        Ok(Self::unchecked(function_id))
    }

    /// Create a placement without consulting a catalog.
    ///
    /// Unknown identifiers are reported later, when the circuit is built.
    pub fn unchecked(function_id: impl Into<String>) -> Self {
        Self {
            function_id: function_id.into(),
            qubit_index: 0,
            orientation: Orientation::default(),
            position: 0.0,
            vertical_center: 0.0,
            angle_args: Vec::new(),
            measurement_name: None,
        }
    }

    /// Set the horizontal position.
    #[must_use]
    pub fn at(mut self, position: f64) -> Self {
        self.position = position;
        self
    }

    /// Put the primary operand on `qubit_index`.
    #[must_use]
    pub fn on_line(mut self, qubit_index: usize) -> Self {
        self.qubit_index = qubit_index;
        self
    }

    /// Set the scalar arguments (radians).
    #[must_use]
    pub fn with_angles(mut self, angles: impl IntoIterator<Item = f64>) -> Self {
        self.angle_args = angles.into_iter().collect();
        self
    }

    /// Set the control direction without consulting a catalog.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// The gate's function identifier.
    pub fn function_id(&self) -> &str {
        &self.function_id
    }

    /// Measurement point name, present only after linearization of a
    /// measurement gate.
    pub fn measurement_name(&self) -> Option<&str> {
        self.measurement_name.as_deref()
    }

    pub(crate) fn set_measurement_name(&mut self, name: Option<String>) {
        self.measurement_name = name;
    }

    /// Snap the primary operand to the line closest to the vertical centre.
    ///
    /// Ties go to the first line in `line_positions`.
    pub fn snap_to_nearest_line(&mut self, line_positions: &[f64]) -> IrResult<usize> {
        let index = nearest_line(self.vertical_center, line_positions).ok_or_else(|| {
            IrError::InvalidArgument("cannot snap to a circuit without qubit lines".into())
        })?;
        self.qubit_index = index;
        Ok(index)
    }

    /// Record the control direction. No-op unless the gate has two operands.
    ///
    /// Returns whether the orientation was applied.
    pub fn set_orientation(
        &mut self,
        orientation: Orientation,
        catalog: &dyn GateCatalog,
    ) -> IrResult<bool> {
        if catalog.arity(&self.function_id)? != Arity::Two {
            return Ok(false);
        }
        self.orientation = orientation;
        Ok(true)
    }

    /// Line index of the control operand for a two-qubit gate.
    ///
    /// May be negative or past the last line; callers validate against
    /// the qubit count.
    pub fn control_line(&self) -> isize {
        self.qubit_index as isize + self.orientation.sign()
    }
}

/// Index of the line closest to `y`, first occurrence winning ties.
pub fn nearest_line(y: f64, line_positions: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &line_y) in line_positions.iter().enumerate() {
        let distance = (line_y - y).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GateSignature, SignatureCatalog};

    fn catalog() -> SignatureCatalog {
        SignatureCatalog::new()
            .with("H", GateSignature::single())
            .with("CNOT", GateSignature::pair())
    }

    #[test]
    fn test_nearest_line() {
        let lines = [80.0, 160.0, 240.0];
        assert_eq!(nearest_line(0.0, &lines), Some(0));
        assert_eq!(nearest_line(170.0, &lines), Some(1));
        assert_eq!(nearest_line(1000.0, &lines), Some(2));
        assert_eq!(nearest_line(10.0, &[]), None);
    }

    #[test]
    fn test_nearest_line_tie_prefers_first() {
        assert_eq!(nearest_line(120.0, &[80.0, 160.0]), Some(0));
        assert_eq!(nearest_line(5.0, &[5.0, 5.0]), Some(0));
    }

    #[test]
    fn test_snap_updates_index() {
        let mut placement = GatePlacement::new("H", &catalog()).unwrap();
        placement.vertical_center = 235.0;
        assert_eq!(placement.snap_to_nearest_line(&[80.0, 160.0, 240.0]).unwrap(), 2);
        assert_eq!(placement.qubit_index, 2);

        assert!(matches!(
            placement.snap_to_nearest_line(&[]),
            Err(IrError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unknown_gate_rejected() {
        let err = GatePlacement::new("Toffoli", &catalog()).unwrap_err();
        assert_eq!(err, IrError::UnknownGate("Toffoli".into()));
    }

    #[test]
    fn test_orientation_ignored_for_single_qubit_gate() {
        let catalog = catalog();
        let mut h = GatePlacement::new("H", &catalog).unwrap();
        assert!(!h.set_orientation(Orientation::Up, &catalog).unwrap());
        assert_eq!(h.orientation, Orientation::Down);

        let mut cnot = GatePlacement::new("CNOT", &catalog).unwrap().on_line(1);
        assert!(cnot.set_orientation(Orientation::Up, &catalog).unwrap());
        assert_eq!(cnot.control_line(), 0);
    }

    #[test]
    fn test_orientation_sign() {
        assert_eq!(Orientation::from_sign(-1).unwrap(), Orientation::Up);
        assert_eq!(Orientation::Up.flipped(), Orientation::Down);
        assert_eq!(Orientation::Down.to_string(), "+1");
        assert!(Orientation::from_sign(0).is_err());
    }

    #[test]
    fn test_deserialize_placement() {
        let json = r#"{"gate": "Rx", "line": 1, "position": 40.0, "angles": [1.5]}"#;
        let placement: GatePlacement = serde_json::from_str(json).unwrap();
        assert_eq!(placement.function_id(), "Rx");
        assert_eq!(placement.qubit_index, 1);
        assert_eq!(placement.orientation, Orientation::Down);
        assert_eq!(placement.angle_args, vec![1.5]);
        assert!(placement.measurement_name().is_none());
    }
}
