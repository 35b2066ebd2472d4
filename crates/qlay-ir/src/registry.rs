//! Placement registry for a circuit canvas.
//!
//! The registry owns every gate currently dropped on the canvas together
//! with the canvas geometry needed to snap gates onto qubit lines. A
//! placement's line and orientation are computed when it is placed and
//! recomputed whenever it moves; a placement whose centre is moved outside
//! the canvas is deleted.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::catalog::{Arity, GateCatalog};
use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::placement::GatePlacement;

/// Default vertical distance between qubit lines.
pub const DEFAULT_LINE_SEPARATION: f64 = 80.0;

/// Stable handle to a placement in a [`PlacementRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlacementId(pub u32);

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Canvas dimensions and line spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasGeometry {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Distance between consecutive qubit lines; line `i` sits at
    /// `line_separation * (i + 1)`.
    pub line_separation: f64,
}

impl CanvasGeometry {
    /// Geometry with the default line separation.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            line_separation: DEFAULT_LINE_SEPARATION,
        }
    }

    /// Whether a point lies on the canvas (edges included).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self::new(800.0, 400.0)
    }
}

/// Result of moving a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The placement now sits on this line.
    Snapped(usize),
    /// The placement was dropped outside the canvas and deleted.
    Removed,
}

#[derive(Debug, Clone)]
struct Entry {
    id: PlacementId,
    arity: Arity,
    placement: GatePlacement,
}

/// All gates currently placed on a canvas, in insertion order.
#[derive(Debug, Clone)]
pub struct PlacementRegistry {
    geometry: CanvasGeometry,
    line_positions: Vec<f64>,
    entries: Vec<Entry>,
    next_id: u32,
}

impl PlacementRegistry {
    /// Create a registry with a single qubit line.
    pub fn new(geometry: CanvasGeometry) -> Self {
        let mut registry = Self {
            geometry,
            line_positions: Vec::new(),
            entries: Vec::new(),
            next_id: 0,
        };
        registry.layout_lines(1);
        registry
    }

    /// Canvas geometry.
    pub fn geometry(&self) -> CanvasGeometry {
        self.geometry
    }

    /// Vertical position of each qubit line.
    pub fn line_positions(&self) -> &[f64] {
        &self.line_positions
    }

    /// Number of qubit lines.
    pub fn qubit_line_count(&self) -> usize {
        self.line_positions.len()
    }

    /// Redraw `count` qubit lines and re-snap every placement.
    pub fn set_qubit_lines(&mut self, count: usize) -> IrResult<()> {
        if count == 0 {
            return Err(IrError::InvalidArgument(
                "a canvas needs at least one qubit line".into(),
            ));
        }
        self.layout_lines(count);
        for entry in &mut self.entries {
            entry.placement.snap_to_nearest_line(&self.line_positions)?;
        }
        debug!("Canvas now has {} qubit lines", count);
        Ok(())
    }

    fn layout_lines(&mut self, count: usize) {
        let separation = self.geometry.line_separation;
        self.line_positions = (0..count).map(|i| separation * (i + 1) as f64).collect();
    }

    /// Drop a gate centred at `(x, y)` and snap it to the nearest line.
    ///
    /// Fails with [`IrError::UnknownGate`] if `catalog` does not know the gate.
    pub fn place(
        &mut self,
        function_id: &str,
        x: f64,
        y: f64,
        catalog: &dyn GateCatalog,
    ) -> IrResult<PlacementId> {
        let arity = catalog.arity(function_id)?;
        let mut placement = GatePlacement::unchecked(function_id).at(x);
        placement.vertical_center = y;
        placement.snap_to_nearest_line(&self.line_positions)?;

        let id = PlacementId(self.next_id);
        self.next_id += 1;
        debug!("Placed {} as {} on line {}", function_id, id, placement.qubit_index);
        self.entries.push(Entry {
            id,
            arity,
            placement,
        });
        Ok(id)
    }

    /// Move a placement's centre to `(x, y)`.
    ///
    /// Outside the canvas the placement is deleted; otherwise it re-snaps.
    pub fn move_to(&mut self, id: PlacementId, x: f64, y: f64) -> IrResult<MoveOutcome> {
        if !self.geometry.contains(x, y) {
            self.remove(id)?;
            return Ok(MoveOutcome::Removed);
        }

        let lines = &self.line_positions;
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(IrError::PlacementNotFound(id))?;
        entry.placement.position = x;
        entry.placement.vertical_center = y;
        let line = entry.placement.snap_to_nearest_line(lines)?;
        Ok(MoveOutcome::Snapped(line))
    }

    /// Flip the control direction of a two-qubit gate.
    ///
    /// Returns whether anything changed; single-qubit gates are left alone.
    pub fn flip_orientation(&mut self, id: PlacementId) -> IrResult<bool> {
        let entry = self.entry_mut(id)?;
        if entry.arity != Arity::Two {
            return Ok(false);
        }
        entry.placement.orientation = entry.placement.orientation.flipped();
        Ok(true)
    }

    /// Replace a placement's scalar arguments (radians).
    pub fn set_angles(&mut self, id: PlacementId, angles: Vec<f64>) -> IrResult<()> {
        self.entry_mut(id)?.placement.angle_args = angles;
        Ok(())
    }

    /// Delete a placement.
    pub fn remove(&mut self, id: PlacementId) -> IrResult<GatePlacement> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(IrError::PlacementNotFound(id))?;
        debug!("Removed placement {}", id);
        Ok(self.entries.remove(index).placement)
    }

    /// Delete every placement and reset to a single line.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.layout_lines(1);
    }

    /// Look up a placement.
    pub fn get(&self, id: PlacementId) -> Option<&GatePlacement> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| &e.placement)
    }

    /// Placements in insertion order.
    pub fn placements(&self) -> impl Iterator<Item = &GatePlacement> {
        self.entries.iter().map(|e| &e.placement)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = PlacementId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the canvas is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the executable circuit from the current placements.
    pub fn build_circuit(&self, catalog: &dyn GateCatalog) -> IrResult<Circuit> {
        Circuit::build(self.placements(), self.qubit_line_count(), catalog)
    }

    fn entry_mut(&mut self, id: PlacementId) -> IrResult<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(IrError::PlacementNotFound(id))
    }
}

impl Default for PlacementRegistry {
    fn default() -> Self {
        Self::new(CanvasGeometry::default())
    }
}
