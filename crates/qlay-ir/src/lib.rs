//! Qlay Circuit Model
//!
//! This crate turns a bag of gates dropped onto qubit lines into a
//! well-ordered circuit program. It never touches quantum state; execution
//! lives in `qlay-engine`.
//!
//! # Core Components
//!
//! - **Catalog**: [`GateCatalog`] answers arity / scalar-argument /
//!   measurement questions about a gate identifier without invoking it
//! - **Placements**: [`GatePlacement`] records a gate's line, control
//!   [`Orientation`], horizontal position and angle arguments
//! - **Registry**: [`PlacementRegistry`] tracks placements on a canvas,
//!   snapping them to the nearest line and deleting those dragged off
//! - **Linearization**: [`linearize`] and [`Circuit::build`] produce the
//!   left-to-right execution order and name measurement points `M0`, `M1`, ...
//!
//! # Example
//!
//! ```rust
//! use qlay_ir::{Circuit, GatePlacement, GateSignature, SignatureCatalog};
//!
//! let catalog = SignatureCatalog::new()
//!     .with("H", GateSignature::single())
//!     .with("M", GateSignature::measurement());
//!
//! let placements = vec![
//!     GatePlacement::new("M", &catalog).unwrap().at(200.0),
//!     GatePlacement::new("H", &catalog).unwrap().at(100.0),
//! ];
//!
//! let circuit = Circuit::build(&placements, 1, &catalog).unwrap();
//! assert_eq!(circuit.placements()[0].function_id(), "H");
//! assert_eq!(circuit.measurement_names().collect::<Vec<_>>(), vec!["M0"]);
//! ```

pub mod catalog;
pub mod circuit;
pub mod error;
pub mod placement;
pub mod registry;

pub use catalog::{Arity, GateCatalog, GateSignature, SignatureCatalog};
pub use circuit::{Circuit, MEASUREMENT_PREFIX, linearize, measurement_name};
pub use error::{IrError, IrResult};
pub use placement::{GatePlacement, Orientation, nearest_line};
pub use registry::{
    CanvasGeometry, DEFAULT_LINE_SEPARATION, MoveOutcome, PlacementId, PlacementRegistry,
};
