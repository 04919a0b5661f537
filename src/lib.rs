//! Roof facet geometry and measurement.
//!
//! Points placed on a drawing canvas become labeled roof facets with an area,
//! bounding dimensions and a perimeter in feet. Facets are collected into a
//! [`RoofDiagram`] whose total area is always summed from its facets.
//!
//! ```
//! use roofline::math::Point2;
//! use roofline::operations::creation::FinalizeFacet;
//! use roofline::RoofDiagram;
//!
//! let mut diagram = RoofDiagram::new();
//! let square = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(100.0, 0.0),
//!     Point2::new(100.0, 100.0),
//!     Point2::new(0.0, 100.0),
//! ];
//! let facet = FinalizeFacet::new(square, diagram.len()).execute()?;
//! assert!((facet.area() - 100.0).abs() < 1e-9);
//! diagram.add_facet(facet);
//! assert!((diagram.total_area() - 100.0).abs() < 1e-9);
//! # Ok::<(), roofline::RoofError>(())
//! ```

pub mod calibration;
pub mod diagram;
pub mod error;
pub mod facet;
pub mod math;
pub mod operations;
pub mod session;
pub mod tessellation;

pub use calibration::{Calibration, DEFAULT_PITCH, PIXELS_PER_FOOT};
pub use diagram::{DiagramId, DiagramSnapshot, RoofDiagram};
pub use error::{Result, RoofError};
pub use facet::{FacetId, Measurements, Pitch, RoofFacet};
pub use session::{DrawingSession, SessionState};
