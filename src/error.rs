use thiserror::Error;

use crate::facet::FacetId;

/// Top-level error type for the roof measurement engine.
#[derive(Debug, Error)]
pub enum RoofError {
    #[error(transparent)]
    Facet(#[from] FacetError),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Errors related to facet construction and lookup.
#[derive(Debug, Error, PartialEq)]
pub enum FacetError {
    #[error("a facet needs at least 3 points, got {found}")]
    InsufficientPoints { found: usize },

    #[error("pitch must be a positive finite number, got {0}")]
    InvalidPitch(f64),

    #[error("facet point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("facet outline crosses itself at edges {first} and {second}")]
    SelfIntersecting { first: usize, second: usize },

    #[error("facet not found: {0}")]
    NotFound(FacetId),
}

/// Errors related to canvas calibration.
#[derive(Debug, Error, PartialEq)]
pub enum CalibrationError {
    #[error("pixels per foot must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error("invalid calibration document: {0}")]
    Parse(String),
}

/// Errors related to the drawing session state machine.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("cannot {action} while session is {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
}

/// Errors related to facet tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`RoofError`].
pub type Result<T> = std::result::Result<T, RoofError>;
