use crate::calibration::Calibration;
use crate::error::{FacetError, Result};
use crate::facet::{validate_outline, FacetId, Pitch, RoofFacet};
use crate::math::Point2;
use crate::operations::query::IsSimplePolygon;

/// How the caller supplied the pitch.
#[derive(Debug, Clone)]
enum PitchInput {
    Unset,
    Value(Pitch),
    Text(String),
}

/// Turns a drawn outline into a labeled [`RoofFacet`] with derived area and
/// measurements.
///
/// Blank labels become `"Facet N"` where `N` is one past the number of
/// facets already in the diagram. Missing or unusable pitch text falls back
/// to the calibration's default pitch.
pub struct FinalizeFacet {
    points: Vec<Point2>,
    existing_facet_count: usize,
    pitch: PitchInput,
    label: String,
    calibration: Calibration,
}

impl FinalizeFacet {
    /// Creates a new `FinalizeFacet` operation.
    #[must_use]
    pub fn new(points: Vec<Point2>, existing_facet_count: usize) -> Self {
        Self {
            points,
            existing_facet_count,
            pitch: PitchInput::Unset,
            label: String::new(),
            calibration: Calibration::default(),
        }
    }

    /// Sets an already validated pitch.
    #[must_use]
    pub fn with_pitch(mut self, pitch: Pitch) -> Self {
        self.pitch = PitchInput::Value(pitch);
        self
    }

    /// Sets the pitch from user text, e.g. `"6"` or `"6:12"`.
    #[must_use]
    pub fn with_pitch_text(mut self, text: impl Into<String>) -> Self {
        self.pitch = PitchInput::Text(text.into());
        self
    }

    /// Sets the user-facing label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the canvas calibration.
    #[must_use]
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Executes the operation, producing a new facet with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `FacetError::InsufficientPoints` for fewer than 3 points,
    /// `FacetError::NonFiniteCoordinate` for NaN or infinite coordinates, and
    /// `FacetError::SelfIntersecting` when the calibration requires a simple
    /// outline and the points cross themselves.
    pub fn execute(&self) -> Result<RoofFacet> {
        validate_outline(&self.points)?;

        if let Some((first, second)) = IsSimplePolygon::new(&self.points).first_crossing() {
            if self.calibration.require_simple_polygon() {
                return Err(FacetError::SelfIntersecting { first, second }.into());
            }
            tracing::warn!(first, second, "accepting self-intersecting facet outline");
        }

        let pitch = self.resolve_pitch();
        let label = match self.label.trim() {
            "" => format!("Facet {}", self.existing_facet_count + 1),
            label => label.to_owned(),
        };

        let facet = RoofFacet::from_outline(
            FacetId::new(),
            self.points.clone(),
            pitch,
            label,
            self.calibration,
        )?;
        tracing::debug!(
            id = %facet.id(),
            label = facet.label(),
            area = facet.area(),
            pitch = pitch.rise(),
            "finalized facet"
        );
        Ok(facet)
    }

    fn resolve_pitch(&self) -> Pitch {
        let fallback = Pitch::new(self.calibration.default_pitch()).unwrap_or_default();
        match &self.pitch {
            PitchInput::Unset => fallback,
            PitchInput::Value(pitch) => *pitch,
            PitchInput::Text(text) => Pitch::parse_or(text, fallback),
        }
    }
}
