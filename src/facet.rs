//! Finalized roof facets and the values they carry.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calibration::{Calibration, DEFAULT_PITCH, PIXELS_PER_FOOT};
use crate::error::{FacetError, Result, RoofError};
use crate::math::Point2;
use crate::operations::measure::{ComputeArea, ComputeMeasurements};

/// Square feet in one roofing square.
pub const SQUARE_FEET_PER_SQUARE: f64 = 100.0;

/// Unique identifier of a facet, assigned when it is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetId(Uuid);

impl FacetId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FacetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FacetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Roof slope as inches of rise per 12 inches of run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Pitch(f64);

impl TryFrom<f64> for Pitch {
    type Error = RoofError;

    fn try_from(rise: f64) -> Result<Self> {
        Self::new(rise)
    }
}

impl From<Pitch> for f64 {
    fn from(pitch: Pitch) -> Self {
        pitch.0
    }
}

impl Pitch {
    /// Creates a pitch from a rise-per-12 value.
    ///
    /// # Errors
    ///
    /// Returns `FacetError::InvalidPitch` if `rise` is not a positive finite number.
    pub fn new(rise: f64) -> Result<Self> {
        if rise.is_finite() && rise > 0.0 {
            Ok(Self(rise))
        } else {
            Err(FacetError::InvalidPitch(rise).into())
        }
    }

    /// Parses user text such as `"6"`, `"7.5"` or `"6:12"`, falling back to
    /// `fallback` when the text is blank, malformed, or not positive.
    #[must_use]
    pub fn parse_or(text: &str, fallback: Pitch) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return fallback;
        }
        match Self::parse_rise(trimmed).and_then(|rise| Self::new(rise).ok()) {
            Some(pitch) => pitch,
            None => {
                tracing::warn!(
                    input = trimmed,
                    fallback = fallback.0,
                    "unusable pitch, using fallback"
                );
                fallback
            }
        }
    }

    /// Accepts a bare number or a `rise:run` / `rise/run` ratio normalized to a run of 12.
    fn parse_rise(text: &str) -> Option<f64> {
        match text.split_once(|c: char| c == ':' || c == '/') {
            Some((rise, run)) => {
                let rise: f64 = rise.trim().parse().ok()?;
                let run: f64 = run.trim().parse().ok()?;
                (run > 0.0).then(|| rise * 12.0 / run)
            }
            None => text.parse().ok(),
        }
    }

    /// Rise per 12 units of run.
    #[must_use]
    pub fn rise(self) -> f64 {
        self.0
    }

    /// Ratio of sloped surface length to horizontal run.
    #[must_use]
    pub fn slope_factor(self) -> f64 {
        let ratio = self.0 / 12.0;
        (1.0 + ratio * ratio).sqrt()
    }
}

impl Default for Pitch {
    fn default() -> Self {
        Self(DEFAULT_PITCH)
    }
}

/// Axis-aligned extent and outline length of a facet, in feet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    /// Horizontal bounding-box extent.
    pub width: f64,
    /// Vertical bounding-box extent.
    pub height: f64,
    /// Length of the closed outline.
    pub perimeter: f64,
}

/// Checks that an outline can become a facet: at least 3 points, all finite.
///
/// # Errors
///
/// Returns `FacetError::InsufficientPoints` or `FacetError::NonFiniteCoordinate`.
pub(crate) fn validate_outline(points: &[Point2]) -> Result<()> {
    if points.len() < 3 {
        return Err(FacetError::InsufficientPoints {
            found: points.len(),
        }
        .into());
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(FacetError::NonFiniteCoordinate { index }.into());
    }
    Ok(())
}

/// One planar roof section with its derived measurements.
///
/// Facets are immutable once finalized; changing the outline means building
/// a new facet and replacing the old one in its diagram. Area and
/// measurements are serialized for export but rebuilt from the outline on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFacet")]
pub struct RoofFacet {
    id: FacetId,
    points: Vec<Point2>,
    pitch: Pitch,
    label: String,
    pixels_per_foot: f64,
    area: f64,
    measurements: Measurements,
}

/// Stored inputs of a facet; anything derived is ignored.
#[derive(Debug, Deserialize)]
struct RawFacet {
    id: FacetId,
    points: Vec<Point2>,
    pitch: Pitch,
    label: String,
    #[serde(default = "default_pixels_per_foot")]
    pixels_per_foot: f64,
}

fn default_pixels_per_foot() -> f64 {
    PIXELS_PER_FOOT
}

impl TryFrom<RawFacet> for RoofFacet {
    type Error = RoofError;

    fn try_from(raw: RawFacet) -> Result<Self> {
        let calibration = Calibration::new(raw.pixels_per_foot)?;
        Self::from_outline(raw.id, raw.points, raw.pitch, raw.label, calibration)
    }
}

impl RoofFacet {
    /// Builds a facet, deriving area and measurements from the outline.
    pub(crate) fn from_outline(
        id: FacetId,
        points: Vec<Point2>,
        pitch: Pitch,
        label: String,
        calibration: Calibration,
    ) -> Result<Self> {
        validate_outline(&points)?;
        let area = ComputeArea::new(&points)
            .with_calibration(calibration)
            .execute();
        let measurements = ComputeMeasurements::new(&points)
            .with_calibration(calibration)
            .execute();
        Ok(Self {
            id,
            points,
            pitch,
            label,
            pixels_per_foot: calibration.pixels_per_foot(),
            area,
            measurements,
        })
    }

    #[must_use]
    pub fn id(&self) -> FacetId {
        self.id
    }

    /// Outline vertices in canvas pixels.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Plan (horizontal projection) area in square feet.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    #[must_use]
    pub fn measurements(&self) -> Measurements {
        self.measurements
    }

    /// Scale the outline was measured with.
    #[must_use]
    pub fn pixels_per_foot(&self) -> f64 {
        self.pixels_per_foot
    }

    /// Surface area along the slope, in square feet.
    #[must_use]
    pub fn sloped_area(&self) -> f64 {
        self.area * self.pitch.slope_factor()
    }

    /// Plan area in roofing squares.
    #[must_use]
    pub fn squares(&self) -> f64 {
        self.area / SQUARE_FEET_PER_SQUARE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pitch_rejects_non_positive() {
        assert!(Pitch::new(0.0).is_err());
        assert!(Pitch::new(-3.0).is_err());
        assert!(Pitch::new(f64::NAN).is_err());
        assert_relative_eq!(Pitch::new(4.0).unwrap().rise(), 4.0);
    }

    #[test]
    fn pitch_parse_falls_back() {
        let fallback = Pitch::default();
        assert_eq!(Pitch::parse_or("", fallback), fallback);
        assert_eq!(Pitch::parse_or("steep", fallback), fallback);
        assert_eq!(Pitch::parse_or("-2", fallback), fallback);
        assert_eq!(Pitch::parse_or("0", fallback), fallback);
        assert_eq!(Pitch::parse_or("6:0", fallback), fallback);
    }

    #[test]
    fn pitch_parse_accepts_numbers_and_ratios() {
        let fallback = Pitch::default();
        assert_relative_eq!(Pitch::parse_or(" 8 ", fallback).rise(), 8.0);
        assert_relative_eq!(Pitch::parse_or("7.5", fallback).rise(), 7.5);
        assert_relative_eq!(Pitch::parse_or("4:12", fallback).rise(), 4.0);
        assert_relative_eq!(Pitch::parse_or("1/2", fallback).rise(), 6.0);
    }

    #[test]
    fn slope_factor_of_twelve_pitch_is_root_two() {
        let pitch = Pitch::new(12.0).unwrap();
        assert_relative_eq!(pitch.slope_factor(), 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    fn rect(w: f64, h: f64) -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, h),
            Point2::new(0.0, h),
        ]
    }

    fn facet(points: Vec<Point2>, rise: f64) -> RoofFacet {
        RoofFacet::from_outline(
            FacetId::new(),
            points,
            Pitch::new(rise).unwrap(),
            "Facet 1".into(),
            Calibration::default(),
        )
        .unwrap()
    }

    #[test]
    fn derived_areas() {
        let facet = facet(rect(250.0, 100.0), 12.0);
        assert_relative_eq!(facet.area(), 250.0, epsilon = 1e-9);
        assert_relative_eq!(facet.squares(), 2.5, epsilon = 1e-9);
        assert_relative_eq!(facet.sloped_area(), 250.0 * 2.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn outline_needs_three_finite_points() {
        let err = validate_outline(&rect(10.0, 10.0)[..2]).unwrap_err();
        assert!(matches!(
            err,
            RoofError::Facet(FacetError::InsufficientPoints { found: 2 })
        ));

        let mut pts = rect(10.0, 10.0);
        pts[2].y = f64::INFINITY;
        let err = validate_outline(&pts).unwrap_err();
        assert!(matches!(
            err,
            RoofError::Facet(FacetError::NonFiniteCoordinate { index: 2 })
        ));
    }

    #[test]
    fn pitch_deserialize_validates() {
        assert!(serde_json::from_str::<Pitch>("-3.0").is_err());
        assert!(serde_json::from_str::<Pitch>("0").is_err());
        assert_relative_eq!(serde_json::from_str::<Pitch>("8.0").unwrap().rise(), 8.0);
        assert_eq!(serde_json::to_string(&Pitch::default()).unwrap(), "6.0");
    }

    #[test]
    fn deserialize_rebuilds_derived_values() {
        let original = facet(rect(100.0, 100.0), 6.0);
        let mut value = serde_json::to_value(&original).unwrap();
        value["area"] = serde_json::json!(9999.0);
        value["measurements"]["perimeter"] = serde_json::json!(1.0);

        let restored: RoofFacet = serde_json::from_value(value).unwrap();
        assert_eq!(restored.id(), original.id());
        assert_relative_eq!(restored.area(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(restored.measurements().perimeter, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn deserialize_rejects_bad_inputs() {
        let original = facet(rect(100.0, 100.0), 6.0);
        let value = serde_json::to_value(&original).unwrap();

        let mut bad_pitch = value.clone();
        bad_pitch["pitch"] = serde_json::json!(-3.0);
        assert!(serde_json::from_value::<RoofFacet>(bad_pitch).is_err());

        let mut short = value.clone();
        short["points"] = serde_json::json!([[0.0, 0.0]]);
        assert!(serde_json::from_value::<RoofFacet>(short).is_err());

        let mut bad_scale = value;
        bad_scale["pixels_per_foot"] = serde_json::json!(0.0);
        assert!(serde_json::from_value::<RoofFacet>(bad_scale).is_err());
    }

    #[test]
    fn facet_ids_are_unique() {
        assert_ne!(FacetId::new(), FacetId::new());
    }
}
