//! Canvas calibration: how drawn pixels map to real-world feet.

use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, FacetError, Result, RoofError};

/// Default canvas scale, in pixels per real-world foot.
pub const PIXELS_PER_FOOT: f64 = 10.0;

/// Default roof pitch, in inches of rise per 12 inches of run.
pub const DEFAULT_PITCH: f64 = 6.0;

/// Scale and validation settings threaded through every measurement.
///
/// Every constructor, including deserialization, validates the values, so a
/// `Calibration` always has a positive finite scale and default pitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCalibration")]
pub struct Calibration {
    pixels_per_foot: f64,
    default_pitch: f64,
    require_simple_polygon: bool,
}

/// Unvalidated wire form of [`Calibration`]. Missing fields take defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawCalibration {
    pixels_per_foot: f64,
    default_pitch: f64,
    require_simple_polygon: bool,
}

impl Default for RawCalibration {
    fn default() -> Self {
        Self {
            pixels_per_foot: PIXELS_PER_FOOT,
            default_pitch: DEFAULT_PITCH,
            require_simple_polygon: false,
        }
    }
}

impl TryFrom<RawCalibration> for Calibration {
    type Error = RoofError;

    fn try_from(raw: RawCalibration) -> Result<Self> {
        let calibration = Self {
            pixels_per_foot: raw.pixels_per_foot,
            default_pitch: raw.default_pitch,
            require_simple_polygon: raw.require_simple_polygon,
        };
        calibration.validate()?;
        Ok(calibration)
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            pixels_per_foot: PIXELS_PER_FOOT,
            default_pitch: DEFAULT_PITCH,
            require_simple_polygon: false,
        }
    }
}

impl Calibration {
    /// Creates a calibration with the given scale and default settings otherwise.
    ///
    /// # Errors
    ///
    /// Returns `CalibrationError::InvalidScale` if `pixels_per_foot` is not a
    /// positive finite number.
    pub fn new(pixels_per_foot: f64) -> Result<Self> {
        let calibration = Self {
            pixels_per_foot,
            ..Self::default()
        };
        calibration.validate()?;
        Ok(calibration)
    }

    /// Sets the pitch used when none is supplied.
    ///
    /// # Errors
    ///
    /// Returns `FacetError::InvalidPitch` if `pitch` is not a positive finite number.
    pub fn with_default_pitch(mut self, pitch: f64) -> Result<Self> {
        self.default_pitch = pitch;
        self.validate()?;
        Ok(self)
    }

    /// Enables or disables rejection of self-intersecting outlines.
    #[must_use]
    pub fn with_require_simple_polygon(mut self, require: bool) -> Self {
        self.require_simple_polygon = require;
        self
    }

    /// Parses a calibration from a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `CalibrationError::Parse` for malformed JSON, or the
    /// corresponding validation error for out-of-range values.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawCalibration =
            serde_json::from_str(text).map_err(|e| CalibrationError::Parse(e.to_string()))?;
        Self::try_from(raw)
    }

    fn validate(&self) -> Result<()> {
        if !(self.pixels_per_foot.is_finite() && self.pixels_per_foot > 0.0) {
            return Err(CalibrationError::InvalidScale(self.pixels_per_foot).into());
        }
        if !(self.default_pitch.is_finite() && self.default_pitch > 0.0) {
            return Err(FacetError::InvalidPitch(self.default_pitch).into());
        }
        Ok(())
    }

    /// Canvas pixels per real-world foot.
    #[must_use]
    pub fn pixels_per_foot(&self) -> f64 {
        self.pixels_per_foot
    }

    /// Pitch assigned when the user supplies none or an unusable one.
    #[must_use]
    pub fn default_pitch(&self) -> f64 {
        self.default_pitch
    }

    /// Whether self-intersecting outlines are rejected when finalizing.
    #[must_use]
    pub fn require_simple_polygon(&self) -> bool {
        self.require_simple_polygon
    }

    /// Converts a canvas length in pixels to feet.
    #[must_use]
    pub fn to_feet(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_foot
    }

    /// Converts a canvas area in square pixels to square feet.
    #[must_use]
    pub fn to_square_feet(&self, square_pixels: f64) -> f64 {
        square_pixels / (self.pixels_per_foot * self.pixels_per_foot)
    }
}
