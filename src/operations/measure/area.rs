use crate::calibration::Calibration;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

/// Computes the plan area of a closed outline in square feet.
///
/// Uses the shoelace formula over the cyclic point sequence and takes the
/// absolute value, so winding order does not matter. Fewer than 3 points
/// yield 0. Self-intersecting outlines are not corrected; their result is the
/// net shoelace area.
pub struct ComputeArea<'a> {
    points: &'a [Point2],
    calibration: Calibration,
}

impl<'a> ComputeArea<'a> {
    /// Creates a new `ComputeArea` query with the default calibration.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self {
            points,
            calibration: Calibration::default(),
        }
    }

    /// Sets the canvas calibration used for the pixel-to-foot conversion.
    #[must_use]
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Executes the query, returning the area in square feet.
    #[must_use]
    pub fn execute(&self) -> f64 {
        let square_pixels = signed_area_2d(self.points).abs();
        self.calibration.to_square_feet(square_pixels)
    }
}
