use crate::calibration::Calibration;
use crate::facet::Measurements;
use crate::math::polygon_2d::{bounds_2d, closed_perimeter_2d};
use crate::math::Point2;

/// Computes the axis-aligned width and height and the closed perimeter of an
/// outline, in feet.
///
/// Width and height come from the bounding box in canvas axes, so a facet
/// drawn rotated reports its bounding extent rather than its edge lengths.
pub struct ComputeMeasurements<'a> {
    points: &'a [Point2],
    calibration: Calibration,
}

impl<'a> ComputeMeasurements<'a> {
    /// Creates a new `ComputeMeasurements` query with the default calibration.
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

    /// Executes the query. Fewer than 2 points yield all zeros.
    #[must_use]
    pub fn execute(&self) -> Measurements {
        if self.points.len() < 2 {
            return Measurements::default();
        }
        let Some((min, max)) = bounds_2d(self.points) else {
            return Measurements::default();
        };
        Measurements {
            width: self.calibration.to_feet(max.x - min.x),
            height: self.calibration.to_feet(max.y - min.y),
            perimeter: self.calibration.to_feet(closed_perimeter_2d(self.points)),
        }
    }
}
