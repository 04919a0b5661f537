use crate::math::intersect_2d::find_self_intersection;
use crate::math::Point2;

/// Checks whether a closed outline is a simple polygon (no edge crosses or
/// touches a non-adjacent edge, and no adjacent edges fold back).
pub struct IsSimplePolygon<'a> {
    points: &'a [Point2],
}

impl<'a> IsSimplePolygon<'a> {
    /// Creates a new `IsSimplePolygon` query.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self { points }
    }

    /// Executes the query, returning `true` if the outline is simple.
    #[must_use]
    pub fn execute(&self) -> bool {
        self.first_crossing().is_none()
    }

    /// Returns the indices of the first offending edge pair, if any.
    #[must_use]
    pub fn first_crossing(&self) -> Option<(usize, usize)> {
        find_self_intersection(self.points)
    }
}
