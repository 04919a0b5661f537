use super::Point2;

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The last point
/// connects back to the first.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Sum of edge lengths around a closed polygon, including the closing edge.
#[must_use]
pub fn closed_perimeter_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| nalgebra::distance(&points[i], &points[(i + 1) % n]))
        .sum()
}

/// Axis-aligned bounds as `(min, max)` corners, or `None` for an empty slice.
#[must_use]
pub fn bounds_2d(points: &[Point2]) -> Option<(Point2, Point2)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for pt in &points[1..] {
        min.x = min.x.min(pt.x);
        min.y = min.y.min(pt.y);
        max.x = max.x.max(pt.x);
        max.y = max.y.max(pt.y);
    }
    Some((min, max))
}

/// Even-odd containment test for a closed polygon.
///
/// Points exactly on the boundary may fall either way.
#[must_use]
pub fn contains_point_2d(points: &[Point2], p: &Point2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (&points[i], &points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn unit_square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert!((signed_area_2d(&unit_square()) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = unit_square();
        pts.reverse();
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[Point2::new(3.0, 4.0)]).abs() < TOLERANCE);
        assert!(signed_area_2d(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn perimeter_closes_the_loop() {
        assert!((closed_perimeter_2d(&unit_square()) - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn perimeter_of_two_points_goes_there_and_back() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)];
        assert!((closed_perimeter_2d(&pts) - 10.0).abs() < TOLERANCE);
    }

    #[test]
    fn bounds_basic() {
        let pts = [
            Point2::new(2.0, -1.0),
            Point2::new(-3.0, 4.0),
            Point2::new(5.0, 0.5),
        ];
        let (min, max) = bounds_2d(&pts).unwrap();
        assert_eq!(min, Point2::new(-3.0, -1.0));
        assert_eq!(max, Point2::new(5.0, 4.0));
        assert!(bounds_2d(&[]).is_none());
    }

    #[test]
    fn contains_point_in_concave_outline() {
        let l_shape = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert!(contains_point_2d(&l_shape, &Point2::new(0.5, 1.5)));
        assert!(contains_point_2d(&l_shape, &Point2::new(1.5, 0.5)));
        assert!(!contains_point_2d(&l_shape, &Point2::new(1.5, 1.5)));
        assert!(!contains_point_2d(&l_shape, &Point2::new(3.0, 0.5)));
        assert!(!contains_point_2d(&l_shape[..2], &Point2::new(0.5, 0.0)));
    }
}
