use super::{Point2, TOLERANCE};

/// Twice the signed area of triangle `(a, b, c)`.
///
/// Positive when `c` lies to the left of `a → b`.
#[must_use]
pub fn orient_2d(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Whether `p`, known to be collinear with `a → b`, lies within the segment's extent.
fn within_segment(a: &Point2, b: &Point2, p: &Point2) -> bool {
    p.x >= a.x.min(b.x) - TOLERANCE
        && p.x <= a.x.max(b.x) + TOLERANCE
        && p.y >= a.y.min(b.y) - TOLERANCE
        && p.y <= a.y.max(b.y) + TOLERANCE
}

/// Closed segment-segment test in 2D: endpoint contact and collinear overlap count.
#[must_use]
pub fn segments_intersect_2d(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let d1 = orient_2d(b0, b1, a0);
    let d2 = orient_2d(b0, b1, a1);
    let d3 = orient_2d(a0, a1, b0);
    let d4 = orient_2d(a0, a1, b1);

    let straddles =
        |p: f64, q: f64| (p > TOLERANCE && q < -TOLERANCE) || (p < -TOLERANCE && q > TOLERANCE);
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    (d1.abs() <= TOLERANCE && within_segment(b0, b1, a0))
        || (d2.abs() <= TOLERANCE && within_segment(b0, b1, a1))
        || (d3.abs() <= TOLERANCE && within_segment(a0, a1, b0))
        || (d4.abs() <= TOLERANCE && within_segment(a0, a1, b1))
}

/// Whether two edges sharing vertex `shared` fold back over each other.
fn adjacent_edges_overlap(shared: &Point2, p: &Point2, q: &Point2) -> bool {
    let u = p - shared;
    let v = q - shared;
    orient_2d(shared, p, q).abs() <= TOLERANCE && u.dot(&v) > TOLERANCE
}

/// Finds the first pair of edges of a closed polygon that cross or touch
/// where they should not.
///
/// Edge `i` runs from `points[i]` to `points[(i + 1) % n]`. Zero-length edges
/// from repeated points are skipped. Returns the edge indices `(first, second)`
/// with `first < second`, or `None` if the outline is simple.
#[must_use]
pub fn find_self_intersection(points: &[Point2]) -> Option<(usize, usize)> {
    let n = points.len();
    let edges: Vec<(usize, &Point2, &Point2)> = (0..n)
        .map(|i| (i, &points[i], &points[(i + 1) % n]))
        .filter(|(_, a, b)| nalgebra::distance(*a, *b) > TOLERANCE)
        .collect();
    let m = edges.len();
    if m < 3 {
        return None;
    }

    for i in 0..m {
        let (ei, a0, a1) = edges[i];
        for j in (i + 1)..m {
            let (ej, b0, b1) = edges[j];
            let hit = if j == i + 1 {
                adjacent_edges_overlap(a1, a0, b1)
            } else if i == 0 && j == m - 1 {
                adjacent_edges_overlap(a0, a1, b0)
            } else {
                segments_intersect_2d(a0, a1, b0, b1)
            };
            if hit {
                return Some((ei, ej));
            }
        }
    }
    None
}
