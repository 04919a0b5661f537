pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type, in canvas pixels unless stated otherwise.
pub type Point2 = nalgebra::Point2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
