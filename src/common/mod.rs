//! Common utilities and types for the goal sender

/// Common types used across the codebase
pub mod types {
    /// A 2D point
    pub type Point2D = (f64, f64);
}

use types::Point2D;

/// Squared Euclidean distance between two points.
///
/// The reach test only ever compares against a squared radius, so the
/// square root is never taken.
pub fn squared_distance(a: Point2D, b: Point2D) -> f64 {
    let x = a.0 - b.0;
    let y = a.1 - b.1;
    x * x + y * y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_distance_of_3_4_triangle() {
        assert_eq!(squared_distance((0.0, 0.0), (3.0, 4.0)), 25.0);
    }

    #[test]
    fn squared_distance_is_symmetric() {
        let a = (1.5, -2.0);
        let b = (-0.5, 4.0);
        assert_eq!(squared_distance(a, b), squared_distance(b, a));
    }

    #[test]
    fn squared_distance_of_coincident_points_is_zero() {
        assert_eq!(squared_distance((2.0, 2.0), (2.0, 2.0)), 0.0);
    }
}
