use gridnav_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Squared Euclidean distance, exact in integers.
#[inline]
pub fn dist2(a: Point, b: Point) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

/// Euclidean (L2) distance.
#[inline]
pub fn euclid(a: Point, b: Point) -> f64 {
    (dist2(a, b) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_agree_on_axis_aligned_moves() {
        let a = Point::new(2, 3);
        let b = Point::new(7, 3);
        assert_eq!(manhattan(a, b), 5);
        assert_eq!(chebyshev(a, b), 5);
        assert_eq!(dist2(a, b), 25);
        assert_eq!(euclid(a, b), 5.0);
    }

    #[test]
    fn diagonal_distances() {
        let a = Point::ZERO;
        let b = Point::new(3, 4);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(chebyshev(a, b), 4);
        assert_eq!(euclid(a, b), 5.0);
    }
}
