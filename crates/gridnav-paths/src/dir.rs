use gridnav_core::Point;

/// One of the eight compass directions on a grid.
///
/// Replaces the packed `(dy+1)*4 + (dx+1)` integers of older navigation
/// code: predecessor links and scan directions are `Dir` (or
/// `Option<Dir>` where "none" is meaningful).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dir {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Dir {
    /// All eight directions, cardinals first.
    pub const ALL: [Dir; 8] = [
        Dir::North,
        Dir::East,
        Dir::South,
        Dir::West,
        Dir::NorthEast,
        Dir::SouthEast,
        Dir::SouthWest,
        Dir::NorthWest,
    ];

    /// Unit step for this direction. Y grows down, so north is (0, -1).
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Dir::North => Point::new(0, -1),
            Dir::NorthEast => Point::new(1, -1),
            Dir::East => Point::new(1, 0),
            Dir::SouthEast => Point::new(1, 1),
            Dir::South => Point::new(0, 1),
            Dir::SouthWest => Point::new(-1, 1),
            Dir::West => Point::new(-1, 0),
            Dir::NorthWest => Point::new(-1, -1),
        }
    }

    /// Direction for a unit step `(dx, dy)` with components in
    /// `{-1, 0, 1}`. Returns `None` for (0, 0).
    #[inline]
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Dir> {
        match (dx, dy) {
            (0, -1) => Some(Dir::North),
            (1, -1) => Some(Dir::NorthEast),
            (1, 0) => Some(Dir::East),
            (1, 1) => Some(Dir::SouthEast),
            (0, 1) => Some(Dir::South),
            (-1, 1) => Some(Dir::SouthWest),
            (-1, 0) => Some(Dir::West),
            (-1, -1) => Some(Dir::NorthWest),
            _ => None,
        }
    }

    /// Direction of travel from `from` toward `to`, clamped to a unit
    /// step. Returns `None` when the points coincide.
    #[inline]
    pub fn between(from: Point, to: Point) -> Option<Dir> {
        Self::from_delta((to.x - from.x).signum(), (to.y - from.y).signum())
    }

    /// Whether this direction has both a horizontal and vertical component.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        let d = self.delta();
        d.x != 0 && d.y != 0
    }

    /// The opposite compass direction.
    #[inline]
    pub const fn opposite(self) -> Dir {
        match self {
            Dir::North => Dir::South,
            Dir::NorthEast => Dir::SouthWest,
            Dir::East => Dir::West,
            Dir::SouthEast => Dir::NorthWest,
            Dir::South => Dir::North,
            Dir::SouthWest => Dir::NorthEast,
            Dir::West => Dir::East,
            Dir::NorthWest => Dir::SouthEast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_round_trip() {
        for d in Dir::ALL {
            let p = d.delta();
            assert_eq!(Dir::from_delta(p.x, p.y), Some(d));
        }
        assert_eq!(Dir::from_delta(0, 0), None);
    }

    #[test]
    fn between_clamps_to_unit_step() {
        let a = Point::new(2, 3);
        assert_eq!(Dir::between(a, Point::new(7, 3)), Some(Dir::East));
        assert_eq!(Dir::between(a, Point::new(0, 9)), Some(Dir::SouthWest));
        assert_eq!(Dir::between(a, a), None);
    }

    #[test]
    fn diagonals_and_opposites() {
        assert!(Dir::NorthEast.is_diagonal());
        assert!(!Dir::South.is_diagonal());
        for d in Dir::ALL {
            assert_eq!(d.opposite().opposite(), d);
            let (a, b) = (d.delta(), d.opposite().delta());
            assert_eq!(a + b, Point::ZERO);
        }
    }
}
