//! Compact single-integer cell ids.
//!
//! A [`PackedCell`] encodes a cell coordinate as `y * 2^15 + x`, the
//! historical on-disk/IPC layout for walkable-area cells. The x
//! component is limited to 15 bits, which caps grid width at
//! [`MAX_GRID_WIDTH`]. The navigation engine works in
//! [`Point`]s throughout; packing belongs at serialization boundaries
//! only.

use crate::Point;

/// Maximum grid width representable by a [`PackedCell`] (15 bits of x).
pub const MAX_GRID_WIDTH: i32 = 1 << 15;

const X_BITS: u32 = 15;
const X_MASK: u32 = (1 << X_BITS) - 1;

/// A cell coordinate packed into a single `u32` as `y << 15 | x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PackedCell(pub u32);

impl PackedCell {
    /// Pack a point. `p.x` must be in `[0, MAX_GRID_WIDTH)` and `p.y`
    /// in `[0, 2^17)`, the y range that fits a `u32` alongside 15 bits
    /// of x.
    #[inline]
    pub fn pack(p: Point) -> Self {
        debug_assert!(p.x >= 0 && p.x < MAX_GRID_WIDTH);
        debug_assert!(p.y >= 0 && p.y < 1 << (32 - X_BITS));
        Self(((p.y as u32) << X_BITS) | (p.x as u32 & X_MASK))
    }

    /// Unpack back into a point.
    #[inline]
    pub fn unpack(self) -> Point {
        Point::new((self.0 & X_MASK) as i32, (self.0 >> X_BITS) as i32)
    }
}

impl From<Point> for PackedCell {
    #[inline]
    fn from(p: Point) -> Self {
        Self::pack(p)
    }
}

impl From<PackedCell> for Point {
    #[inline]
    fn from(c: PackedCell) -> Self {
        c.unpack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trip() {
        // (32767, 131071) is the largest packable coordinate.
        for &(x, y) in &[(0, 0), (1, 0), (0, 1), (17, 93), (32767, 0), (32767, 131071)] {
            let p = Point::new(x, y);
            assert_eq!(PackedCell::pack(p).unpack(), p, "({x}, {y})");
        }
    }

    #[test]
    fn packed_layout_matches_y_shift_15() {
        assert_eq!(PackedCell::pack(Point::new(3, 2)).0, (2 << 15) | 3);
        assert_eq!(PackedCell::pack(Point::new(0, 1)).0, 1 << 15);
    }

    #[test]
    fn conversions() {
        let p = Point::new(12, 34);
        let c: PackedCell = p.into();
        let back: Point = c.into();
        assert_eq!(back, p);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn packed_cell_round_trip() {
        let c = PackedCell::pack(Point::new(5, 9));
        let json = serde_json::to_string(&c).unwrap();
        // Transparent: serializes as the bare integer.
        assert_eq!(json, ((9u32 << 15) | 5).to_string());
        let back: PackedCell = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
