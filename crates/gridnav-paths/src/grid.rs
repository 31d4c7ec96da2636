use gridnav_core::{MAX_GRID_WIDTH, Point, Range};

use crate::error::RouteError;

/// Owned walkability grid: one byte per cell, nonzero means walkable.
///
/// Rows are copied in via [`NavGrid::set_row`]. The historical engine
/// kept raw pointers into caller memory; owning the bytes keeps the
/// public API free of lifetimes at the cost of one copy per row
/// install.
#[derive(Clone, Debug, Default)]
pub(crate) struct NavGrid {
    bounds: Range,
    rows: Vec<Vec<u8>>,
}

impl NavGrid {
    /// Reallocate for a `width` x `height` map. All cells start
    /// unwalkable until rows are installed.
    pub(crate) fn resize(&mut self, width: i32, height: i32) -> Result<(), RouteError> {
        if width > MAX_GRID_WIDTH {
            return Err(RouteError::GridTooWide { width });
        }
        let w = width.max(0);
        let h = height.max(0);
        self.bounds = Range::new(0, 0, w, h);
        self.rows.clear();
        self.rows.resize_with(h as usize, || vec![0; w as usize]);
        Ok(())
    }

    /// Install walkability bytes for row `y`. The slice length must
    /// equal the grid width.
    pub(crate) fn set_row(&mut self, y: i32, row: &[u8]) -> Result<(), RouteError> {
        if y < 0 || y >= self.bounds.height() {
            return Err(RouteError::RowOutOfBounds {
                y,
                height: self.bounds.height(),
            });
        }
        if row.len() != self.bounds.width() as usize {
            return Err(RouteError::RowLength {
                len: row.len(),
                width: self.bounds.width(),
            });
        }
        self.rows[y as usize].copy_from_slice(row);
        Ok(())
    }

    /// The grid rectangle, anchored at the origin.
    #[inline]
    pub(crate) fn bounds(&self) -> Range {
        self.bounds
    }

    /// Flat row-major index of an in-bounds point.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> usize {
        debug_assert!(self.bounds.contains(p));
        p.y as usize * self.bounds.width() as usize + p.x as usize
    }

    /// Raw walkability lookup. Callers must have bounds-checked `p`.
    #[inline]
    pub(crate) fn walkable(&self, p: Point) -> bool {
        self.rows[p.y as usize][p.x as usize] != 0
    }

    /// Bounds check plus walkability: the passability test used
    /// throughout the search. Out-of-grid cells are never passable.
    #[inline]
    pub(crate) fn passable(&self, p: Point) -> bool {
        self.bounds.contains(p) && self.walkable(p)
    }

    /// Corner-cutting rule for a single step `from` -> `to`: the target
    /// must be passable, and for a diagonal step at least one of the
    /// two orthogonal companions must be passable as well, so the step
    /// cannot squeeze between two blocking cells.
    #[inline]
    pub(crate) fn reachable(&self, from: Point, to: Point) -> bool {
        self.passable(to)
            && (self.passable(Point::new(to.x, from.y)) || self.passable(Point::new(from.x, to.y)))
    }
}
