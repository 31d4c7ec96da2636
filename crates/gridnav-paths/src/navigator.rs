use std::collections::BinaryHeap;

use gridnav_core::{Point, Range};

use crate::error::RouteError;
use crate::grid::NavGrid;
use crate::nodes::{Entry, NodeCache};

/// Grid navigation engine.
///
/// Owns the walkability grid and every piece of per-search state: the
/// visitation cache, the open heap, the closest-node tracker and the
/// ray scratch buffers. One `Navigator` serves one search at a time;
/// concurrent callers allocate independent instances (none of this
/// state may be shared across simultaneous searches).
///
/// ```
/// use gridnav_core::Point;
/// use gridnav_paths::Navigator;
///
/// let mut nav = Navigator::new(true);
/// nav.resize(4, 4)?;
/// for y in 0..4 {
///     nav.set_row(y, &[1, 1, 1, 1])?;
/// }
/// let path = nav.navigate(Point::new(0, 0), Point::new(3, 3))?;
/// assert_eq!(path.unwrap().len(), 4);
/// # Ok::<(), gridnav_paths::RouteError>(())
/// ```
pub struct Navigator {
    pub(crate) grid: NavGrid,
    pub(crate) cache: NodeCache,
    pub(crate) open: BinaryHeap<Entry>,
    /// Whether a diagonal step may squeeze between two blocking cells.
    /// When `false`, every diagonal transition requires an open corner.
    pub(crate) diags: bool,
    // Closest-to-goal node seen by the search in progress.
    pub(crate) closest_d2: i64,
    pub(crate) closest: Point,
    // Reusable ray buffers.
    pub(crate) ray: Vec<Point>,
    pub(crate) oray: Vec<Point>,
    pub(crate) dirs: Vec<crate::dir::Dir>,
}

impl Navigator {
    /// Create an engine with no grid installed. `diagonals` enables
    /// unconstrained diagonal movement; with it disabled, diagonal
    /// steps are still taken but never through a closed corner.
    pub fn new(diagonals: bool) -> Self {
        Self {
            grid: NavGrid::default(),
            cache: NodeCache::default(),
            open: BinaryHeap::new(),
            diags: diagonals,
            closest_d2: i64::MAX,
            closest: Point::ZERO,
            ray: Vec::new(),
            oray: Vec::new(),
            dirs: Vec::with_capacity(8),
        }
    }

    /// Allocate for a `width` x `height` map and reset all cached
    /// search state. Cells are unwalkable until rows are installed.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), RouteError> {
        self.grid.resize(width, height)?;
        self.cache.resize(self.grid.bounds().len());
        self.open.clear();
        Ok(())
    }

    /// Install walkability data for row `y`: `row[x] != 0` means the
    /// cell is walkable. Walkability must not change while a search is
    /// in progress, but may change freely between queries.
    pub fn set_row(&mut self, y: i32, row: &[u8]) -> Result<(), RouteError> {
        self.grid.set_row(y, row)
    }

    /// The grid rectangle.
    pub fn bounds(&self) -> Range {
        self.grid.bounds()
    }

    /// Whether unconstrained diagonal movement is enabled.
    pub fn diagonals(&self) -> bool {
        self.diags
    }

    /// Change the movement mode. Grid and caches are untouched.
    pub fn set_diagonals(&mut self, diagonals: bool) {
        self.diags = diagonals;
    }

    /// Whether `p` is inside the grid and walkable.
    pub fn passable(&self, p: Point) -> bool {
        self.grid.passable(p)
    }

    /// Record `p` as the closest-to-goal cell seen so far if it beats
    /// the current best by squared Euclidean distance. Called on every
    /// popped node and every cell visited during jump scans.
    #[inline]
    pub(crate) fn update_closest(&mut self, p: Point, goal: Point) {
        let d2 = crate::distance::dist2(p, goal);
        if d2 < self.closest_d2 {
            self.closest_d2 = d2;
            self.closest = p;
        }
    }
}
