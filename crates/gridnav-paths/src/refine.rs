//! Waypoint refinement: compress a raw cell path into turning points.
//!
//! Two passes. The forward pass greedily extends straight-line
//! visibility along the raw path and emits a waypoint whenever it
//! breaks, rebuilding a cell-accurate path out of the accepted rays.
//! The backward pass then slides each interior waypoint toward its
//! predecessor as long as both adjoining segments stay clear, deleting
//! waypoints that collapse onto their neighbour.

use gridnav_core::Point;

use crate::error::RouteError;
use crate::navigator::Navigator;

/// A raw path together with its waypoint compression.
///
/// Re-tracing between consecutive waypoints reproduces `cells` exactly;
/// `waypoint_indices[i]` is the offset of `waypoints[i]` within
/// `cells`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefinedPath {
    /// Cell-by-cell path, start to end inclusive.
    pub cells: Vec<Point>,
    /// Turning points, a subsequence of `cells`.
    pub waypoints: Vec<Point>,
    /// Offset of each waypoint within `cells`.
    pub waypoint_indices: Vec<usize>,
}

impl Navigator {
    /// [`navigate`](Navigator::navigate), plus waypoint compression of
    /// the result. `Ok(None)` exactly when `navigate` returns none.
    pub fn navigate_refined(
        &mut self,
        from: Point,
        to: Point,
    ) -> Result<Option<RefinedPath>, RouteError> {
        let Some(raw) = self.navigate(from, to)? else {
            return Ok(None);
        };
        Ok(Some(self.refine(&raw)))
    }

    /// Run both refinement passes over a raw cell path.
    pub(crate) fn refine(&mut self, raw: &[Point]) -> RefinedPath {
        let mut cells = Vec::with_capacity(raw.len());
        let mut waypoints = Vec::new();
        let mut indices = Vec::new();

        cells.push(raw[0]);
        waypoints.push(raw[0]);
        indices.push(0usize);

        if raw.len() > 1 {
            self.compress_forward(raw, &mut cells, &mut waypoints, &mut indices);

            if cfg!(debug_assertions) {
                let mut probe = Vec::new();
                for w in waypoints.windows(2) {
                    debug_assert!(!self.trace_line(w[0], w[1], &mut probe));
                }
            }

            if self.slide_backward(&cells, &mut waypoints, &mut indices) {
                self.rebuild(&mut cells, &waypoints, &mut indices);
            }
        }

        RefinedPath {
            cells,
            waypoints,
            waypoint_indices: indices,
        }
    }

    /// Forward pass: extend line of sight from the current anchor as
    /// far along the raw path as it stays clear; on a break, the last
    /// clear ray becomes a path segment and its endpoint the next
    /// anchor.
    fn compress_forward(
        &mut self,
        raw: &[Point],
        cells: &mut Vec<Point>,
        waypoints: &mut Vec<Point>,
        indices: &mut Vec<usize>,
    ) {
        let mut ray = std::mem::take(&mut self.ray);
        let mut oray = std::mem::take(&mut self.oray);
        oray.clear();

        let mut anchor = raw[0];
        let mut i = 1;
        while i < raw.len() {
            let t = raw[i];
            let last = i == raw.len() - 1;

            if !self.trace_line(anchor, t, &mut ray) {
                debug_assert_eq!(ray.last(), Some(&t));
                std::mem::swap(&mut ray, &mut oray);
                if !last {
                    i += 1;
                    continue;
                }
            }

            // Visibility broke (or the path ended): commit the last
            // clear ray.
            cells.extend(oray.iter().skip(1));
            if !oray.is_empty() {
                debug_assert_eq!(waypoints.last(), oray.first());
                waypoints.push(*oray.last().unwrap());
                indices.push(cells.len() - 1);

                if !last {
                    // Restart the scan of raw[i] from the new anchor.
                    anchor = *oray.last().unwrap();
                    oray.clear();
                    continue;
                }
            }

            if *cells.last().unwrap() != t {
                cells.push(t);
            }
            if *waypoints.last().unwrap() != t {
                waypoints.push(t);
                indices.push(cells.len() - 1);
            }
            anchor = t;
            i += 1;
        }

        self.ray = ray;
        self.oray = oray;
    }

    /// Backward pass: for each interior waypoint, scan the refined path
    /// cells between it and its predecessor; if some earlier cell still
    /// sees both neighbouring waypoints, move the waypoint there (the
    /// earliest such cell wins). Waypoints that land on their
    /// predecessor are removed. Returns whether anything changed.
    fn slide_backward(
        &mut self,
        cells: &[Point],
        waypoints: &mut Vec<Point>,
        indices: &mut Vec<usize>,
    ) -> bool {
        let mut ray = std::mem::take(&mut self.ray);
        let mut adjusted = false;

        let mut i = waypoints.len() as i64 - 2;
        while i > 0 {
            let ui = i as usize;
            let prev = waypoints[ui - 1];
            let next = waypoints[ui + 1];
            let pidx = indices[ui - 1];

            let mut j = indices[ui];
            while j > pidx {
                j -= 1;
                let cand = cells[j];
                if self.trace_line(prev, cand, &mut ray) {
                    continue;
                }
                if self.trace_line(cand, next, &mut ray) {
                    continue;
                }
                waypoints[ui] = cand;
                indices[ui] = j;
                adjusted = true;
            }

            if waypoints[ui] == waypoints[ui - 1] {
                waypoints.remove(ui);
                indices.remove(ui);
                adjusted = true;
            }
            i -= 1;
        }

        self.ray = ray;
        adjusted
    }

    /// Re-trace between consecutive waypoints to rebuild the cell path
    /// (and the waypoint offsets within it) after sliding.
    fn rebuild(&mut self, cells: &mut Vec<Point>, waypoints: &[Point], indices: &mut Vec<usize>) {
        let mut ray = std::mem::take(&mut self.ray);

        cells.clear();
        cells.push(waypoints[0]);
        indices.clear();
        indices.push(0);

        for w in waypoints.windows(2) {
            let blocked = self.trace_line(w[0], w[1], &mut ray);
            debug_assert!(!blocked);
            cells.extend(ray.iter().skip(1));
            indices.push(cells.len() - 1);
        }

        self.ray = ray;
    }
}
