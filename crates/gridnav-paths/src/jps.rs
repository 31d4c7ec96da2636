//! Jump Point Search (JPS) over the walkability grid.
//!
//! JPS is an optimised A* for uniform-cost grids: instead of enqueuing
//! every neighbour it scans straight lines and only enqueues *jump
//! points*: cells with forced neighbours, where a shortest path may
//! have to branch. Cells between jump points are reconstructed by
//! straight-line expansion afterwards.
//!
//! Reference: Harabor & Grastien, "Online Graph Pruning for Pathfinding
//! on Grid Maps", AAAI 2011.

use gridnav_core::Point;

use crate::dir::Dir;
use crate::distance::{dist2, euclid};
use crate::error::RouteError;
use crate::navigator::Navigator;
use crate::nodes::Entry;

/// Largest path cost representable in the quantized node distance.
const MAX_DIST: f64 = u16::MAX as f64;

/// Outcome of one frontier search attempt.
enum Search {
    /// Full path from start to the attempt's target.
    Path(Vec<Point>),
    /// Target never finalised; `closest` is the best cell seen, by
    /// squared Euclidean distance to the target.
    Blocked { closest: Point },
}

impl Navigator {
    /// Compute a cell path `from` -> `to`.
    ///
    /// Returns `Ok(None)` when the start is not walkable or nothing
    /// useful can be produced. When the goal itself is unreachable, one
    /// re-route toward the closest reachable cell is attempted and the
    /// result is trimmed at the cell nearest the original goal, so a
    /// `Some` path may legitimately end short of `to`.
    ///
    /// Errors are reserved for invariant violations: path costs beyond
    /// the quantized 16-bit range, or a corrupt predecessor chain.
    pub fn navigate(&mut self, from: Point, to: Point) -> Result<Option<Vec<Point>>, RouteError> {
        if !self.grid.passable(from) {
            return Ok(None);
        }

        // At most one re-route: aim at the closest reachable point,
        // then search again. An explicit loop, not recursion.
        let mut target = to;
        for attempt in 0..2 {
            match self.search(from, target)? {
                Search::Path(mut path) => {
                    if attempt == 1 {
                        trim_to_nearest(&mut path, to);
                    }
                    return Ok(Some(path));
                }
                Search::Blocked { closest } => {
                    if attempt == 1 || closest == from || closest == target {
                        return Ok(None);
                    }
                    // Aim at the last clear cell on the ray from the
                    // closest node toward the real goal.
                    let mut ray = std::mem::take(&mut self.ray);
                    self.trace_line(closest, to, &mut ray);
                    let next = ray.last().copied();
                    self.ray = ray;
                    let Some(next) = next else {
                        return Ok(None);
                    };
                    log::debug!("goal {to} unreachable, rerouting via {next}");
                    target = next;
                }
            }
        }
        Ok(None)
    }

    /// One full search attempt: direct trace, then the JPS frontier.
    fn search(&mut self, from: Point, to: Point) -> Result<Search, RouteError> {
        self.cache.new_epoch();

        // Try the straight ray first; on open terrain this answers the
        // query without touching the frontier at all.
        let mut ray = std::mem::take(&mut self.ray);
        if !self.trace_line(from, to, &mut ray) {
            self.ray = Vec::new();
            return Ok(Search::Path(ray));
        }
        self.ray = ray;

        let epoch = self.cache.epoch();
        let start = self.grid.idx(from);
        {
            let n = self.cache.node_mut(start);
            n.dist = 0;
            n.prev = None;
            n.epoch = epoch;
            n.open = true;
        }

        self.closest_d2 = i64::MAX;
        self.closest = from;
        self.open.clear();
        self.open.push(Entry {
            cost: 0.0,
            cell: from,
        });

        while let Some(entry) = self.open.pop() {
            let p = entry.cell;
            let pi = self.grid.idx(p);
            {
                let n = self.cache.node(pi);
                if n.epoch != epoch || !n.open {
                    continue;
                }
            }

            self.update_closest(p, to);
            if p == to {
                return Ok(Search::Path(self.reconstruct(to)?));
            }
            self.cache.node_mut(pi).open = false;
            let g = self.cache.node(pi).dist as f64;

            // Candidate directions: everything on the first expansion
            // from the start, the pruned set afterwards.
            let mut dirs = std::mem::take(&mut self.dirs);
            dirs.clear();
            match self.cache.node(pi).prev {
                None => self.all_dirs(p, &mut dirs),
                Some(back) => self.pruned_dirs(p, back.opposite(), &mut dirs),
            }
            // Goal-directed bias: explore the most promising direction
            // first. Stable sort keeps ties deterministic.
            dirs.sort_by(|a, b| {
                let da = euclid(p + a.delta(), to);
                let db = euclid(p + b.delta(), to);
                da.total_cmp(&db)
            });

            for i in 0..dirs.len() {
                let d = dirs[i];
                let Some(jump) = self.find_jump(p, d, to) else {
                    continue;
                };
                self.relax(p, g, jump, to)?;
            }
            self.dirs = dirs;
        }

        Ok(Search::Blocked {
            closest: self.closest,
        })
    }

    /// All passable directions out of `p` (with the corner rule applied
    /// when diagonal squeezing is disabled).
    fn all_dirs(&self, p: Point, out: &mut Vec<Dir>) {
        for d in Dir::ALL {
            let q = p + d.delta();
            if !self.grid.passable(q) {
                continue;
            }
            if !self.diags && !self.grid.reachable(p, q) {
                continue;
            }
            out.push(d);
        }
    }

    /// Push `d` if the neighbouring cell in that direction is passable.
    fn add_pruned(&self, p: Point, dx: i32, dy: i32, out: &mut Vec<Dir>) {
        if !self.grid.passable(p.shift(dx, dy)) {
            return;
        }
        if let Some(d) = Dir::from_delta(dx, dy) {
            out.push(d);
        }
    }

    /// The JPS neighbour pruning rule: given the incoming travel
    /// direction, keep only natural neighbours plus forced neighbours
    /// exposed by adjacent obstacles.
    fn pruned_dirs(&self, p: Point, travel: Dir, out: &mut Vec<Dir>) {
        let d = travel.delta();
        let nodiag = !self.diags;

        if d.y == 0 {
            // Horizontal travel.
            self.add_pruned(p, d.x, 0, out);
            if !nodiag || self.grid.passable(p.shift(d.x, 0)) {
                if !self.grid.passable(p.shift(0, 1)) {
                    self.add_pruned(p, d.x, 1, out);
                }
                if !self.grid.passable(p.shift(0, -1)) {
                    self.add_pruned(p, d.x, -1, out);
                }
            }
        } else if d.x == 0 {
            // Vertical travel, transposed.
            self.add_pruned(p, 0, d.y, out);
            if !nodiag || self.grid.passable(p.shift(0, d.y)) {
                if !self.grid.passable(p.shift(1, 0)) {
                    self.add_pruned(p, 1, d.y, out);
                }
                if !self.grid.passable(p.shift(-1, 0)) {
                    self.add_pruned(p, -1, d.y, out);
                }
            }
        } else {
            // Diagonal travel: both components plus the diagonal.
            self.add_pruned(p, 0, d.y, out);
            self.add_pruned(p, d.x, 0, out);
            if !nodiag || self.grid.reachable(p, p + d) {
                self.add_pruned(p, d.x, d.y, out);
            }
            // Forced corners behind the travel direction.
            if !self.grid.passable(p.shift(-d.x, 0))
                && (nodiag || self.grid.reachable(p, p.shift(-d.x, d.y)))
            {
                self.add_pruned(p, -d.x, d.y, out);
            }
            if !self.grid.passable(p.shift(0, -d.y))
                && (nodiag || self.grid.reachable(p, p.shift(d.x, -d.y)))
            {
                self.add_pruned(p, d.x, -d.y, out);
            }
        }
    }

    /// Whether `p`, entered along `d`, has a forced neighbour: an
    /// adjacent obstacle whose diagonal counterpart ahead is open,
    /// meaning a shortest path may need to branch here.
    fn forced_neighbor(&self, p: Point, d: Point) -> bool {
        if d.y == 0 {
            (!self.grid.passable(p.shift(0, -1)) && self.grid.passable(p.shift(d.x, -1)))
                || (!self.grid.passable(p.shift(0, 1)) && self.grid.passable(p.shift(d.x, 1)))
        } else if d.x == 0 {
            (!self.grid.passable(p.shift(-1, 0)) && self.grid.passable(p.shift(-1, d.y)))
                || (!self.grid.passable(p.shift(1, 0)) && self.grid.passable(p.shift(1, d.y)))
        } else {
            (!self.grid.passable(p.shift(-d.x, 0)) && self.grid.passable(p.shift(-d.x, d.y)))
                || (!self.grid.passable(p.shift(0, -d.y)) && self.grid.passable(p.shift(d.x, -d.y)))
        }
    }

    /// Scan from `p` along `d` until a jump point, the goal, or a dead
    /// end. Every visited cell feeds the closest-to-goal tracker.
    fn find_jump(&mut self, p: Point, d: Dir, goal: Point) -> Option<Point> {
        let dd = d.delta();
        if !d.is_diagonal() {
            return self.find_ortho_jump(p, dd, goal);
        }

        let mut cur = p;
        loop {
            if !self.diags && !self.grid.reachable(cur, cur + dd) {
                return None;
            }
            let q = cur + dd;
            if !self.grid.passable(q) {
                return None;
            }
            self.update_closest(q, goal);
            if q == goal || self.forced_neighbor(q, dd) {
                return Some(q);
            }
            // A successful orthogonal jump off the diagonal makes the
            // current cell a jump point itself.
            if self.find_ortho_jump(q, Point::new(dd.x, 0), goal).is_some()
                || self.find_ortho_jump(q, Point::new(0, dd.y), goal).is_some()
            {
                return Some(q);
            }
            if !self.diags {
                // Corner-constrained diagonal scans go a single step;
                // the stepped cell must be enqueued so exploration can
                // continue from it.
                return Some(q);
            }
            cur = q;
        }
    }

    /// Straight-line scan along an orthogonal direction.
    fn find_ortho_jump(&mut self, p: Point, d: Point, goal: Point) -> Option<Point> {
        let mut cur = p;
        loop {
            cur = cur + d;
            if !self.grid.passable(cur) {
                return None;
            }
            self.update_closest(cur, goal);
            if cur == goal || self.forced_neighbor(cur, d) {
                return Some(cur);
            }
        }
    }

    /// Relax the jump point `j` discovered from `p` with g-cost `g`.
    fn relax(&mut self, p: Point, g: f64, j: Point, goal: Point) -> Result<(), RouteError> {
        let epoch = self.cache.epoch();
        let ji = self.grid.idx(j);

        let cost = g + euclid(p, j);
        let best = if self.cache.node(ji).epoch == epoch {
            self.cache.node(ji).dist as f64
        } else {
            f64::INFINITY
        };
        if cost >= best {
            return Ok(());
        }
        // Distances are quantized to u16 to keep the node array small;
        // a cost past that range means the map outgrew the engine.
        if cost > MAX_DIST {
            return Err(RouteError::DistanceOverflow);
        }

        let n = self.cache.node_mut(ji);
        n.dist = (cost + 0.5) as u16;
        n.epoch = epoch;
        n.prev = Dir::between(j, p);
        n.open = true;
        self.open.push(Entry {
            cost: cost + euclid(j, goal),
            cell: j,
        });
        Ok(())
    }

    /// Walk predecessor links backward from `to`, expanding each jump
    /// into its intermediate cells, and return the path start-first.
    ///
    /// Links store only a direction; the predecessor is the first cell
    /// along it stamped by the current search (memory traded for an
    /// O(jump-length) scan).
    fn reconstruct(&self, to: Point) -> Result<Vec<Point>, RouteError> {
        let mut path = vec![to];
        let mut t = to;

        while let Some(back) = self.cache.node(self.grid.idx(t)).prev {
            let d = back.delta();
            let mut prev = t;
            loop {
                prev = prev + d;
                if !self.grid.bounds().contains(prev) {
                    return Err(RouteError::CorruptPredecessorChain);
                }
                if self.cache.is_current(self.grid.idx(prev)) {
                    break;
                }
            }

            let step = Point::new((prev.x - t.x).signum(), (prev.y - t.y).signum());
            while t != prev {
                t = t + step;
                path.push(t);
            }
        }

        path.reverse();
        Ok(path)
    }
}

/// Truncate `path` just after the cell nearest `goal` (first minimum
/// wins), for approximate results aimed at an unreachable goal.
fn trim_to_nearest(path: &mut Vec<Point>, goal: Point) {
    let mut best = i64::MAX;
    let mut keep = path.len();
    for (i, &c) in path.iter().enumerate() {
        let d2 = dist2(c, goal);
        if d2 < best {
            best = d2;
            keep = i + 1;
        }
    }
    path.truncate(keep);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chebyshev;

    fn nav(diags: bool, rows: &[&str]) -> Navigator {
        let mut n = Navigator::new(diags);
        let h = rows.len() as i32;
        let w = rows.first().map_or(0, |r| r.len()) as i32;
        n.resize(w, h).unwrap();
        for (y, r) in rows.iter().enumerate() {
            let bytes: Vec<u8> = r.bytes().map(|b| u8::from(b != b'#')).collect();
            n.set_row(y as i32, &bytes).unwrap();
        }
        n
    }

    /// Every cell walkable, consecutive cells grid-adjacent.
    fn assert_valid(n: &Navigator, path: &[Point]) {
        for &c in path {
            assert!(n.passable(c), "unwalkable cell {c} in path");
        }
        for w in path.windows(2) {
            assert_eq!(chebyshev(w[0], w[1]), 1, "gap between {} and {}", w[0], w[1]);
        }
    }

    const OPEN5: [&str; 5] = [".....", ".....", ".....", ".....", "....."];

    #[test]
    fn open_grid_returns_the_straight_line() {
        let mut n = nav(true, &OPEN5);
        let path = n
            .navigate(Point::new(0, 0), Point::new(4, 4))
            .unwrap()
            .unwrap();
        // Matches the tracer's output exactly.
        let mut ray = Vec::new();
        assert!(!n.trace_line(Point::new(0, 0), Point::new(4, 4), &mut ray));
        assert_eq!(path, ray);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn open_grid_goes_diagonal_in_both_modes() {
        // The corner rule only bites next to obstacles; on open terrain
        // both modes produce the same 5-cell diagonal.
        for diags in [true, false] {
            let mut n = nav(diags, &OPEN5);
            let path = n
                .navigate(Point::new(0, 0), Point::new(4, 4))
                .unwrap()
                .unwrap();
            assert_eq!(path.len(), 5, "diags = {diags}");
        }
    }

    #[test]
    fn start_and_goal_equal() {
        let mut n = nav(true, &OPEN5);
        let path = n
            .navigate(Point::new(2, 2), Point::new(2, 2))
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![Point::new(2, 2)]);
    }

    #[test]
    fn unwalkable_start_is_rejected() {
        let mut n = nav(true, &["#..", "...", "..."]);
        assert_eq!(n.navigate(Point::new(0, 0), Point::new(2, 2)).unwrap(), None);
        // Out-of-bounds start likewise.
        assert_eq!(n.navigate(Point::new(-1, 0), Point::new(2, 2)).unwrap(), None);
    }

    #[test]
    fn detours_through_the_wall_gap() {
        // Wall at column 2 except a gap at row 4.
        let mut n = nav(
            true,
            &["..#..", "..#..", "..#..", "..#..", "....."],
        );
        let from = Point::new(0, 0);
        let to = Point::new(4, 0);
        let path = n.navigate(from, to).unwrap().unwrap();
        assert_eq!(path.first(), Some(&from));
        assert_eq!(path.last(), Some(&to));
        assert!(path.contains(&Point::new(2, 4)), "path must use the gap");
        assert_valid(&n, &path);
    }

    #[test]
    fn wall_gap_without_free_diagonals() {
        let mut n = nav(
            false,
            &["..#..", "..#..", "..#..", "..#..", "....."],
        );
        let path = n
            .navigate(Point::new(0, 0), Point::new(4, 0))
            .unwrap()
            .unwrap();
        assert!(path.contains(&Point::new(2, 4)));
        assert_valid(&n, &path);
        // No step may squeeze through a closed corner.
        for w in path.windows(2) {
            assert!(n.grid.reachable(w[0], w[1]));
        }
    }

    #[test]
    fn enclosed_start_has_no_path() {
        let mut n = nav(true, &[".#.", "##.", "..."]);
        assert_eq!(n.navigate(Point::new(0, 0), Point::new(2, 2)).unwrap(), None);
    }

    #[test]
    fn blocked_goal_yields_approximate_path() {
        let mut n = nav(
            true,
            &[".....", ".....", ".....", ".....", "....#"],
        );
        let from = Point::new(0, 0);
        let goal = Point::new(4, 4);
        let path = n.navigate(from, goal).unwrap().unwrap();
        let end = *path.last().unwrap();
        assert_ne!(end, goal);
        // Ends adjacent to the goal, and strictly closer than the start.
        assert!(dist2(end, goal) <= 2);
        assert!(dist2(end, goal) < dist2(from, goal));
        assert_valid(&n, &path);
    }

    #[test]
    fn walled_off_goal_yields_partial_path() {
        // Goal chamber fully sealed; the path should still press
        // toward the wall rather than fail outright.
        let mut n = nav(
            true,
            &["......", "......", "....##", "....#.", "....##"],
        );
        let from = Point::new(0, 0);
        let goal = Point::new(5, 3);
        let path = n.navigate(from, goal).unwrap().unwrap();
        let end = *path.last().unwrap();
        assert!(dist2(end, goal) < dist2(from, goal));
        assert_valid(&n, &path);
    }

    #[test]
    fn searches_are_deterministic() {
        let mut n = nav(
            true,
            &["........", ".##.....", ".#..##..", ".#.##...", "........"],
        );
        let a = n.navigate(Point::new(0, 0), Point::new(7, 3)).unwrap();
        let b = n.navigate(Point::new(0, 0), Point::new(7, 3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_queries_reuse_the_cache() {
        let mut n = nav(
            true,
            &["..#..", "..#..", "..#..", "..#..", "....."],
        );
        for _ in 0..100 {
            let path = n
                .navigate(Point::new(0, 0), Point::new(4, 0))
                .unwrap()
                .unwrap();
            assert_eq!(path.last(), Some(&Point::new(4, 0)));
        }
    }

    #[test]
    fn serpentine_cost_overflows_distance_range() {
        // Max-width grid with a three-leg serpentine: true path cost is
        // about 3 * 32767, far past the quantized 16-bit range.
        let w: i32 = 32768;
        let mut n = Navigator::new(true);
        n.resize(w, 5).unwrap();
        let open = vec![1u8; w as usize];
        let mut gap_right = vec![0u8; w as usize];
        gap_right[w as usize - 1] = 1;
        let mut gap_left = vec![0u8; w as usize];
        gap_left[0] = 1;
        n.set_row(0, &open).unwrap();
        n.set_row(1, &gap_right).unwrap();
        n.set_row(2, &open).unwrap();
        n.set_row(3, &gap_left).unwrap();
        n.set_row(4, &open).unwrap();

        assert_eq!(
            n.navigate(Point::new(0, 0), Point::new(w - 1, 4)),
            Err(RouteError::DistanceOverflow)
        );
    }

    #[test]
    fn trim_keeps_prefix_up_to_nearest_cell() {
        let mut path: Vec<Point> = (0..6).map(|x| Point::new(x, 0)).collect();
        // Nearest to (3, 2) is (3, 0); the tail is discarded.
        trim_to_nearest(&mut path, Point::new(3, 2));
        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&Point::new(3, 0)));
    }
}
