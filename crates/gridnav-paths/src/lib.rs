//! Single-agent shortest paths on 2D occupancy grids.
//!
//! This crate implements a jump-point-search navigation engine with
//! waypoint refinement:
//!
//! - **Jump Point Search** optimised uniform-cost pathfinding
//!   ([`Navigator::navigate`]), with approximate routing toward
//!   unreachable goals
//! - **Waypoint refinement** two-pass path compression
//!   ([`Navigator::navigate_refined`])
//! - **Line tracing** fixed-point grid rasterisation usable as a
//!   standalone visibility test ([`Navigator::trace_line`])
//!
//! All operations go through [`Navigator`], which owns the walkability
//! grid and all internal caches so that repeated queries incur no
//! allocations after warm-up. Searches lazily invalidate per-cell state
//! with an epoch counter instead of clearing it, so query cost is
//! independent of map size for small searches.
//!
//! A `Navigator` is single-threaded state; concurrent searches need one
//! instance each.

mod dir;
mod distance;
mod error;
mod grid;
mod jps;
mod navigator;
mod nodes;
mod refine;
mod trace;

pub use dir::Dir;
pub use distance::{chebyshev, dist2, euclid, manhattan};
pub use error::RouteError;
pub use navigator::Navigator;
pub use refine::RefinedPath;
