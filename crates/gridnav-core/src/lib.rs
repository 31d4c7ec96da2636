//! Geometry primitives shared by the grid navigation crates.
//!
//! - [`Point`]: 2D integer cell coordinate (x right, y down).
//! - [`Range`]: half-open rectangle of cells.
//! - [`PackedCell`]: compact single-integer cell id for callers that
//!   persist or hash cells; the engine itself works in [`Point`]s.

mod geom;
mod packed;

pub use geom::{Point, Range, RangeIter};
pub use packed::{MAX_GRID_WIDTH, PackedCell};
