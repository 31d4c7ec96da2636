use thiserror::Error;

/// Hard failures of the navigation engine.
///
/// Unreachable goals and unwalkable starts are *not* errors; those are
/// the `None` results of [`Navigator::navigate`](crate::Navigator::navigate).
/// `RouteError` covers programming/configuration mistakes: a grid too
/// large for the cell packing, mismatched row data, or internal
/// invariant violations that older implementations only caught with
/// debug asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Grid width exceeds the 15-bit x range of the cell packing.
    #[error("grid width {width} exceeds the maximum of 32768 (15-bit cell packing)")]
    GridTooWide { width: i32 },

    /// `set_row` called with a row index outside the grid.
    #[error("row {y} out of bounds for grid of height {height}")]
    RowOutOfBounds { y: i32, height: i32 },

    /// `set_row` called with walkability data of the wrong length.
    #[error("row data has {len} cells, grid is {width} wide")]
    RowLength { len: usize, width: i32 },

    /// A tentative path cost left the quantized 16-bit distance range.
    /// The map is too large (or costs miscalibrated) for this engine.
    #[error("tentative path cost exceeds the 16-bit distance range")]
    DistanceOverflow,

    /// A predecessor link walked off the grid during reconstruction.
    #[error("predecessor chain walked off the grid")]
    CorruptPredecessorChain,
}
