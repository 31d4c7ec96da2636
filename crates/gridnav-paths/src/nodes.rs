use gridnav_core::Point;

use crate::dir::Dir;

/// Per-cell search state, stamped with the epoch of the search that
/// last touched it.
#[derive(Clone, Copy)]
pub(crate) struct NodeInfo {
    /// Quantized best-known cost from the search origin. Only
    /// meaningful when `epoch` matches the cache's current epoch.
    pub(crate) dist: u16,
    /// Which search last wrote this cell.
    pub(crate) epoch: u16,
    /// Direction from this cell toward its predecessor jump point.
    pub(crate) prev: Option<Dir>,
    /// Whether the cell still has a live entry on the open heap.
    pub(crate) open: bool,
}

impl Default for NodeInfo {
    fn default() -> Self {
        Self {
            dist: 0,
            epoch: 0,
            prev: None,
            open: false,
        }
    }
}

/// Epoch-stamped visitation cache.
///
/// Starting a search bumps the epoch instead of clearing the node
/// array, so stale entries from previous searches are ignored in O(1).
/// The single O(cells) reset happens when the epoch counter would wrap.
#[derive(Default)]
pub(crate) struct NodeCache {
    nodes: Vec<NodeInfo>,
    epoch: u16,
}

impl NodeCache {
    /// Reallocate for `len` cells and forget all previous searches.
    pub(crate) fn resize(&mut self, len: usize) {
        self.nodes.clear();
        self.nodes.resize(len, NodeInfo::default());
        self.epoch = 0;
    }

    /// Begin a new search. On wraparound every node is reset to epoch 0
    /// and the counter restarts at 1, so stale stamps can never collide
    /// with a live epoch.
    pub(crate) fn new_epoch(&mut self) {
        if self.epoch == u16::MAX {
            self.nodes.fill(NodeInfo::default());
            self.epoch = 1;
        } else {
            self.epoch += 1;
        }
    }

    /// The epoch of the search in progress.
    #[inline]
    pub(crate) fn epoch(&self) -> u16 {
        self.epoch
    }

    #[inline]
    pub(crate) fn node(&self, idx: usize) -> &NodeInfo {
        &self.nodes[idx]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut NodeInfo {
        &mut self.nodes[idx]
    }

    /// Whether `idx` carries state written by the current search.
    #[inline]
    pub(crate) fn is_current(&self, idx: usize) -> bool {
        self.nodes[idx].epoch == self.epoch
    }
}

/// Open-heap entry, ordered by priority (g-cost + heuristic).
#[derive(Clone, Copy)]
pub(crate) struct Entry {
    pub(crate) cost: f64,
    pub(crate) cell: Point,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest cost first;
        // ties broken by cell so the ordering is total.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
