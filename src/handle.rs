/// Read-only position of a node inside an [`OrderedList`](crate::OrderedList).
///
/// A handle never owns the node. It carries the generation of the slot it was
/// issued for: once that node is deleted, lookups through the handle return
/// `None`, even after a later insertion reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

impl Handle {
    /// Returns the raw slot index for debugging or external maps.
    pub fn as_raw(&self) -> usize {
        self.slot
    }
}
