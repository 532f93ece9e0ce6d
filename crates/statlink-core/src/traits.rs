//! Read access to slot storage.

use crate::id::SlotIndex;
use crate::node::Node;

/// Read-only view of a slot store.
///
/// Traversal, hashing and snapshotting are written against this trait
/// rather than a concrete arena so they can run over hand-built (and
/// deliberately corrupted) stores in tests.
pub trait SlotRead {
    /// Number of slots, head included.
    fn capacity(&self) -> usize;

    /// The node at `idx`, or `None` if `idx` is outside the store.
    fn node(&self, idx: SlotIndex) -> Option<&Node>;

    /// Whether slot `idx` is allocated. `false` outside the store.
    fn is_occupied(&self, idx: SlotIndex) -> bool;
}
