//! The per-slot node record.

use crate::id::{Link, SlotIndex};
use crate::payload::Payload;

/// One arena slot: an optional payload and a link to the next slot.
///
/// `data == None` is the empty sentinel carried by the head and by free
/// slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    /// Element value, or `None` for the empty sentinel.
    pub data: Option<Payload>,
    /// Next slot in the chain, or [`Link::Null`].
    pub next: Link,
}

impl Node {
    /// The head sentinel as created by initialization: empty, chain ends.
    pub const HEAD: Node = Node {
        data: None,
        next: Link::Null,
    };

    /// A free slot: empty payload, `next` parked on slot 0.
    ///
    /// Slot 0 here is a placeholder, not a live link; a free slot is
    /// unreachable from the head.
    pub const FREE: Node = Node {
        data: None,
        next: Link::Slot(SlotIndex::HEAD),
    };

    /// An occupied slot holding `value`.
    pub fn occupied(value: Payload, next: Link) -> Self {
        Self {
            data: Some(value),
            next,
        }
    }

    /// Whether this node carries the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}
