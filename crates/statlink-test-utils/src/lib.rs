//! Test utilities and mock slot stores for statlink development.
//!
//! [`MockSlots`] is a hand-built [`SlotRead`] store whose links, occupancy
//! and reported capacity can be set to anything, including states the
//! simulator never produces. The [`fixtures`] module builds simulators in
//! common starting states.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use statlink_core::{Link, Node, Payload, SlotIndex, SlotRead};

/// Mock slot store backed by plain vectors.
///
/// Starts as a freshly initialized arena: head occupied with a NULL link,
/// every other slot free. Use the setters to wire up arbitrary chains.
#[derive(Clone, Debug)]
pub struct MockSlots {
    nodes: Vec<Node>,
    occupied: Vec<bool>,
    reported_capacity: Option<usize>,
}

impl MockSlots {
    pub fn new(slots: usize) -> Self {
        let mut nodes = vec![Node::FREE; slots];
        let mut occupied = vec![false; slots];
        if slots > 0 {
            nodes[0] = Node::HEAD;
            occupied[0] = true;
        }
        Self {
            nodes,
            occupied,
            reported_capacity: None,
        }
    }

    /// Build a store whose chain is `head -> order[0] -> order[1] -> ... -> NULL`,
    /// with `values[i]` stored in `order[i]`.
    ///
    /// Panics if the lengths differ or an index is out of range.
    pub fn chain(slots: usize, order: &[u32], values: &str) -> Self {
        let values: Vec<char> = values.chars().collect();
        assert_eq!(order.len(), values.len(), "one value per chained slot");
        let mut mock = Self::new(slots);
        let mut prev = SlotIndex::HEAD;
        for (&i, &c) in order.iter().zip(&values) {
            let idx = SlotIndex(i);
            mock.set_payload(idx, Some(c));
            mock.set_occupied(idx, true);
            mock.set_link(prev, Link::Slot(idx));
            prev = idx;
        }
        mock.set_link(prev, Link::Null);
        mock
    }

    /// Overwrite the `next` field of slot `idx`.
    pub fn set_link(&mut self, idx: SlotIndex, next: Link) {
        self.nodes[idx.index()].next = next;
    }

    /// Overwrite the payload of slot `idx`. `None` clears it.
    pub fn set_payload(&mut self, idx: SlotIndex, value: Option<char>) {
        self.nodes[idx.index()].data =
            value.map(|c| Payload::new(c).expect("mock payload must not be NUL"));
    }

    /// Overwrite the occupancy flag of slot `idx`.
    pub fn set_occupied(&mut self, idx: SlotIndex, occupied: bool) {
        self.occupied[idx.index()] = occupied;
    }

    /// Make [`SlotRead::capacity`] report `capacity` instead of the real
    /// slot count. Lets tests drive a walk past its nominal bound.
    pub fn report_capacity(&mut self, capacity: usize) {
        self.reported_capacity = Some(capacity);
    }

    /// Real number of backing slots.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }
}

impl SlotRead for MockSlots {
    fn capacity(&self) -> usize {
        self.reported_capacity.unwrap_or(self.nodes.len())
    }

    fn node(&self, idx: SlotIndex) -> Option<&Node> {
        self.nodes.get(idx.index())
    }

    fn is_occupied(&self, idx: SlotIndex) -> bool {
        self.occupied.get(idx.index()).copied().unwrap_or(false)
    }
}
