//! Fixed-capacity node storage with a parallel occupancy table.
//!
//! [`SlotArena`] owns every node the list will ever use. Slot 0 is the
//! head sentinel; the remaining slots start free and are handed out by
//! the [allocator](crate::allocator). Nothing is ever removed from the
//! backing vectors: freeing a slot only flips its occupancy flag and
//! resets the node to [`Node::FREE`].

use statlink_core::{Link, Node, Payload, SlotIndex, SlotRead};

use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// Node slots plus the occupancy table that acts as the free list.
///
/// Every accessor is bounds-checked and returns
/// [`ArenaError::IndexOutOfRange`] for indices outside `0..capacity`.
/// [`set_next`](SlotArena::set_next) additionally rejects links whose
/// target is out of range, so a stored `next` is always `Null` or a valid
/// index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotArena {
    nodes: Vec<Node>,
    occupied: Vec<bool>,
}

impl SlotArena {
    /// Create an initialized arena for `config`.
    ///
    /// Slot 0 is the occupied head `{empty, Null}`; every other slot is
    /// free `{empty, 0}`.
    pub fn new(config: &ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let mut arena = Self {
            nodes: vec![Node::FREE; config.capacity],
            occupied: vec![false; config.capacity],
        };
        arena.reset();
        Ok(arena)
    }

    /// Shorthand for `SlotArena::new(&ArenaConfig::new(capacity))`.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Self::new(&ArenaConfig::new(capacity))
    }

    /// Return every slot to its post-initialization state.
    pub fn reset(&mut self) {
        self.nodes.fill(Node::FREE);
        self.occupied.fill(false);
        self.nodes[0] = Node::HEAD;
        self.occupied[0] = true;
    }

    /// Number of slots, head included.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    fn check(&self, idx: SlotIndex) -> Result<usize, ArenaError> {
        let i = idx.index();
        if i < self.nodes.len() {
            Ok(i)
        } else {
            Err(ArenaError::IndexOutOfRange {
                index: idx,
                capacity: self.nodes.len(),
            })
        }
    }

    /// The node at `idx`.
    pub fn get(&self, idx: SlotIndex) -> Result<&Node, ArenaError> {
        let i = self.check(idx)?;
        Ok(&self.nodes[i])
    }

    /// Payload of slot `idx`.
    pub fn data(&self, idx: SlotIndex) -> Result<Option<Payload>, ArenaError> {
        self.get(idx).map(|n| n.data)
    }

    /// Link stored in slot `idx`.
    pub fn next(&self, idx: SlotIndex) -> Result<Link, ArenaError> {
        self.get(idx).map(|n| n.next)
    }

    /// Overwrite the payload of slot `idx`.
    pub fn set_data(&mut self, idx: SlotIndex, data: Option<Payload>) -> Result<(), ArenaError> {
        let i = self.check(idx)?;
        self.nodes[i].data = data;
        Ok(())
    }

    /// Overwrite the link of slot `idx`.
    ///
    /// Fails if either `idx` or the link target is out of range.
    pub fn set_next(&mut self, idx: SlotIndex, next: Link) -> Result<(), ArenaError> {
        let i = self.check(idx)?;
        if let Some(target) = next.target() {
            self.check(target)?;
        }
        self.nodes[i].next = next;
        Ok(())
    }

    /// Whether slot `idx` is allocated.
    pub fn occupied(&self, idx: SlotIndex) -> Result<bool, ArenaError> {
        let i = self.check(idx)?;
        Ok(self.occupied[i])
    }

    /// Set the occupancy flag of slot `idx`.
    pub fn set_occupied(&mut self, idx: SlotIndex, occupied: bool) -> Result<(), ArenaError> {
        let i = self.check(idx)?;
        self.occupied[i] = occupied;
        Ok(())
    }

    /// Mark `idx` occupied and store `value` in it. The link is untouched.
    pub fn occupy(&mut self, idx: SlotIndex, value: Payload) -> Result<(), ArenaError> {
        let i = self.check(idx)?;
        self.occupied[i] = true;
        self.nodes[i].data = Some(value);
        Ok(())
    }

    /// Mark `idx` free and reset it to [`Node::FREE`].
    pub fn release(&mut self, idx: SlotIndex) -> Result<(), ArenaError> {
        let i = self.check(idx)?;
        self.occupied[i] = false;
        self.nodes[i] = Node::FREE;
        Ok(())
    }

    /// All nodes in index order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The occupancy table in index order.
    pub fn occupancy(&self) -> &[bool] {
        &self.occupied
    }

    /// Number of occupied slots, head included.
    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }
}

impl SlotRead for SlotArena {
    fn capacity(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, idx: SlotIndex) -> Option<&Node> {
        self.nodes.get(idx.index())
    }

    fn is_occupied(&self, idx: SlotIndex) -> bool {
        self.occupied.get(idx.index()).copied().unwrap_or(false)
    }
}
