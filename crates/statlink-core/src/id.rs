//! Slot indices and the links between them.
//!
//! Nodes never hold references to each other. A [`Link`] is either the
//! NULL sentinel or a [`SlotIndex`] into the owning arena; the arena
//! resolves it.

use std::fmt;

/// Position of a node slot within an arena.
///
/// `SlotIndex(0)` is the head sentinel ([`SlotIndex::HEAD`]). All other
/// indices are ordinary slots handed out by the allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(pub u32);

impl SlotIndex {
    /// The permanently reserved head sentinel slot.
    pub const HEAD: SlotIndex = SlotIndex(0);

    /// The index as a `usize`, for indexing storage vectors.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the head sentinel.
    #[inline]
    pub fn is_head(self) -> bool {
        self == Self::HEAD
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SlotIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// The `next` field of a node.
///
/// `Null` ends the chain. It is rendered as `-1`, the sentinel the C-style
/// layout uses, by [`Link::raw`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Link {
    /// End of chain.
    Null,
    /// Points at another slot in the same arena.
    Slot(SlotIndex),
}

impl Link {
    /// Raw integer value of the NULL sentinel.
    pub const NULL_RAW: i64 = -1;

    /// The link as the raw integer a renderer shows: `-1` or the index.
    pub fn raw(self) -> i64 {
        match self {
            Self::Null => Self::NULL_RAW,
            Self::Slot(idx) => i64::from(idx.0),
        }
    }

    /// Decode a raw integer link.
    ///
    /// Returns `None` for negative values other than `-1` and for values
    /// that do not fit a [`SlotIndex`].
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw == Self::NULL_RAW {
            return Some(Self::Null);
        }
        u32::try_from(raw).ok().map(|v| Self::Slot(SlotIndex(v)))
    }

    /// The target slot, or `None` for the NULL sentinel.
    pub fn target(self) -> Option<SlotIndex> {
        match self {
            Self::Null => None,
            Self::Slot(idx) => Some(idx),
        }
    }

    /// Whether this is the NULL sentinel.
    pub fn is_null(self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<SlotIndex> for Link {
    fn from(idx: SlotIndex) -> Self {
        Self::Slot(idx)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}
