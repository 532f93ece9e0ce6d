//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use statlink_core::{RejectReason, SlotIndex};

/// Errors that can occur during arena operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// A slot index (or a link target) fell outside `0..capacity`.
    ///
    /// Higher layers only use indices the arena handed out, so this is an
    /// internal consistency failure rather than expected control flow.
    IndexOutOfRange {
        /// The offending index.
        index: SlotIndex,
        /// Number of slots in the arena.
        capacity: usize,
    },
    /// The configured capacity is zero or does not fit a slot index.
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },
}

impl ArenaError {
    /// Flat classification for receipts.
    ///
    /// Only `IndexOutOfRange` reaches operation callers; a bad capacity is
    /// rejected when the simulator is constructed.
    pub fn reason(&self) -> RejectReason {
        RejectReason::IndexOutOfRange
    }
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, capacity } => {
                write!(f, "slot index {index} out of range for capacity {capacity}")
            }
            Self::InvalidCapacity { capacity } => {
                write!(f, "invalid arena capacity {capacity}")
            }
        }
    }
}

impl Error for ArenaError {}
