//! Operation error types for the list engine.
//!
//! One enum per operation family. Every variant maps onto a
//! [`RejectReason`] through `reason()`, which is what receipts carry.

use std::error::Error;
use std::fmt;

use statlink_arena::ArenaError;
use statlink_core::{ArgumentError, Payload, RejectReason};

use crate::invariants::InvariantViolation;

// ── InsertError ────────────────────────────────────────────────────

/// Errors from [`StaticListSimulator::insert`](crate::StaticListSimulator::insert).
///
/// Every failure leaves the arena untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertError {
    /// The simulator has not been initialized.
    NotInitialized,
    /// Malformed payload or negative position.
    InvalidArgument(ArgumentError),
    /// The position is past the end of the chain.
    PositionOutOfRange {
        /// Requested logical offset.
        position: usize,
        /// Current chain length.
        length: usize,
    },
    /// Every non-head slot is occupied.
    ArenaFull {
        /// Arena capacity, head included.
        capacity: usize,
    },
    /// Internal consistency failure in the arena.
    Arena(ArenaError),
}

impl InsertError {
    /// Flat classification for receipts.
    pub fn reason(&self) -> RejectReason {
        match self {
            Self::NotInitialized => RejectReason::NotInitialized,
            Self::InvalidArgument(_) => RejectReason::InvalidArgument,
            Self::PositionOutOfRange { .. } => RejectReason::PositionOutOfRange,
            Self::ArenaFull { .. } => RejectReason::ArenaFull,
            Self::Arena(e) => e.reason(),
        }
    }
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "list not initialized"),
            Self::InvalidArgument(e) => write!(f, "invalid argument: {e}"),
            Self::PositionOutOfRange { position, length } => {
                write!(f, "position {position} is beyond chain length {length}")
            }
            Self::ArenaFull { capacity } => {
                write!(f, "no free slot in arena of capacity {capacity}")
            }
            Self::Arena(e) => write!(f, "arena: {e}"),
        }
    }
}

impl Error for InsertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(e) => Some(e),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArgumentError> for InsertError {
    fn from(e: ArgumentError) -> Self {
        Self::InvalidArgument(e)
    }
}

impl From<ArenaError> for InsertError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

// ── DeleteError ────────────────────────────────────────────────────

/// Errors from [`StaticListSimulator::delete`](crate::StaticListSimulator::delete).
///
/// Every failure leaves the arena untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteError {
    /// The simulator has not been initialized.
    NotInitialized,
    /// Malformed payload.
    InvalidArgument(ArgumentError),
    /// No element of the chain holds the value.
    NotFound {
        /// The value searched for.
        value: Payload,
    },
    /// Internal consistency failure in the arena.
    Arena(ArenaError),
}

impl DeleteError {
    /// Flat classification for receipts.
    pub fn reason(&self) -> RejectReason {
        match self {
            Self::NotInitialized => RejectReason::NotInitialized,
            Self::InvalidArgument(_) => RejectReason::InvalidArgument,
            Self::NotFound { .. } => RejectReason::NotFound,
            Self::Arena(e) => e.reason(),
        }
    }
}

impl fmt::Display for DeleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "list not initialized"),
            Self::InvalidArgument(e) => write!(f, "invalid argument: {e}"),
            Self::NotFound { value } => write!(f, "'{value}' not found in chain"),
            Self::Arena(e) => write!(f, "arena: {e}"),
        }
    }
}

impl Error for DeleteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(e) => Some(e),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArgumentError> for DeleteError {
    fn from(e: ArgumentError) -> Self {
        Self::InvalidArgument(e)
    }
}

impl From<ArenaError> for DeleteError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

// ── InspectError ───────────────────────────────────────────────────

/// Errors from the read-only inspection surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InspectError {
    /// The simulator has not been initialized.
    NotInitialized,
    /// [`verify`](crate::StaticListSimulator::verify) found a broken invariant.
    Invariant(InvariantViolation),
}

impl InspectError {
    /// Flat classification for receipts.
    pub fn reason(&self) -> RejectReason {
        match self {
            Self::NotInitialized => RejectReason::NotInitialized,
            Self::Invariant(_) => RejectReason::IndexOutOfRange,
        }
    }
}

impl fmt::Display for InspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "list not initialized"),
            Self::Invariant(v) => write!(f, "invariant violated: {v}"),
        }
    }
}

impl Error for InspectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invariant(v) => Some(v),
            Self::NotInitialized => None,
        }
    }
}

impl From<InvariantViolation> for InspectError {
    fn from(v: InvariantViolation) -> Self {
        Self::Invariant(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statlink_core::SlotIndex;

    #[test]
    fn reasons_classify_each_variant() {
        assert_eq!(InsertError::NotInitialized.reason(), RejectReason::NotInitialized);
        assert_eq!(
            InsertError::from(ArgumentError::EmptyPayload).reason(),
            RejectReason::InvalidArgument
        );
        assert_eq!(
            InsertError::PositionOutOfRange {
                position: 3,
                length: 1
            }
            .reason(),
            RejectReason::PositionOutOfRange
        );
        assert_eq!(
            InsertError::ArenaFull { capacity: 5 }.reason(),
            RejectReason::ArenaFull
        );
        let oob = ArenaError::IndexOutOfRange {
            index: SlotIndex(9),
            capacity: 5,
        };
        assert_eq!(InsertError::from(oob).reason(), RejectReason::IndexOutOfRange);
        assert_eq!(DeleteError::from(oob).reason(), RejectReason::IndexOutOfRange);
        assert_eq!(
            DeleteError::NotFound {
                value: Payload::new('q').unwrap()
            }
            .reason(),
            RejectReason::NotFound
        );
    }

    #[test]
    fn source_chains_wrapped_errors() {
        let e = InsertError::from(ArgumentError::NegativePosition { position: -2 });
        assert!(e.source().is_some());
        assert!(InsertError::NotInitialized.source().is_none());
        assert_eq!(
            e.to_string(),
            "invalid argument: position -2 is negative"
        );
    }

    #[test]
    fn messages_mention_values() {
        let e = DeleteError::NotFound {
            value: Payload::new('a').unwrap(),
        };
        assert_eq!(e.to_string(), "'a' not found in chain");
        let e = InsertError::PositionOutOfRange {
            position: 4,
            length: 2,
        };
        assert_eq!(e.to_string(), "position 4 is beyond chain length 2");
    }
}
