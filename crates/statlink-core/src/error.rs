//! Caller-facing error classification.
//!
//! [`ArgumentError`] describes malformed input. [`RejectReason`] is the
//! flat code every operation failure maps onto, carried on
//! [`Receipt`](crate::command::Receipt)s so a presentation layer can pick
//! its own message text.

use std::error::Error;
use std::fmt;

/// Malformed payload or position handed to an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    /// The payload text was empty.
    EmptyPayload,
    /// The payload text held more than one character.
    MultiCharPayload {
        /// Number of characters supplied.
        chars: usize,
    },
    /// The payload was NUL, which is reserved for the empty sentinel.
    ReservedPayload,
    /// The insertion position was negative.
    NegativePosition {
        /// The rejected position.
        position: i64,
    },
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "payload is empty"),
            Self::MultiCharPayload { chars } => {
                write!(f, "payload must be one character, got {chars}")
            }
            Self::ReservedPayload => write!(f, "payload NUL is reserved for empty slots"),
            Self::NegativePosition { position } => {
                write!(f, "position {position} is negative")
            }
        }
    }
}

impl Error for ArgumentError {}

/// Classification of a rejected operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The simulator has not been initialized.
    NotInitialized,
    /// Empty or malformed payload, or a negative position.
    InvalidArgument,
    /// The insert position is past the end of the chain.
    PositionOutOfRange,
    /// No free slot is left for an insert.
    ArenaFull,
    /// The delete target is not in the chain.
    NotFound,
    /// A slot index fell outside the arena. Indicates a logic error.
    IndexOutOfRange,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotInitialized => "not initialized",
            Self::InvalidArgument => "invalid argument",
            Self::PositionOutOfRange => "position out of range",
            Self::ArenaFull => "arena full",
            Self::NotFound => "not found",
            Self::IndexOutOfRange => "index out of range",
        };
        f.write_str(s)
    }
}
