//! Operation commands and their receipts.
//!
//! A [`Command`] is one user action as the presentation layer captured it,
//! raw input included, so that replaying a command list reproduces
//! rejections as well as mutations.

use crate::error::RejectReason;
use crate::id::SlotIndex;

/// One operation against a simulator.
///
/// # Examples
///
/// ```
/// use statlink_core::Command;
///
/// let cmd = Command::insert("H", 0);
/// assert!(matches!(cmd, Command::Insert { position: 0, .. }));
/// assert!(cmd.is_mutation());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// (Re)create the arena, dropping every element.
    Initialize,
    /// Insert `value` at logical offset `position` from the head.
    Insert {
        /// Raw payload text.
        value: String,
        /// Raw position; negative values are rejected.
        position: i64,
    },
    /// Delete the first occurrence of `value`.
    Delete {
        /// Raw payload text.
        value: String,
    },
}

impl Command {
    /// Build an insert command.
    pub fn insert(value: impl Into<String>, position: i64) -> Self {
        Self::Insert {
            value: value.into(),
            position,
        }
    }

    /// Build a delete command.
    pub fn delete(value: impl Into<String>) -> Self {
        Self::Delete {
            value: value.into(),
        }
    }

    /// Whether the command can change chain contents when accepted.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Initialize)
    }
}

/// Outcome of applying one [`Command`].
///
/// # Examples
///
/// ```
/// use statlink_core::{Receipt, RejectReason, SlotIndex};
///
/// let ok = Receipt::applied(SlotIndex(1));
/// assert!(ok.accepted);
///
/// let full = Receipt::rejected(RejectReason::ArenaFull);
/// assert_eq!(full.reason_code, Some(RejectReason::ArenaFull));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Receipt {
    /// Whether the command was applied.
    pub accepted: bool,
    /// Slot allocated by an insert or freed by a delete.
    pub slot: Option<SlotIndex>,
    /// Why the command was rejected, if it was.
    pub reason_code: Option<RejectReason>,
}

impl Receipt {
    /// Receipt for an applied command that touched `slot`.
    pub fn applied(slot: SlotIndex) -> Self {
        Self {
            accepted: true,
            slot: Some(slot),
            reason_code: None,
        }
    }

    /// Receipt for an applied command with no slot result (initialize).
    pub fn applied_without_slot() -> Self {
        Self {
            accepted: true,
            slot: None,
            reason_code: None,
        }
    }

    /// Receipt for a rejected command.
    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            accepted: false,
            slot: None,
            reason_code: Some(reason),
        }
    }
}
