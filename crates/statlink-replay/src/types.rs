//! Data types for journal recording and playback.

use statlink_core::{Command, Receipt};

/// Journal header: the arena configuration the journal was recorded on.
///
/// # Examples
///
/// ```
/// use statlink_replay::JournalHeader;
///
/// let header = JournalHeader::for_capacity(5);
/// assert_eq!(header.capacity, 5);
/// assert_eq!(header.config_hash, statlink_replay::config_hash(5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JournalHeader {
    /// Arena capacity, head included.
    pub capacity: u32,
    /// [`config_hash`](crate::config_hash) of the capacity.
    pub config_hash: u64,
}

impl JournalHeader {
    /// Header for an arena of `capacity` slots.
    pub fn for_capacity(capacity: u32) -> Self {
        Self {
            capacity,
            config_hash: crate::hash::config_hash(capacity),
        }
    }
}

/// One recorded step: the command, how it was answered, and the state
/// it left behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Position in the journal, starting at 0.
    pub seq: u64,
    /// The command applied.
    pub command: Command,
    /// The receipt the simulator returned.
    pub receipt: Receipt,
    /// [`state_hash`](crate::state_hash) after the command, or
    /// [`UNINITIALIZED_HASH`](crate::UNINITIALIZED_HASH).
    pub state_hash: u64,
}
