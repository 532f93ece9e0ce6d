//! Replay verification.
//!
//! [`replay_and_compare`] feeds every recorded command to a caller-provided
//! step function and checks the receipt and state hash it returns against
//! the journal, stopping at the first divergence.

use std::io::Read;

use statlink_core::{Command, Receipt};

use crate::error::ReplayError;
use crate::reader::JournalReader;

/// What differed at a diverging step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DivergenceKind {
    /// The replayed command was answered differently.
    Receipt {
        /// Receipt from the journal.
        recorded: Receipt,
        /// Receipt from the replay.
        replayed: Receipt,
    },
    /// The receipts agree but the arena state differs.
    StateHash {
        /// Hash from the journal.
        recorded: u64,
        /// Hash of the replayed state.
        replayed: u64,
    },
}

/// The first step at which a replay left the recorded path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divergence {
    /// Sequence number of the step.
    pub seq: u64,
    /// The command that was replayed.
    pub command: Command,
    /// What differed.
    pub kind: DivergenceKind,
}

/// Replay a journal through `step_fn` and compare each step.
///
/// `step_fn` applies one command and returns the receipt together with the
/// state hash of the result. Returns `Ok(None)` if every step matches, or
/// the first [`Divergence`].
pub fn replay_and_compare<R: Read>(
    mut reader: JournalReader<R>,
    step_fn: &mut dyn FnMut(&Command) -> Result<(Receipt, u64), ReplayError>,
) -> Result<Option<Divergence>, ReplayError> {
    while let Some(frame) = reader.next_frame()? {
        let (receipt, hash) = step_fn(&frame.command)?;

        let kind = if receipt != frame.receipt {
            Some(DivergenceKind::Receipt {
                recorded: frame.receipt,
                replayed: receipt,
            })
        } else if hash != frame.state_hash {
            Some(DivergenceKind::StateHash {
                recorded: frame.state_hash,
                replayed: hash,
            })
        } else {
            None
        };

        if let Some(kind) = kind {
            tracing::warn!(seq = frame.seq, ?kind, "replay diverged");
            return Ok(Some(Divergence {
                seq: frame.seq,
                command: frame.command,
                kind,
            }));
        }
    }

    tracing::debug!(frames = reader.frames_read(), "replay matched journal");
    Ok(None)
}
