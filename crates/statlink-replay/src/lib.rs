//! Operation journal and deterministic replay for the statlink simulator.
//!
//! Records every command applied to a simulator together with its receipt
//! and a hash of the arena afterwards, and re-runs a recorded journal
//! against a fresh simulator to check that it takes the same path.
//!
//! A journal is a determinism and audit record, not a save file. Nothing
//! here restores a simulator from disk: replay always starts from a fresh
//! simulator and re-applies the commands, and a journal is only useful
//! alongside the code that produced it.
//!
//! # Architecture
//!
//! - [`JournalWriter`] records frames to any `Write` sink
//! - [`JournalReader`] plays back frames from any `Read` source
//! - [`replay_and_compare`] verifies a replay step by step
//! - [`state_hash`] hashes a [`SlotRead`](statlink_core::SlotRead) store
//!
//! # Format
//!
//! ```text
//! [MAGIC "SLNK"] [VERSION u8] [capacity u32] [config_hash u64]
//! [Frame 0] [Frame 1] ... [Frame N]
//! ```
//!
//! Each frame holds the sequence number, the command, the receipt and the
//! FNV-1a hash of the arena after the command.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod compare;
pub mod error;
pub mod hash;
pub mod reader;
pub mod types;
pub mod writer;

pub use compare::{replay_and_compare, Divergence, DivergenceKind};
pub use error::ReplayError;
pub use hash::{config_hash, state_hash, UNINITIALIZED_HASH};
pub use reader::{FrameIter, JournalReader};
pub use types::{Frame, JournalHeader};
pub use writer::JournalWriter;

/// Magic bytes at the start of every journal.
pub const MAGIC: [u8; 4] = *b"SLNK";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
