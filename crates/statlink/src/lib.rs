//! Statlink: a static linked list simulator.
//!
//! A singly linked list of characters stored in a fixed-capacity array of
//! slots, where links are slot indices and a separate occupancy table plays
//! the allocator. This is the top-level facade crate that re-exports the
//! public API from all statlink sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use statlink::prelude::*;
//!
//! let mut sim = StaticListSimulator::new(ArenaConfig::default()).unwrap();
//! sim.initialize();
//!
//! assert_eq!(sim.insert("A", 0), Ok(SlotIndex(1)));
//! assert_eq!(sim.insert("B", 1), Ok(SlotIndex(2)));
//! assert_eq!(sim.insert("C", 1), Ok(SlotIndex(3)));
//! assert_eq!(sim.logical_sequence().unwrap().text(), "ACB");
//!
//! // Freed slots are reused lowest-index first.
//! assert_eq!(sim.delete("A"), Ok(SlotIndex(1)));
//! assert_eq!(sim.insert("D", 0), Ok(SlotIndex(1)));
//! assert_eq!(sim.logical_sequence().unwrap().text(), "DCB");
//!
//! // Every slot, including the free one.
//! let snapshot = sim.snapshot().unwrap();
//! assert_eq!(snapshot.raw_links(), vec![1, 3, -1, 2, 0]);
//!
//! // Errors carry the reason and leave the arena untouched.
//! let err = sim.insert("E", 9).unwrap_err();
//! assert_eq!(err.reason(), RejectReason::PositionOutOfRange);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `statlink-core` | Slot indices, links, payloads, commands, the `SlotRead` trait |
//! | [`arena`] | `statlink-arena` | Slot storage, allocator, config, snapshots |
//! | [`engine`] | `statlink-engine` | The simulator, chain walks, invariant checks |
//! | [`replay`] | `statlink-replay` | Operation journal and replay verification |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`statlink-core`).
///
/// [`types::SlotIndex`], [`types::Link`], [`types::Payload`],
/// [`types::Command`] and [`types::Receipt`], plus the
/// [`types::SlotRead`] trait that inspection code is written against.
pub use statlink_core as types;

/// Slot storage (`statlink-arena`).
///
/// [`arena::SlotArena`] holds the nodes and the occupancy table;
/// [`arena::find_free_slot`] is the allocator.
pub use statlink_arena as arena;

/// The list engine (`statlink-engine`).
///
/// [`engine::StaticListSimulator`] for single-threaded use,
/// [`engine::SharedSimulator`] for sharing across threads.
pub use statlink_engine as engine;

/// Journal recording and replay (`statlink-replay`).
///
/// Record with [`replay::JournalWriter`], verify with
/// [`replay::replay_and_compare`].
pub use statlink_replay as replay;

/// Common imports for typical statlink usage.
///
/// ```rust
/// use statlink::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use statlink_core::{Command, Link, Payload, Receipt, RejectReason, SlotIndex, SlotRead};

    // Arena
    pub use statlink_arena::{ArenaConfig, ArenaSnapshot, SlotArena, SlotRecord};

    // Engine
    pub use statlink_engine::{
        DeleteError, InsertError, InspectError, LogicalSequence, SharedSimulator,
        StaticListSimulator, Termination,
    };
}
