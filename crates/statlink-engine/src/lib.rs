//! List engine and chain inspector for the statlink simulator.
//!
//! [`StaticListSimulator`] implements a singly linked list of characters on
//! top of a fixed-capacity [`SlotArena`](statlink_arena::SlotArena): insert
//! at a logical offset, delete by value, and read the chain back through a
//! cycle-safe [`ChainWalk`]. [`SharedSimulator`] is the same engine behind a
//! mutex for multi-threaded callers.
//!
//! Every mutator either applies completely or returns an error and leaves
//! the arena exactly as it was.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod inspector;
pub mod invariants;
pub mod metrics;
pub mod shared;
pub mod simulator;

pub use error::{DeleteError, InsertError, InspectError};
pub use inspector::{ChainWalk, Element, LogicalSequence, Termination};
pub use invariants::{verify, InvariantViolation};
pub use metrics::ListMetrics;
pub use shared::SharedSimulator;
pub use simulator::StaticListSimulator;
