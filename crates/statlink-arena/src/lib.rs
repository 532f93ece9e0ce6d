//! Fixed-capacity node arena for the statlink simulator.
//!
//! The arena is the only owner of node storage. Nodes refer to each other
//! by [`SlotIndex`](statlink_core::SlotIndex) alone; there are no native
//! references between them, so the whole structure stays bounded and
//! inspectable.
//!
//! # Architecture
//!
//! ```text
//! SlotArena
//! ├── nodes:    [Node; capacity]   slot 0 = head sentinel
//! └── occupied: [bool; capacity]   parallel occupancy table (free list)
//!
//! allocator::find_free_slot   lowest free index in 1..capacity
//! ArenaSnapshot               owned per-slot rows for renderers
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod arena;
pub mod config;
pub mod error;
pub mod snapshot;

pub use allocator::{find_free_slot, free_count, free_slots};
pub use arena::SlotArena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use snapshot::{ArenaSnapshot, SlotRecord};
