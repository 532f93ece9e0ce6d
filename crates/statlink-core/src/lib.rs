//! Core types and traits for the statlink static linked list simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the data model shared by the rest of the workspace: slot indices and
//! links, payloads, the node record, commands and receipts, error
//! classification, and the [`SlotRead`] trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command;
pub mod error;
pub mod id;
pub mod node;
pub mod payload;
pub mod traits;

pub use command::{Command, Receipt};
pub use error::{ArgumentError, RejectReason};
pub use id::{Link, SlotIndex};
pub use node::Node;
pub use payload::{parse_position, Payload};
pub use traits::SlotRead;
