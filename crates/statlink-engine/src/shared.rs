//! Thread-shareable simulator handle.
//!
//! [`SharedSimulator`] wraps a [`StaticListSimulator`] in `Arc<Mutex<_>>`.
//! Each call takes the lock for its whole duration, so every insert,
//! delete and inspection is atomic with respect to the others.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use statlink_arena::{ArenaConfig, ArenaError, ArenaSnapshot};
use statlink_core::{Command, Receipt, SlotIndex};

use crate::error::{DeleteError, InsertError, InspectError};
use crate::inspector::LogicalSequence;
use crate::metrics::ListMetrics;
use crate::simulator::StaticListSimulator;

/// A cloneable handle to one simulator shared between threads.
#[derive(Clone, Debug)]
pub struct SharedSimulator {
    inner: Arc<Mutex<StaticListSimulator>>,
}

impl SharedSimulator {
    /// Create an uninitialized shared simulator.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        Ok(Self::from(StaticListSimulator::new(config)?))
    }

    // Operations never leave the arena half-spliced, so a panic in another
    // holder does not invalidate the state.
    fn lock(&self) -> MutexGuard<'_, StaticListSimulator> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`StaticListSimulator::initialize`].
    pub fn initialize(&self) {
        self.lock().initialize();
    }

    /// See [`StaticListSimulator::insert`].
    pub fn insert(&self, value: &str, position: i64) -> Result<SlotIndex, InsertError> {
        self.lock().insert(value, position)
    }

    /// See [`StaticListSimulator::delete`].
    pub fn delete(&self, value: &str) -> Result<SlotIndex, DeleteError> {
        self.lock().delete(value)
    }

    /// See [`StaticListSimulator::apply`].
    pub fn apply(&self, command: &Command) -> Receipt {
        self.lock().apply(command)
    }

    /// See [`StaticListSimulator::logical_sequence`].
    pub fn logical_sequence(&self) -> Result<LogicalSequence, InspectError> {
        self.lock().logical_sequence()
    }

    /// See [`StaticListSimulator::snapshot`].
    pub fn snapshot(&self) -> Result<ArenaSnapshot, InspectError> {
        self.lock().snapshot()
    }

    /// A copy of the current counters.
    pub fn metrics(&self) -> ListMetrics {
        self.lock().metrics().clone()
    }

    /// Run `f` with exclusive access to the simulator.
    pub fn with<R>(&self, f: impl FnOnce(&mut StaticListSimulator) -> R) -> R {
        f(&mut self.lock())
    }
}

impl From<StaticListSimulator> for SharedSimulator {
    fn from(sim: StaticListSimulator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sim)),
        }
    }
}
