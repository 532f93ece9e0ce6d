//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for a slot arena.
///
/// The capacity counts every slot including the head sentinel, so an
/// arena of capacity `n` holds at most `n - 1` elements. Validated at
/// construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of slots, head included.
    ///
    /// Default: 5. Must be at least 1 and at most `u32::MAX`.
    pub capacity: usize,
}

impl ArenaConfig {
    /// Default capacity: the head plus four element slots.
    pub const DEFAULT_CAPACITY: usize = 5;

    /// Largest capacity whose indices all fit a `SlotIndex`.
    pub const MAX_CAPACITY: usize = u32::MAX as usize;

    /// Create a config with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check that the capacity can back an arena.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.capacity == 0 || self.capacity > Self::MAX_CAPACITY {
            return Err(ArenaError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Maximum number of elements the chain can hold.
    pub fn element_capacity(&self) -> usize {
        self.capacity.saturating_sub(1)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
