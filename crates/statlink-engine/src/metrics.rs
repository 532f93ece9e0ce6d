//! Operation counters for a simulator instance.
//!
//! [`ListMetrics`] is cumulative since the simulator was created;
//! re-initializing does not reset it.

/// Counts of applied and rejected operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListMetrics {
    /// Number of `initialize()` calls.
    pub initializations: u64,
    /// Inserts that linked a new node.
    pub inserts_applied: u64,
    /// Inserts that failed without mutating the arena.
    pub inserts_rejected: u64,
    /// Deletes that unlinked a node.
    pub deletes_applied: u64,
    /// Deletes that failed without mutating the arena.
    pub deletes_rejected: u64,
    /// Longest chain observed.
    pub peak_len: usize,
}

impl ListMetrics {
    /// Total operations attempted (initializations excluded).
    pub fn operations(&self) -> u64 {
        self.inserts_applied + self.inserts_rejected + self.deletes_applied + self.deletes_rejected
    }

    /// Total rejected operations.
    pub fn rejections(&self) -> u64 {
        self.inserts_rejected + self.deletes_rejected
    }
}
