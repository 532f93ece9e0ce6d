//! The static linked list simulator.
//!
//! [`StaticListSimulator`] owns one [`SlotArena`] and is its only mutator.
//! Callers drive it through [`insert`](StaticListSimulator::insert) and
//! [`delete`](StaticListSimulator::delete), and read it back through
//! [`walk`](StaticListSimulator::walk),
//! [`logical_sequence`](StaticListSimulator::logical_sequence) and
//! [`snapshot`](StaticListSimulator::snapshot).
//!
//! # Lifecycle
//!
//! ```text
//! new(config) ──► [uninitialized] ──initialize()──► [initialized] ──discard()──┐
//!                        ▲                             │  ▲                    │
//!                        └─────────────────────────────┼──┴── initialize() ◄───┘
//!                                                      └─ insert / delete / inspect
//! ```
//!
//! Every operation except `initialize` fails with `NotInitialized` while
//! the simulator is uninitialized. The capacity is fixed by the config.
//!
//! # Ownership model
//!
//! Mutators take `&mut self` and inspectors return views borrowing `self`,
//! so a walk can never observe a half-applied splice. For sharing across
//! threads wrap the simulator in a [`SharedSimulator`](crate::SharedSimulator).

use statlink_arena::{find_free_slot, ArenaConfig, ArenaError, ArenaSnapshot, SlotArena};
use statlink_core::{parse_position, Command, Link, Payload, Receipt, SlotIndex};

use crate::error::{DeleteError, InsertError, InspectError};
use crate::inspector::{ChainWalk, LogicalSequence};
use crate::invariants;
use crate::metrics::ListMetrics;

/// A singly linked list simulated on a fixed-capacity arena.
///
/// # Example
///
/// ```
/// use statlink_engine::StaticListSimulator;
///
/// let mut sim = StaticListSimulator::with_capacity(5).unwrap();
/// sim.initialize();
/// sim.insert("A", 0).unwrap();
/// sim.insert("B", 1).unwrap();
/// sim.insert("C", 1).unwrap();
/// assert_eq!(sim.logical_sequence().unwrap().text(), "ACB");
/// ```
#[derive(Clone, Debug)]
pub struct StaticListSimulator {
    config: ArenaConfig,
    arena: SlotArena,
    initialized: bool,
    len: usize,
    metrics: ListMetrics,
}

impl StaticListSimulator {
    /// Create an uninitialized simulator.
    ///
    /// Validates the config; call [`initialize`](Self::initialize) before
    /// any other operation.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        let arena = SlotArena::new(&config)?;
        Ok(Self {
            config,
            arena,
            initialized: false,
            len: 0,
            metrics: ListMetrics::default(),
        })
    }

    /// Shorthand for `new(ArenaConfig::new(capacity))`.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Self::new(ArenaConfig::new(capacity))
    }

    /// Reset every slot to free, leaving only the empty head.
    ///
    /// May be called again at any time to drop all elements.
    pub fn initialize(&mut self) {
        self.arena.reset();
        self.initialized = true;
        self.len = 0;
        self.metrics.initializations += 1;
        tracing::info!(capacity = self.arena.capacity(), "list initialized");
    }

    /// Return to the uninitialized state, clearing the arena.
    pub fn discard(&mut self) {
        self.arena.reset();
        self.initialized = false;
        self.len = 0;
        tracing::info!("list discarded");
    }

    /// Whether [`initialize`](Self::initialize) has been called since
    /// creation or the last [`discard`](Self::discard).
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The configuration this simulator was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Number of slots, head included.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Current chain length. Zero while uninitialized.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Operation counters.
    pub fn metrics(&self) -> &ListMetrics {
        &self.metrics
    }

    /// Read-only access to the arena, `None` while uninitialized.
    pub fn arena(&self) -> Option<&SlotArena> {
        self.initialized.then_some(&self.arena)
    }

    // ── mutators ───────────────────────────────────────────────────

    /// Insert `value` so that it ends up at logical offset `position`.
    ///
    /// `value` must be exactly one character; `position` must be between
    /// 0 (right after the head) and the current length. Returns the slot
    /// the allocator handed out (always the lowest free index). On error
    /// the arena is unchanged.
    pub fn insert(&mut self, value: &str, position: i64) -> Result<SlotIndex, InsertError> {
        let result = self.require_init(InsertError::NotInitialized).and_then(|()| {
            let value = Payload::parse(value)?;
            let position = parse_position(position)?;
            self.link_new(value, position)
        });
        self.record_insert(&result);
        result
    }

    /// Typed form of [`insert`](Self::insert) for already-validated input.
    pub fn insert_payload(
        &mut self,
        value: Payload,
        position: usize,
    ) -> Result<SlotIndex, InsertError> {
        let result = self
            .require_init(InsertError::NotInitialized)
            .and_then(|()| self.link_new(value, position));
        self.record_insert(&result);
        result
    }

    /// Remove the first element (head to tail) equal to `value`.
    ///
    /// Returns the freed slot. On error the arena is unchanged.
    pub fn delete(&mut self, value: &str) -> Result<SlotIndex, DeleteError> {
        let result = self.require_init(DeleteError::NotInitialized).and_then(|()| {
            let value = Payload::parse(value)?;
            self.unlink_first(value)
        });
        self.record_delete(&result);
        result
    }

    /// Typed form of [`delete`](Self::delete).
    pub fn delete_payload(&mut self, value: Payload) -> Result<SlotIndex, DeleteError> {
        let result = self
            .require_init(DeleteError::NotInitialized)
            .and_then(|()| self.unlink_first(value));
        self.record_delete(&result);
        result
    }

    /// Apply a [`Command`] and report the outcome as a [`Receipt`].
    pub fn apply(&mut self, command: &Command) -> Receipt {
        match command {
            Command::Initialize => {
                self.initialize();
                Receipt::applied_without_slot()
            }
            Command::Insert { value, position } => match self.insert(value, *position) {
                Ok(slot) => Receipt::applied(slot),
                Err(e) => Receipt::rejected(e.reason()),
            },
            Command::Delete { value } => match self.delete(value) {
                Ok(slot) => Receipt::applied(slot),
                Err(e) => Receipt::rejected(e.reason()),
            },
        }
    }

    // ── inspection ─────────────────────────────────────────────────

    /// Lazy walk of the chain from the head.
    pub fn walk(&self) -> Result<ChainWalk<'_, SlotArena>, InspectError> {
        self.require_init(InspectError::NotInitialized)?;
        Ok(ChainWalk::new(&self.arena))
    }

    /// The chain as `(value, slot)` pairs plus how the walk ended.
    pub fn logical_sequence(&self) -> Result<LogicalSequence, InspectError> {
        Ok(self.walk()?.finish())
    }

    /// Every slot with its payload, link, occupancy and chain membership.
    pub fn snapshot(&self) -> Result<ArenaSnapshot, InspectError> {
        let mut walk = self.walk()?;
        walk.by_ref().for_each(drop);
        Ok(ArenaSnapshot::capture(&self.arena, walk.path()))
    }

    /// Check every structural invariant of the arena.
    pub fn verify(&self) -> Result<(), InspectError> {
        self.require_init(InspectError::NotInitialized)?;
        invariants::verify(&self.arena)?;
        Ok(())
    }

    // ── internals ──────────────────────────────────────────────────

    fn require_init<E>(&self, err: E) -> Result<(), E> {
        if self.initialized {
            Ok(())
        } else {
            Err(err)
        }
    }

    /// Follow `next` from the head up to `position` times, stopping at NULL.
    ///
    /// Returns the slot reached and the number of hops taken. Never
    /// follows more than `capacity` links.
    fn seek(&self, position: usize) -> Result<(SlotIndex, usize), ArenaError> {
        let limit = position.min(self.arena.capacity());
        let mut p = SlotIndex::HEAD;
        let mut steps = 0;
        while steps < limit {
            match self.arena.next(p)? {
                Link::Null => break,
                Link::Slot(n) => {
                    p = n;
                    steps += 1;
                }
            }
        }
        Ok((p, steps))
    }

    fn link_new(&mut self, value: Payload, position: usize) -> Result<SlotIndex, InsertError> {
        let (p, steps) = self.seek(position)?;
        if steps < position {
            return Err(InsertError::PositionOutOfRange {
                position,
                length: steps,
            });
        }
        let q = find_free_slot(&self.arena).ok_or(InsertError::ArenaFull {
            capacity: self.arena.capacity(),
        })?;
        tracing::debug!(slot = %q, "space allocated");

        // The new node takes over p's successor before p points at it.
        let downstream = self.arena.next(p)?;
        self.arena.occupy(q, value)?;
        self.arena.set_next(q, downstream)?;
        self.arena.set_next(p, Link::Slot(q))?;
        tracing::debug!(slot = %q, prev = %p, value = %value, position, "linked node");
        Ok(q)
    }

    /// Find the first `(p, q)` with `p.next == q` and `q.data == value`.
    fn find_predecessor(
        &self,
        value: Payload,
    ) -> Result<Option<(SlotIndex, SlotIndex)>, ArenaError> {
        let mut p = SlotIndex::HEAD;
        for _ in 0..self.arena.capacity() {
            match self.arena.next(p)? {
                Link::Null => return Ok(None),
                Link::Slot(q) => {
                    if self.arena.data(q)? == Some(value) {
                        return Ok(Some((p, q)));
                    }
                    p = q;
                }
            }
        }
        Ok(None)
    }

    fn unlink_first(&mut self, value: Payload) -> Result<SlotIndex, DeleteError> {
        let (p, q) = self
            .find_predecessor(value)?
            .ok_or(DeleteError::NotFound { value })?;
        let after = self.arena.next(q)?;
        self.arena.set_next(p, after)?;
        self.arena.release(q)?;
        tracing::debug!(slot = %q, prev = %p, value = %value, "unlinked node, space freed");
        Ok(q)
    }

    fn record_insert(&mut self, result: &Result<SlotIndex, InsertError>) {
        match result {
            Ok(_) => {
                self.len += 1;
                self.metrics.inserts_applied += 1;
                self.metrics.peak_len = self.metrics.peak_len.max(self.len);
            }
            Err(e) => {
                self.metrics.inserts_rejected += 1;
                tracing::debug!(reason = %e, "insert rejected");
            }
        }
    }

    fn record_delete(&mut self, result: &Result<SlotIndex, DeleteError>) {
        match result {
            Ok(_) => {
                self.len -= 1;
                self.metrics.deletes_applied += 1;
            }
            Err(e) => {
                self.metrics.deletes_rejected += 1;
                tracing::debug!(reason = %e, "delete rejected");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statlink_core::{ArgumentError, Node, RejectReason};

    fn sim(capacity: usize) -> StaticListSimulator {
        let mut s = StaticListSimulator::with_capacity(capacity).unwrap();
        s.initialize();
        s
    }

    fn text(s: &StaticListSimulator) -> String {
        s.logical_sequence().unwrap().text()
    }

    fn p(c: char) -> Payload {
        Payload::new(c).unwrap()
    }

    // ── initialization ─────────────────────────────────────────────

    #[test]
    fn initialize_sets_head_only() {
        let s = sim(5);
        let snap = s.snapshot().unwrap();
        assert_eq!(snap.occupancy(), vec![true, false, false, false, false]);
        assert_eq!(snap.raw_links(), vec![-1, 0, 0, 0, 0]);
        assert!(snap.get(SlotIndex::HEAD).unwrap().data.is_none());
        assert_eq!(s.len(), 0);
        assert!(s.logical_sequence().unwrap().is_empty());
    }

    #[test]
    fn operations_before_initialize_fail() {
        let mut s = StaticListSimulator::with_capacity(5).unwrap();
        assert!(!s.is_initialized());
        assert_eq!(s.insert("A", 0), Err(InsertError::NotInitialized));
        assert_eq!(s.delete("A"), Err(DeleteError::NotInitialized));
        assert_eq!(
            s.logical_sequence().unwrap_err(),
            InspectError::NotInitialized
        );
        assert_eq!(s.snapshot().unwrap_err(), InspectError::NotInitialized);
        assert_eq!(s.verify(), Err(InspectError::NotInitialized));
        assert!(s.arena().is_none());
    }

    #[test]
    fn invalid_capacity_rejected_at_construction() {
        assert!(StaticListSimulator::with_capacity(0).is_err());
    }

    #[test]
    fn reinitialize_clears_chain() {
        let mut s = sim(5);
        s.insert("A", 0).unwrap();
        s.insert("B", 1).unwrap();
        s.initialize();
        assert_eq!(text(&s), "");
        assert_eq!(s.len(), 0);
        assert_eq!(s.insert("C", 0), Ok(SlotIndex(1)));
        assert_eq!(s.metrics().initializations, 2);
    }

    #[test]
    fn discard_returns_to_uninitialized() {
        let mut s = sim(5);
        s.insert("A", 0).unwrap();
        s.discard();
        assert!(!s.is_initialized());
        assert_eq!(s.insert("A", 0), Err(InsertError::NotInitialized));
        s.initialize();
        assert_eq!(text(&s), "");
    }

    // ── insert ─────────────────────────────────────────────────────

    #[test]
    fn insert_places_value_at_offset() {
        let mut s = sim(6);
        s.insert("a", 0).unwrap();
        s.insert("c", 1).unwrap();
        s.insert("b", 1).unwrap();
        s.insert("z", 0).unwrap();
        s.insert("d", 4).unwrap();
        assert_eq!(text(&s), "zabcd");
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn insert_rejects_position_past_end_without_mutation() {
        let mut s = sim(5);
        s.insert("A", 0).unwrap();
        let before = s.snapshot().unwrap();
        assert_eq!(
            s.insert("B", 2),
            Err(InsertError::PositionOutOfRange {
                position: 2,
                length: 1
            })
        );
        assert_eq!(s.snapshot().unwrap(), before);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn insert_rejects_huge_position() {
        let mut s = sim(3);
        assert_eq!(
            s.insert("A", i64::MAX),
            Err(InsertError::PositionOutOfRange {
                position: i64::MAX as usize,
                length: 0
            })
        );
    }

    #[test]
    fn insert_rejects_full_arena_without_mutation() {
        let mut s = sim(3);
        s.insert("A", 0).unwrap();
        s.insert("B", 1).unwrap();
        let before = s.snapshot().unwrap();
        assert_eq!(s.insert("C", 0), Err(InsertError::ArenaFull { capacity: 3 }));
        assert_eq!(s.snapshot().unwrap(), before);
    }

    #[test]
    fn position_is_checked_before_capacity() {
        let mut s = sim(2);
        s.insert("A", 0).unwrap();
        assert_eq!(
            s.insert("B", 5),
            Err(InsertError::PositionOutOfRange {
                position: 5,
                length: 1
            })
        );
    }

    #[test]
    fn insert_rejects_bad_arguments() {
        let mut s = sim(5);
        assert_eq!(
            s.insert("", 0),
            Err(InsertError::InvalidArgument(ArgumentError::EmptyPayload))
        );
        assert_eq!(
            s.insert("ab", 0),
            Err(InsertError::InvalidArgument(
                ArgumentError::MultiCharPayload { chars: 2 }
            ))
        );
        assert_eq!(
            s.insert("a", -1),
            Err(InsertError::InvalidArgument(
                ArgumentError::NegativePosition { position: -1 }
            ))
        );
        assert_eq!(s.len(), 0);
        assert_eq!(s.metrics().inserts_rejected, 3);
    }

    #[test]
    fn head_only_arena_is_always_full() {
        let mut s = sim(1);
        assert_eq!(s.insert("A", 0), Err(InsertError::ArenaFull { capacity: 1 }));
    }

    // ── delete ─────────────────────────────────────────────────────

    #[test]
    fn delete_removes_first_occurrence_only() {
        let mut s = sim(5);
        s.insert("a", 0).unwrap();
        s.insert("b", 1).unwrap();
        s.insert("a", 2).unwrap();
        assert_eq!(s.delete("a"), Ok(SlotIndex(1)));
        assert_eq!(text(&s), "ba");
        assert_eq!(
            s.logical_sequence().unwrap().indices(),
            vec![SlotIndex(2), SlotIndex(3)]
        );
    }

    #[test]
    fn delete_absent_value_is_not_found() {
        let mut s = sim(5);
        s.insert("a", 0).unwrap();
        let before = s.snapshot().unwrap();
        assert_eq!(s.delete("x"), Err(DeleteError::NotFound { value: p('x') }));
        assert_eq!(s.snapshot().unwrap(), before);
    }

    #[test]
    fn delete_from_empty_chain_is_not_found() {
        let mut s = sim(5);
        assert_eq!(s.delete("a"), Err(DeleteError::NotFound { value: p('a') }));
    }

    #[test]
    fn delete_frees_slot_to_placeholder_state() {
        let mut s = sim(4);
        s.insert("a", 0).unwrap();
        s.insert("b", 1).unwrap();
        assert_eq!(s.delete("b"), Ok(SlotIndex(2)));
        let arena = s.arena().unwrap();
        assert_eq!(arena.get(SlotIndex(2)).unwrap(), &Node::FREE);
        assert!(!arena.occupied(SlotIndex(2)).unwrap());
        assert_eq!(arena.next(SlotIndex(1)).unwrap(), Link::Null);
    }

    #[test]
    fn delete_rejects_bad_argument() {
        let mut s = sim(5);
        assert_eq!(
            s.delete(""),
            Err(DeleteError::InvalidArgument(ArgumentError::EmptyPayload))
        );
    }

    // ── reference walkthrough ──────────────────────────────────────

    #[test]
    fn reference_scenario_capacity_five() {
        let mut s = sim(5);
        assert_eq!(s.insert("A", 0), Ok(SlotIndex(1)));
        assert_eq!(text(&s), "A");
        assert_eq!(s.insert("B", 1), Ok(SlotIndex(2)));
        assert_eq!(text(&s), "AB");
        assert_eq!(s.insert("C", 1), Ok(SlotIndex(3)));
        assert_eq!(text(&s), "ACB");
        assert_eq!(s.delete("A"), Ok(SlotIndex(1)));
        assert_eq!(text(&s), "CB");
        assert_eq!(s.insert("D", 0), Ok(SlotIndex(1)));
        assert_eq!(text(&s), "DCB");
        assert_eq!(s.verify(), Ok(()));
    }

    // ── apply / metrics ────────────────────────────────────────────

    #[test]
    fn apply_maps_outcomes_to_receipts() {
        let mut s = StaticListSimulator::with_capacity(3).unwrap();
        assert_eq!(
            s.apply(&Command::insert("A", 0)),
            Receipt::rejected(RejectReason::NotInitialized)
        );
        assert_eq!(s.apply(&Command::Initialize), Receipt::applied_without_slot());
        assert_eq!(s.apply(&Command::insert("A", 0)), Receipt::applied(SlotIndex(1)));
        assert_eq!(
            s.apply(&Command::insert("B", 3)),
            Receipt::rejected(RejectReason::PositionOutOfRange)
        );
        assert_eq!(s.apply(&Command::insert("B", 1)), Receipt::applied(SlotIndex(2)));
        assert_eq!(
            s.apply(&Command::insert("C", 0)),
            Receipt::rejected(RejectReason::ArenaFull)
        );
        assert_eq!(
            s.apply(&Command::delete("Q")),
            Receipt::rejected(RejectReason::NotFound)
        );
        assert_eq!(
            s.apply(&Command::delete("")),
            Receipt::rejected(RejectReason::InvalidArgument)
        );
        assert_eq!(s.apply(&Command::delete("A")), Receipt::applied(SlotIndex(1)));
    }

    #[test]
    fn metrics_track_outcomes() {
        let mut s = sim(3);
        s.insert("A", 0).unwrap();
        s.insert("B", 0).unwrap();
        let _ = s.insert("C", 0);
        s.delete("A").unwrap();
        let _ = s.delete("A");
        let m = s.metrics();
        assert_eq!(m.inserts_applied, 2);
        assert_eq!(m.inserts_rejected, 1);
        assert_eq!(m.deletes_applied, 1);
        assert_eq!(m.deletes_rejected, 1);
        assert_eq!(m.peak_len, 2);
    }

    #[test]
    fn snapshot_reports_linked_rows() {
        let mut s = sim(4);
        s.insert("a", 0).unwrap();
        s.insert("b", 1).unwrap();
        s.delete("a").unwrap();
        let snap = s.snapshot().unwrap();
        let linked: Vec<bool> = snap.rows().iter().map(|r| r.linked).collect();
        assert_eq!(linked, vec![false, false, true, false]);
    }

    #[test]
    fn typed_forms_match_string_forms() {
        let mut s = sim(4);
        assert_eq!(s.insert_payload(p('x'), 0), Ok(SlotIndex(1)));
        assert_eq!(
            s.insert_payload(p('y'), 3),
            Err(InsertError::PositionOutOfRange {
                position: 3,
                length: 1
            })
        );
        assert_eq!(s.delete_payload(p('x')), Ok(SlotIndex(1)));
        assert!(s.is_empty());
    }
}
