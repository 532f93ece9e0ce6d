//! Structural invariant checks over a slot store.
//!
//! [`verify`] walks every slot and the chain and reports the first broken
//! invariant it finds. The mutators never produce any of these states;
//! the checker exists for tests and for stores built by hand.

use std::error::Error;
use std::fmt;

use statlink_core::{Payload, SlotIndex, SlotRead};

use crate::inspector::{LogicalSequence, Termination};

/// A broken structural invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The head slot is missing or not marked occupied.
    HeadNotOccupied,
    /// The head slot carries a payload.
    HeadHasPayload {
        /// The stray payload.
        value: Payload,
    },
    /// An occupied non-head slot has no payload.
    OccupiedWithoutPayload {
        /// The slot.
        index: SlotIndex,
    },
    /// A free slot still carries a payload.
    FreeWithPayload {
        /// The slot.
        index: SlotIndex,
        /// The stray payload.
        value: Payload,
    },
    /// A stored link targets an index outside the store.
    LinkOutOfRange {
        /// Slot holding the link.
        index: SlotIndex,
        /// The out-of-range target.
        target: SlotIndex,
    },
    /// The chain did not end at NULL.
    Malformed {
        /// How the walk ended instead.
        termination: Termination,
    },
    /// The chain reaches a free slot.
    LinkToFreeSlot {
        /// The free slot on the chain.
        index: SlotIndex,
    },
    /// An occupied slot is not reachable from the head.
    LeakedSlot {
        /// The unreachable slot.
        index: SlotIndex,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeadNotOccupied => write!(f, "head slot is not occupied"),
            Self::HeadHasPayload { value } => write!(f, "head slot holds payload '{value}'"),
            Self::OccupiedWithoutPayload { index } => {
                write!(f, "occupied slot {index} has no payload")
            }
            Self::FreeWithPayload { index, value } => {
                write!(f, "free slot {index} still holds '{value}'")
            }
            Self::LinkOutOfRange { index, target } => {
                write!(f, "slot {index} links to out-of-range slot {target}")
            }
            Self::Malformed { termination } => {
                write!(f, "chain did not terminate at NULL: {termination:?}")
            }
            Self::LinkToFreeSlot { index } => write!(f, "chain reaches free slot {index}"),
            Self::LeakedSlot { index } => {
                write!(f, "occupied slot {index} is unreachable from head")
            }
        }
    }
}

impl Error for InvariantViolation {}

/// Check every structural invariant of `source`.
///
/// In order: the head is occupied and empty; every link is in range;
/// occupied slots carry payloads and free slots do not; the chain ends at
/// NULL, visits only occupied slots, and reaches every occupied slot.
pub fn verify<S: SlotRead + ?Sized>(source: &S) -> Result<(), InvariantViolation> {
    let capacity = source.capacity();
    let head = source
        .node(SlotIndex::HEAD)
        .ok_or(InvariantViolation::HeadNotOccupied)?;
    if !source.is_occupied(SlotIndex::HEAD) {
        return Err(InvariantViolation::HeadNotOccupied);
    }
    if let Some(value) = head.data {
        return Err(InvariantViolation::HeadHasPayload { value });
    }

    for i in 0..capacity {
        let Ok(raw) = u32::try_from(i) else { break };
        let index = SlotIndex(raw);
        let Some(node) = source.node(index) else {
            continue;
        };
        if let Some(target) = node.next.target() {
            if target.index() >= capacity {
                return Err(InvariantViolation::LinkOutOfRange { index, target });
            }
        }
        if index.is_head() {
            continue;
        }
        match (source.is_occupied(index), node.data) {
            (true, None) => return Err(InvariantViolation::OccupiedWithoutPayload { index }),
            (false, Some(value)) => {
                return Err(InvariantViolation::FreeWithPayload { index, value })
            }
            _ => {}
        }
    }

    let seq = LogicalSequence::collect_from(source);
    if !seq.is_well_formed() {
        return Err(InvariantViolation::Malformed {
            termination: seq.termination(),
        });
    }
    let mut on_chain = vec![false; capacity];
    for e in &seq {
        if !source.is_occupied(e.index) {
            return Err(InvariantViolation::LinkToFreeSlot { index: e.index });
        }
        on_chain[e.index.index()] = true;
    }
    for (i, &linked) in on_chain.iter().enumerate().skip(1) {
        let Ok(raw) = u32::try_from(i) else { break };
        let index = SlotIndex(raw);
        if !linked && source.is_occupied(index) {
            return Err(InvariantViolation::LeakedSlot { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use statlink_arena::SlotArena;
    use statlink_core::Link;

    fn p(c: char) -> Payload {
        Payload::new(c).unwrap()
    }

    fn one_element() -> SlotArena {
        let mut arena = SlotArena::with_capacity(4).unwrap();
        arena.occupy(SlotIndex(1), p('a')).unwrap();
        arena.set_next(SlotIndex(1), Link::Null).unwrap();
        arena.set_next(SlotIndex::HEAD, Link::Slot(SlotIndex(1))).unwrap();
        arena
    }

    #[test]
    fn fresh_and_populated_arenas_pass() {
        assert_eq!(verify(&SlotArena::with_capacity(5).unwrap()), Ok(()));
        assert_eq!(verify(&one_element()), Ok(()));
    }

    #[test]
    fn head_violations() {
        let mut arena = one_element();
        arena.set_occupied(SlotIndex::HEAD, false).unwrap();
        assert_eq!(verify(&arena), Err(InvariantViolation::HeadNotOccupied));

        let mut arena = one_element();
        arena.set_data(SlotIndex::HEAD, Some(p('h'))).unwrap();
        assert_eq!(
            verify(&arena),
            Err(InvariantViolation::HeadHasPayload { value: p('h') })
        );
    }

    #[test]
    fn payload_violations() {
        let mut arena = one_element();
        arena.set_data(SlotIndex(1), None).unwrap();
        assert_eq!(
            verify(&arena),
            Err(InvariantViolation::OccupiedWithoutPayload { index: SlotIndex(1) })
        );

        let mut arena = one_element();
        arena.set_data(SlotIndex(3), Some(p('x'))).unwrap();
        assert_eq!(
            verify(&arena),
            Err(InvariantViolation::FreeWithPayload {
                index: SlotIndex(3),
                value: p('x'),
            })
        );
    }

    #[test]
    fn chain_violations() {
        let mut arena = one_element();
        arena.set_next(SlotIndex(1), Link::Slot(SlotIndex(1))).unwrap();
        assert_eq!(
            verify(&arena),
            Err(InvariantViolation::Malformed {
                termination: Termination::CycleDetected { at: SlotIndex(1) },
            })
        );

        let mut arena = one_element();
        arena.set_next(SlotIndex(1), Link::Slot(SlotIndex(2))).unwrap();
        arena.set_next(SlotIndex(2), Link::Null).unwrap();
        assert_eq!(
            verify(&arena),
            Err(InvariantViolation::LinkToFreeSlot { index: SlotIndex(2) })
        );

        let mut arena = one_element();
        arena.occupy(SlotIndex(3), p('z')).unwrap();
        assert_eq!(
            verify(&arena),
            Err(InvariantViolation::LeakedSlot { index: SlotIndex(3) })
        );
    }
}
