//! Free-slot selection over the occupancy table.
//!
//! Allocation policy is lowest-index-first over `1..capacity`; the head
//! slot is never a candidate. The policy is part of the contract: a slot
//! freed by a delete is the next one an insert reuses if nothing below
//! it is free.

use statlink_core::{SlotIndex, SlotRead};

/// Iterator over free slot indices in ascending order.
pub struct FreeSlots<'a, S: SlotRead + ?Sized> {
    source: &'a S,
    cursor: usize,
}

impl<S: SlotRead + ?Sized> Iterator for FreeSlots<'_, S> {
    type Item = SlotIndex;

    fn next(&mut self) -> Option<SlotIndex> {
        while self.cursor < self.source.capacity() {
            let idx = SlotIndex(u32::try_from(self.cursor).ok()?);
            self.cursor += 1;
            if !self.source.is_occupied(idx) {
                return Some(idx);
            }
        }
        None
    }
}

/// Free non-head slots in ascending index order.
pub fn free_slots<S: SlotRead + ?Sized>(source: &S) -> FreeSlots<'_, S> {
    FreeSlots { source, cursor: 1 }
}

/// The lowest-index free slot, or `None` when the arena is full.
///
/// Pure scan, no side effects.
pub fn find_free_slot<S: SlotRead + ?Sized>(source: &S) -> Option<SlotIndex> {
    free_slots(source).next()
}

/// Number of free non-head slots.
pub fn free_count<S: SlotRead + ?Sized>(source: &S) -> usize {
    free_slots(source).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::SlotArena;
    use statlink_core::Payload;

    fn fill(arena: &mut SlotArena, slots: &[u32]) {
        for &s in slots {
            arena.occupy(SlotIndex(s), Payload::new('x').unwrap()).unwrap();
        }
    }

    #[test]
    fn fresh_arena_allocates_slot_one() {
        let arena = SlotArena::with_capacity(5).unwrap();
        assert_eq!(find_free_slot(&arena), Some(SlotIndex(1)));
        assert_eq!(free_count(&arena), 4);
    }

    #[test]
    fn lowest_free_index_wins() {
        let mut arena = SlotArena::with_capacity(6).unwrap();
        fill(&mut arena, &[1, 2, 4]);
        assert_eq!(find_free_slot(&arena), Some(SlotIndex(3)));
        let free: Vec<_> = free_slots(&arena).collect();
        assert_eq!(free, vec![SlotIndex(3), SlotIndex(5)]);
    }

    #[test]
    fn full_arena_has_no_slot() {
        let mut arena = SlotArena::with_capacity(3).unwrap();
        fill(&mut arena, &[1, 2]);
        assert_eq!(find_free_slot(&arena), None);
        assert_eq!(free_count(&arena), 0);
    }

    #[test]
    fn head_never_allocated() {
        let mut arena = SlotArena::with_capacity(3).unwrap();
        arena.set_occupied(SlotIndex::HEAD, false).unwrap();
        fill(&mut arena, &[1, 2]);
        assert_eq!(find_free_slot(&arena), None);
    }

    #[test]
    fn head_only_arena_is_always_full() {
        let arena = SlotArena::with_capacity(1).unwrap();
        assert_eq!(find_free_slot(&arena), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn result_is_lowest_free(
                occupied in proptest::collection::vec(any::<bool>(), 1..32),
            ) {
                let mut arena = SlotArena::with_capacity(occupied.len() + 1).unwrap();
                for (i, &o) in occupied.iter().enumerate() {
                    arena.set_occupied(SlotIndex(i as u32 + 1), o).unwrap();
                }
                let expected = occupied
                    .iter()
                    .position(|&o| !o)
                    .map(|i| SlotIndex(i as u32 + 1));
                prop_assert_eq!(find_free_slot(&arena), expected);
                prop_assert_eq!(free_count(&arena), occupied.iter().filter(|&&o| !o).count());
            }
        }
    }
}
