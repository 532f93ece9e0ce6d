//! Full-state copies of an arena for renderers.
//!
//! An [`ArenaSnapshot`] is one row per slot, in index order, with the
//! node fields, the occupancy flag and whether the slot lies on the chain
//! reachable from the head. It owns its data, so a renderer can keep it
//! after the simulator moves on.

use statlink_core::{Link, Payload, SlotIndex, SlotRead};

/// One slot in a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotRecord {
    /// Slot position.
    pub index: SlotIndex,
    /// Stored payload, `None` for the empty sentinel.
    pub data: Option<Payload>,
    /// Stored link.
    pub next: Link,
    /// Occupancy flag.
    pub occupied: bool,
    /// Whether the slot is reachable from the head.
    pub linked: bool,
}

impl SlotRecord {
    /// The link as the C-style integer: `-1` for NULL.
    pub fn raw_next(&self) -> i64 {
        self.next.raw()
    }
}

/// Owned copy of every slot of an arena.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArenaSnapshot {
    rows: Vec<SlotRecord>,
}

impl ArenaSnapshot {
    /// Copy every slot of `source`.
    ///
    /// `linked` lists the slots reachable from the head; the caller walks
    /// the chain since only it knows which termination rules apply.
    pub fn capture<S, I>(source: &S, linked: I) -> Self
    where
        S: SlotRead + ?Sized,
        I: IntoIterator<Item = SlotIndex>,
    {
        let capacity = source.capacity();
        let mut on_chain = vec![false; capacity];
        for idx in linked {
            if let Some(flag) = on_chain.get_mut(idx.index()) {
                *flag = true;
            }
        }

        let rows = (0..capacity)
            .filter_map(|i| {
                let index = SlotIndex(u32::try_from(i).ok()?);
                let node = source.node(index)?;
                Some(SlotRecord {
                    index,
                    data: node.data,
                    next: node.next,
                    occupied: source.is_occupied(index),
                    linked: on_chain[i],
                })
            })
            .collect();
        Self { rows }
    }

    /// All rows in index order.
    pub fn rows(&self) -> &[SlotRecord] {
        &self.rows
    }

    /// The row for `idx`, if present.
    pub fn get(&self, idx: SlotIndex) -> Option<&SlotRecord> {
        self.rows.get(idx.index())
    }

    /// Number of rows (the arena capacity).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the snapshot has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The occupancy table.
    pub fn occupancy(&self) -> Vec<bool> {
        self.rows.iter().map(|r| r.occupied).collect()
    }

    /// Raw `next` values in index order.
    pub fn raw_links(&self) -> Vec<i64> {
        self.rows.iter().map(SlotRecord::raw_next).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::SlotArena;

    #[test]
    fn capture_fresh_arena() {
        let arena = SlotArena::with_capacity(3).unwrap();
        let snap = ArenaSnapshot::capture(&arena, std::iter::empty());
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.occupancy(), vec![true, false, false]);
        assert_eq!(snap.raw_links(), vec![-1, 0, 0]);
        assert!(snap.rows().iter().all(|r| r.data.is_none() && !r.linked));
    }

    #[test]
    fn capture_marks_linked_rows() {
        let mut arena = SlotArena::with_capacity(4).unwrap();
        let a = Payload::new('a').unwrap();
        arena.occupy(SlotIndex(2), a).unwrap();
        arena.set_next(SlotIndex(2), Link::Null).unwrap();
        arena.set_next(SlotIndex::HEAD, Link::Slot(SlotIndex(2))).unwrap();

        let snap = ArenaSnapshot::capture(&arena, [SlotIndex(2)]);
        let row = snap.get(SlotIndex(2)).unwrap();
        assert!(row.linked);
        assert!(row.occupied);
        assert_eq!(row.data, Some(a));
        assert_eq!(row.raw_next(), -1);
        assert!(!snap.get(SlotIndex(1)).unwrap().linked);
        assert_eq!(snap.get(SlotIndex::HEAD).unwrap().raw_next(), 2);
    }

    #[test]
    fn out_of_range_linked_indices_ignored() {
        let arena = SlotArena::with_capacity(2).unwrap();
        let snap = ArenaSnapshot::capture(&arena, [SlotIndex(40)]);
        assert!(snap.rows().iter().all(|r| !r.linked));
    }
}
