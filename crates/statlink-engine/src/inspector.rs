//! Read-only traversal of the logical chain.
//!
//! [`ChainWalk`] follows `next` links from the head sentinel and yields
//! one [`Element`] per node it reaches. It never trusts the links: every
//! index it visits is recorded, and the walk stops with a diagnostic
//! [`Termination`] as soon as a link repeats, points nowhere, or the
//! walk outgrows the store.
//!
//! # Step bound
//!
//! A walk performs at most `capacity + 1` link follows: one per distinct
//! slot (`capacity`, head included) plus the terminating one. The bound
//! comes from the visited set, not from the shape of the loop: a new index
//! is only accepted while fewer than `capacity` slots have been visited,
//! and an already-visited index ends the walk.

use indexmap::IndexSet;
use smallvec::SmallVec;
use statlink_core::{Link, Payload, SlotIndex, SlotRead};

/// How a walk ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Reached the NULL sentinel: a well-formed, finite chain.
    Terminated,
    /// A link pointed back at a slot already visited (the head included).
    CycleDetected {
        /// The revisited slot.
        at: SlotIndex,
    },
    /// More than `capacity` nodes were visited without NULL or a repeat.
    Overlong,
    /// A link pointed at a slot the store cannot resolve.
    BrokenLink {
        /// Slot holding the bad link.
        from: SlotIndex,
        /// The unresolvable target.
        to: SlotIndex,
    },
}

impl Termination {
    /// Whether the chain ended normally.
    pub fn is_well_formed(&self) -> bool {
        matches!(self, Self::Terminated)
    }
}

/// One node reached by a walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Element {
    /// Slot the node lives in.
    pub index: SlotIndex,
    /// The node's payload. `None` only on a corrupted chain that links a
    /// free slot.
    pub value: Option<Payload>,
}

/// Lazy walk from the head sentinel.
///
/// Created by [`ChainWalk::new`] or
/// [`StaticListSimulator::walk`](crate::StaticListSimulator::walk). After
/// the iterator returns `None`, [`termination`](ChainWalk::termination)
/// tells why. Call [`restart`](ChainWalk::restart) for a fresh walk over
/// the same store.
pub struct ChainWalk<'a, S: SlotRead + ?Sized> {
    source: &'a S,
    visited: IndexSet<SlotIndex>,
    from: SlotIndex,
    cursor: Link,
    steps: usize,
    termination: Option<Termination>,
}

impl<'a, S: SlotRead + ?Sized> ChainWalk<'a, S> {
    /// Start a walk at the head of `source`.
    pub fn new(source: &'a S) -> Self {
        let mut visited = IndexSet::with_capacity(source.capacity().min(64));
        visited.insert(SlotIndex::HEAD);
        let (cursor, termination) = match source.node(SlotIndex::HEAD) {
            Some(head) => (head.next, None),
            None => (
                Link::Null,
                Some(Termination::BrokenLink {
                    from: SlotIndex::HEAD,
                    to: SlotIndex::HEAD,
                }),
            ),
        };
        Self {
            source,
            visited,
            from: SlotIndex::HEAD,
            cursor,
            steps: 0,
            termination,
        }
    }

    /// A fresh walk over the same store.
    pub fn restart(&self) -> Self {
        Self::new(self.source)
    }

    /// Why the walk ended, or `None` while it is still running.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Number of link follows performed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Slots visited so far in chain order, head excluded.
    pub fn path(&self) -> impl Iterator<Item = SlotIndex> + '_ {
        self.visited.iter().skip(1).copied()
    }

    /// Drain the walk into a [`LogicalSequence`].
    pub fn finish(mut self) -> LogicalSequence {
        let elements: SmallVec<[Element; 8]> = self.by_ref().collect();
        LogicalSequence {
            elements,
            termination: self.termination.unwrap_or(Termination::Overlong),
        }
    }

    fn stop(&mut self, termination: Termination) -> Option<Element> {
        match termination {
            Termination::Terminated => {}
            Termination::CycleDetected { at } => {
                tracing::warn!(at = %at, from = %self.from, "cycle detected in chain");
            }
            Termination::Overlong => {
                tracing::warn!(
                    capacity = self.source.capacity(),
                    steps = self.steps,
                    "chain longer than arena capacity"
                );
            }
            Termination::BrokenLink { from, to } => {
                tracing::warn!(from = %from, to = %to, "chain link points outside the arena");
            }
        }
        self.termination = Some(termination);
        None
    }
}

impl<S: SlotRead + ?Sized> Iterator for ChainWalk<'_, S> {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        if self.termination.is_some() {
            return None;
        }
        self.steps += 1;
        debug_assert!(self.steps <= self.source.capacity() + 1);

        let idx = match self.cursor {
            Link::Null => return self.stop(Termination::Terminated),
            Link::Slot(idx) => idx,
        };
        if self.visited.contains(&idx) {
            return self.stop(Termination::CycleDetected { at: idx });
        }
        if self.visited.len() >= self.source.capacity() {
            return self.stop(Termination::Overlong);
        }
        let Some(node) = self.source.node(idx) else {
            return self.stop(Termination::BrokenLink {
                from: self.from,
                to: idx,
            });
        };

        self.visited.insert(idx);
        self.from = idx;
        self.cursor = node.next;
        Some(Element {
            index: idx,
            value: node.data,
        })
    }
}

/// A fully collected walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalSequence {
    elements: SmallVec<[Element; 8]>,
    termination: Termination,
}

impl LogicalSequence {
    /// Walk `source` to the end.
    pub fn collect_from<S: SlotRead + ?Sized>(source: &S) -> Self {
        ChainWalk::new(source).finish()
    }

    /// Elements in chain order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// How the walk ended.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Whether the walk ended at NULL.
    pub fn is_well_formed(&self) -> bool {
        self.termination.is_well_formed()
    }

    /// Number of elements reached.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no element was reached.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Payloads in chain order, skipping empty nodes.
    pub fn values(&self) -> Vec<Payload> {
        self.elements.iter().filter_map(|e| e.value).collect()
    }

    /// Slot indices in chain order.
    pub fn indices(&self) -> Vec<SlotIndex> {
        self.elements.iter().map(|e| e.index).collect()
    }

    /// Payloads concatenated into a string.
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|e| e.value.map(Payload::get))
            .collect()
    }

    /// Iterate over elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a LogicalSequence {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
