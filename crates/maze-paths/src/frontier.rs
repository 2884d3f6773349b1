//! The A* open list.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use maze_core::Pos;

use crate::error::SearchError;

/// One queued cell: the priority it was pushed with and its insertion
/// sequence number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontierEntry {
    pub priority: i32,
    pub seq: u64,
    pub pos: Pos,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest
        // (priority, seq) first.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of cells ordered by `(priority, insertion order)`,
/// with an O(1) membership set.
///
/// There is no decrease-key. Callers push a cell only while it is not
/// [`contains`](Self::contains)-ed, so each pending cell has exactly one
/// entry, which keeps the priority it was pushed with. Popping removes the
/// cell from the membership set.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    members: HashSet<Pos>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `pos` with `priority` and return the sequence number assigned.
    pub fn push(&mut self, priority: i32, pos: Pos) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry { priority, seq, pos });
        self.members.insert(pos);
        seq
    }

    /// Remove and return the entry with the smallest `(priority, seq)`.
    pub fn pop_min(&mut self) -> Result<FrontierEntry, SearchError> {
        let entry = self.heap.pop().ok_or(SearchError::PopOnEmptyFrontier)?;
        self.members.remove(&entry.pos);
        Ok(entry)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `pos` is currently pending.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.members.contains(&pos)
    }

    /// Drop every entry and restart sequence numbers at 0.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.members.clear();
        self.next_seq = 0;
    }
}
