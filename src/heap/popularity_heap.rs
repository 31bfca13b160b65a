//! Fixed-capacity array-backed binary max-heap realizing the popularity /
//! recommendations index (C2).
//!
//! The heap is an index, not a queue mirror: at most one [`HeapEntry`] exists
//! per distinct song id. A secondary `song_id -> array index` map recovers
//! `O(log n)` updates in place of the linear scan the reference design uses
//! (spec §9's redesign note; the external contract is unchanged).

use std::collections::HashMap;

use log::{debug, trace};

use crate::types::{PriorityScore, SongId};

const SENTINEL_SONG_ID: SongId = -1;
const SENTINEL_PRIORITY: PriorityScore = -1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeapEntry {
    pub song_id: SongId,
    pub priority: PriorityScore,
}

impl HeapEntry {
    fn sentinel() -> Self {
        HeapEntry { song_id: SENTINEL_SONG_ID, priority: SENTINEL_PRIORITY }
    }
}

/// Array-backed binary max-heap over `(song_id, priority)`, capacity-bounded
/// for the lifetime of the heap.
#[derive(Clone)]
pub struct PopularityHeap {
    entries: Vec<HeapEntry>,
    index: HashMap<SongId, usize>,
    capacity: usize,
}

impl PopularityHeap {
    /// Allocates a heap with room for `capacity` distinct song ids.
    /// `capacity` must be greater than zero.
    pub fn create(capacity: usize) -> Result<Self, crate::error::EngineError> {
        if capacity == 0 {
            return Err(crate::error::EngineError::ZeroCapacity);
        }
        Ok(PopularityHeap {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            capacity,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, song_id: SongId) -> bool {
        self.index.contains_key(&song_id)
    }

    /// Current priority for `song_id`, if it's tracked.
    pub fn priority_of(&self, song_id: SongId) -> Option<PriorityScore> {
        self.index.get(&song_id).map(|&idx| self.entries[idx].priority)
    }

    /// Appends at the end and sifts up. Strict `>` comparisons mean ties
    /// don't swap, preserving insertion order (FIFO) among equal priorities.
    pub fn insert(&mut self, song_id: SongId, priority: PriorityScore) -> bool {
        if self.entries.len() >= self.capacity {
            return false;
        }
        let idx = self.entries.len();
        self.entries.push(HeapEntry { song_id, priority });
        self.index.insert(song_id, idx);
        self.sift_up(idx);
        trace!("heap used for recommendations operation: insert(song_id={song_id}, priority={priority})");
        true
    }

    /// Swaps root with the last entry, shrinks, and sifts down. Returns the
    /// sentinel `{-1, -1.0}` when the heap is empty.
    pub fn extract_max(&mut self) -> HeapEntry {
        if self.entries.is_empty() {
            return HeapEntry::sentinel();
        }
        let last = self.entries.len() - 1;
        self.swap(0, last);
        let max = self.entries.pop().expect("heap non-empty");
        self.index.remove(&max.song_id);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        debug!("heap used for recommendations operation: extract_max -> song_id={}", max.song_id);
        max
    }

    /// Same sentinel as `extract_max` on an empty heap.
    pub fn peek(&self) -> HeapEntry {
        self.entries.first().copied().unwrap_or_else(HeapEntry::sentinel)
    }

    /// Linear-search-by-index lookup; if `song_id` is unseen this behaves as
    /// `insert`. If present, assigns `new_priority` and sifts in the
    /// direction implied by the change; equal values are no-ops.
    pub fn update_priority(&mut self, song_id: SongId, new_priority: PriorityScore) -> bool {
        let Some(&idx) = self.index.get(&song_id) else {
            return self.insert(song_id, new_priority);
        };
        let old_priority = self.entries[idx].priority;
        if new_priority == old_priority {
            return true;
        }
        self.entries[idx].priority = new_priority;
        if new_priority > old_priority {
            self.sift_up(idx);
        } else {
            self.sift_down(idx);
        }
        true
    }

    /// Clones the heap and destructively extracts up to `n` entries in
    /// descending priority order, leaving the live index untouched.
    pub fn top_n(&self, n: usize) -> Vec<HeapEntry> {
        let mut clone = self.clone();
        let mut out = Vec::with_capacity(n.min(clone.len()));
        for _ in 0..n {
            if clone.is_empty() {
                break;
            }
            out.push(clone.extract_max());
        }
        out
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.index.insert(self.entries[a].song_id, a);
        self.index.insert(self.entries[b].song_id, b);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = Self::parent(i);
            if self.entries[p].priority >= self.entries[i].priority {
                break;
            }
            self.swap(p, i);
            i = p;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.entries.len();
        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut largest = i;
            if l < len && self.entries[l].priority > self.entries[largest].priority {
                largest = l;
            }
            // Ties go to the left child: only prefer the right child when
            // it is strictly larger than the current best.
            if r < len && self.entries[r].priority > self.entries[largest].priority {
                largest = r;
            }
            if largest == i {
                break;
            }
            self.swap(i, largest);
            i = largest;
        }
    }
}
