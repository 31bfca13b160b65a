//! Circular doubly-linked list realizing the playback queue (C1).
//!
//! Nodes live in an arena (`Vec<Option<Node>>`) addressed by index; the ring's
//! `next`/`prev` links are purely navigational, never owning. The arena is
//! the sole owner of every node, so there is no cyclic ownership to reason
//! about, just cyclic navigation.

use log::{debug, trace};

use crate::types::SongId;

/// Stable handle to a queue entry. Valid until the entry is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueEntryId(usize);

struct Node {
    song_id: SongId,
    prev: usize,
    next: usize,
}

/// Circular doubly-linked list with a `head`, `tail`, and `current` cursor.
pub struct PlaybackQueue {
    arena: Vec<Option<Node>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    current: Option<usize>,
    size: usize,
}

impl Default for PlaybackQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackQueue {
    /// Creates an empty playback queue.
    pub fn new() -> Self {
        PlaybackQueue {
            arena: Vec::new(),
            free_list: Vec::new(),
            head: None,
            tail: None,
            current: None,
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn current(&self) -> Option<QueueEntryId> {
        self.current.map(QueueEntryId)
    }

    pub fn current_song(&self) -> Option<SongId> {
        self.current.map(|idx| self.node(idx).song_id)
    }

    fn node(&self, idx: usize) -> &Node {
        self.arena[idx].as_ref().expect("queue arena slot must be occupied")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node {
        self.arena[idx].as_mut().expect("queue arena slot must be occupied")
    }

    fn alloc(&mut self, song_id: SongId) -> usize {
        let node = Node { song_id, prev: 0, next: 0 };
        if let Some(reused) = self.free_list.pop() {
            self.arena[reused] = Some(node);
            reused
        } else {
            self.arena.push(Some(node));
            self.arena.len() - 1
        }
    }

    /// Appends a new entry after `tail`. Always succeeds.
    pub fn insert_end(&mut self, song_id: SongId) -> QueueEntryId {
        let idx = self.alloc(song_id);
        match (self.head, self.tail) {
            (None, None) => {
                self.node_mut(idx).prev = idx;
                self.node_mut(idx).next = idx;
                self.head = Some(idx);
                self.tail = Some(idx);
                self.current = Some(idx);
            }
            (Some(head_idx), Some(tail_idx)) => {
                self.node_mut(idx).prev = tail_idx;
                self.node_mut(idx).next = head_idx;
                self.node_mut(tail_idx).next = idx;
                self.node_mut(head_idx).prev = idx;
                self.tail = Some(idx);
            }
            _ => unreachable!("head and tail are always both set or both unset"),
        }
        self.size += 1;
        trace!("CDLL used for queue operation: insert_end(song_id={song_id})");
        QueueEntryId(idx)
    }

    /// Unlinks `entry_ref`. Returns `false` only when the handle is stale
    /// (already removed or never valid).
    pub fn remove(&mut self, entry_ref: QueueEntryId) -> bool {
        let idx = entry_ref.0;
        if idx >= self.arena.len() || self.arena[idx].is_none() {
            return false;
        }

        let (prev_idx, next_idx) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };

        if self.size == 1 {
            self.head = None;
            self.tail = None;
            self.current = None;
        } else {
            self.node_mut(prev_idx).next = next_idx;
            self.node_mut(next_idx).prev = prev_idx;
            if self.head == Some(idx) {
                self.head = Some(next_idx);
            }
            if self.tail == Some(idx) {
                self.tail = Some(prev_idx);
            }
            if self.current == Some(idx) {
                self.current = Some(next_idx);
            }
        }

        self.arena[idx] = None;
        self.free_list.push(idx);
        self.size -= 1;
        debug!("CDLL used for queue operation: remove(idx={idx})");
        true
    }

    /// Swaps `entry_ref` with its predecessor by re-linking. No-op when the
    /// queue has fewer than two entries.
    pub fn move_up(&mut self, entry_ref: QueueEntryId) {
        if self.size < 2 {
            return;
        }
        let b = entry_ref.0;
        let a = self.node(b).prev;
        if a == b {
            return;
        }

        if self.size == 2 {
            self.node_mut(a).prev = b;
            self.node_mut(a).next = b;
            self.node_mut(b).prev = a;
            self.node_mut(b).next = a;
        } else {
            let before_a = self.node(a).prev;
            let after_b = self.node(b).next;
            self.node_mut(before_a).next = b;
            self.node_mut(b).prev = before_a;
            self.node_mut(b).next = a;
            self.node_mut(a).prev = b;
            self.node_mut(a).next = after_b;
            self.node_mut(after_b).prev = a;
        }

        if self.head == Some(a) {
            self.head = Some(b);
        }
        if self.tail == Some(b) {
            self.tail = Some(a);
        }
        trace!("CDLL used for queue operation: move_up");
    }

    /// Defined as `move_up(entry.next)` (moving the tail "down" wraps it
    /// before the head, by design).
    pub fn move_down(&mut self, entry_ref: QueueEntryId) {
        if self.size < 2 {
            return;
        }
        let next = self.get_next(entry_ref);
        self.move_up(next);
    }

    /// Advances (`forward = true`) or retreats both `head` and `tail` by one
    /// link. The ring itself is unchanged; only the window onto it shifts.
    pub fn rotate(&mut self, forward: bool) {
        if self.size < 2 {
            return;
        }
        let (Some(head_idx), Some(tail_idx)) = (self.head, self.tail) else {
            return;
        };
        if forward {
            self.head = Some(self.node(head_idx).next);
            self.tail = Some(self.node(tail_idx).next);
        } else {
            self.head = Some(self.node(head_idx).prev);
            self.tail = Some(self.node(tail_idx).prev);
        }
    }

    /// Returns the circular successor of `entry_ref`; stable even for a
    /// singleton ring (returns itself).
    pub fn get_next(&self, entry_ref: QueueEntryId) -> QueueEntryId {
        QueueEntryId(self.node(entry_ref.0).next)
    }

    /// Returns the circular predecessor of `entry_ref`.
    pub fn get_prev(&self, entry_ref: QueueEntryId) -> QueueEntryId {
        QueueEntryId(self.node(entry_ref.0).prev)
    }

    /// Moves `current` one link forward, wrapping at the tail.
    pub fn skip_next(&mut self) -> Option<SongId> {
        let idx = self.current?;
        let next = self.node(idx).next;
        self.current = Some(next);
        Some(self.node(next).song_id)
    }

    /// Moves `current` one link backward, wrapping at the head.
    pub fn skip_prev(&mut self) -> Option<SongId> {
        let idx = self.current?;
        let prev = self.node(idx).prev;
        self.current = Some(prev);
        Some(self.node(prev).song_id)
    }

    /// Linear scan from `head`; returns the first matching entry in
    /// traversal order. Duplicates are not disambiguated.
    pub fn find_by_id(&self, song_id: SongId) -> Option<QueueEntryId> {
        let head_idx = self.head?;
        let mut idx = head_idx;
        for _ in 0..self.size {
            if self.node(idx).song_id == song_id {
                return Some(QueueEntryId(idx));
            }
            idx = self.node(idx).next;
        }
        None
    }

    /// Zero-based traversal position of `entry_ref` from `head`, or `None`
    /// if the handle is not currently linked into the ring.
    pub fn position_of(&self, entry_ref: QueueEntryId) -> Option<usize> {
        let head_idx = self.head?;
        let mut idx = head_idx;
        for position in 0..self.size {
            if idx == entry_ref.0 {
                return Some(position);
            }
            idx = self.node(idx).next;
        }
        None
    }

    /// Iterates exactly `size` times starting at `head`; never relies on a
    /// null terminator.
    pub fn iter(&self) -> PlaybackQueueIter<'_> {
        PlaybackQueueIter { queue: self, next_idx: self.head, remaining: self.size }
    }

    /// Ordered snapshot of song ids starting at `head`.
    pub fn snapshot(&self) -> Vec<SongId> {
        self.iter().collect()
    }
}

pub struct PlaybackQueueIter<'a> {
    queue: &'a PlaybackQueue,
    next_idx: Option<usize>,
    remaining: usize,
}

impl Iterator for PlaybackQueueIter<'_> {
    type Item = SongId;

    fn next(&mut self) -> Option<SongId> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.next_idx?;
        self.remaining -= 1;
        let node = self.queue.node(idx);
        self.next_idx = Some(node.next);
        Some(node.song_id)
    }
}
