//! Public facade (C6): composes the queue, popularity index, search tries,
//! undo/redo history, and upcoming buffer, and is the sole permissible
//! mutator of any of them.
//!
//! Every public mutator is total: failures are reported as `false`/sentinel
//! returns, never panics, and leave the engine exactly as it was before the
//! call (spec §7). The engine assumes exclusive access across the span of
//! any single call. Serializing concurrent callers is an embedder's job,
//! not this crate's (spec §5).

use log::{info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::heap::PopularityHeap;
use crate::history::{Operation, OperationStack};
use crate::queue::PlaybackQueue;
use crate::trie::SearchTrie;
use crate::types::{PriorityScore, SongId, NO_CURRENT_SONG};
use crate::upcoming::UpcomingBuffer;

/// Coordinates the queue, popularity index, search tries, and edit history
/// for one embedded playback session.
pub struct Manager {
    queue: PlaybackQueue,
    heap: PopularityHeap,
    title_trie: SearchTrie,
    artist_trie: SearchTrie,
    undo_stack: OperationStack,
    redo_stack: OperationStack,
    upcoming: UpcomingBuffer,
}

fn priority_for(likes: i64, play_count: i64) -> PriorityScore {
    2.0 * likes as PriorityScore + play_count as PriorityScore
}

impl Manager {
    /// Creates a manager with a popularity index sized for `heap_capacity`
    /// distinct song ids. Fails only if `heap_capacity` is zero.
    pub fn create(heap_capacity: usize) -> Result<Self, EngineError> {
        Ok(Manager {
            queue: PlaybackQueue::new(),
            heap: PopularityHeap::create(heap_capacity)?,
            title_trie: SearchTrie::new(),
            artist_trie: SearchTrie::new(),
            undo_stack: OperationStack::new(),
            redo_stack: OperationStack::new(),
            upcoming: UpcomingBuffer::new(),
        })
    }

    /// Convenience constructor using [`EngineConfig::default`]'s heap
    /// capacity.
    pub fn new() -> Self {
        Self::create(EngineConfig::default().heap_capacity)
            .expect("default heap capacity is non-zero")
    }

    /// Builds a manager from a caller-supplied [`EngineConfig`].
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        Self::create(config.heap_capacity)
    }

    fn record(&mut self, op: Operation) {
        self.undo_stack.push(op);
        self.redo_stack.clear();
    }

    // ---- mutators -------------------------------------------------------

    /// Appends `song_id` to the queue, indexes `title`/`artist` for prefix
    /// search, and folds `likes`/`play_count` into the popularity index.
    /// Always succeeds for pre-validated primitive inputs.
    pub fn add_song(
        &mut self,
        song_id: SongId,
        title: &str,
        artist: &str,
        likes: i64,
        play_count: i64,
    ) -> bool {
        let entry = self.queue.insert_end(song_id);
        let position = self.queue.position_of(entry).unwrap_or(0);

        self.title_trie.insert(title, song_id);
        self.artist_trie.insert(artist, song_id);

        let priority = priority_for(likes, play_count);
        self.heap.update_priority(song_id, priority);

        self.record(Operation::Add { song_id, position });
        info!("manager add_song: song_id={song_id} position={position} priority={priority}");
        true
    }

    /// Removes the first queue occurrence of `song_id`. The popularity index
    /// and search tries are left untouched; they're historical, not a
    /// mirror of the queue's current contents.
    pub fn remove_song(&mut self, song_id: SongId) -> bool {
        let Some(entry) = self.queue.find_by_id(song_id) else {
            warn!("manager remove_song: song_id={song_id} not found");
            return false;
        };
        let position = self.queue.position_of(entry).unwrap_or(0);
        self.queue.remove(entry);
        self.record(Operation::Remove { song_id, position });
        info!("manager remove_song: song_id={song_id} position={position}");
        true
    }

    /// Advances `current` one link forward. Fails only on an empty queue.
    pub fn skip_next(&mut self) -> bool {
        if self.queue.skip_next().is_none() {
            warn!("manager skip_next: queue is empty");
            return false;
        }
        self.record(Operation::Skip { forward: true });
        true
    }

    /// Retreats `current` one link backward. Fails only on an empty queue.
    pub fn skip_prev(&mut self) -> bool {
        if self.queue.skip_prev().is_none() {
            warn!("manager skip_prev: queue is empty");
            return false;
        }
        self.record(Operation::Skip { forward: false });
        true
    }

    /// Swaps the entry holding `song_id` with its predecessor. No-op (but
    /// still reports success) when the queue has fewer than two entries,
    /// since no reversible change occurred.
    pub fn move_up(&mut self, song_id: SongId) -> bool {
        let Some(entry) = self.queue.find_by_id(song_id) else {
            warn!("manager move_up: song_id={song_id} not found");
            return false;
        };
        if self.queue.len() >= 2 {
            self.queue.move_up(entry);
            self.record(Operation::MoveUp { song_id });
        }
        true
    }

    /// Swaps the entry holding `song_id` with its successor (`move_up` on
    /// the next link, per the circular "move down wraps before head"
    /// semantics).
    pub fn move_down(&mut self, song_id: SongId) -> bool {
        let Some(entry) = self.queue.find_by_id(song_id) else {
            warn!("manager move_down: song_id={song_id} not found");
            return false;
        };
        if self.queue.len() >= 2 {
            self.queue.move_down(entry);
            self.record(Operation::MoveDown { song_id });
        }
        true
    }

    /// Shifts the queue's `head`/`tail` window by one link without
    /// recording undo history (not reversible by design).
    pub fn rotate_queue(&mut self, forward: bool) -> bool {
        self.queue.rotate(forward);
        true
    }

    /// Recomputes `2 * likes + play_count` and folds it into the popularity
    /// index, recording the prior priority for undo.
    pub fn update_priority(&mut self, song_id: SongId, likes: i64, play_count: i64) -> bool {
        let old_priority = self.heap.priority_of(song_id).unwrap_or(0.0);
        let new_priority = priority_for(likes, play_count);
        if !self.heap.update_priority(song_id, new_priority) {
            warn!("manager update_priority: song_id={song_id} heap at capacity");
            return false;
        }
        self.record(Operation::UpdatePriority { song_id, old_priority, new_priority });
        true
    }

    /// Pops the top of the undo stack, echoes it to the redo stack, and
    /// applies its reverse. `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.undo_stack.pop() else {
            return false;
        };
        match op {
            Operation::Add { song_id, .. } => {
                // remove_song records its own Remove and clears redo; both
                // are spurious here, so discard the nested record before we
                // echo the original Add to redo below.
                self.remove_song(song_id);
                self.undo_stack.pop();
            }
            Operation::Remove { song_id, .. } => {
                self.queue.insert_end(song_id);
            }
            Operation::Skip { forward } => {
                if forward {
                    self.queue.skip_prev();
                } else {
                    self.queue.skip_next();
                }
            }
            Operation::MoveUp { song_id } => {
                if let Some(entry) = self.queue.find_by_id(song_id) {
                    self.queue.move_down(entry);
                }
            }
            Operation::MoveDown { song_id } => {
                if let Some(entry) = self.queue.find_by_id(song_id) {
                    self.queue.move_up(entry);
                }
            }
            Operation::UpdatePriority { song_id, old_priority, .. } => {
                self.heap.update_priority(song_id, old_priority);
            }
        }
        self.redo_stack.push(op);
        true
    }

    /// Pops the top of the redo stack and re-applies it, without recording
    /// a new undo entry for the re-application's own side effects. `false`
    /// when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(op) = self.redo_stack.pop() else {
            return false;
        };
        match op {
            Operation::Add { song_id, .. } => {
                self.queue.insert_end(song_id);
            }
            Operation::Remove { song_id, .. } => {
                if let Some(entry) = self.queue.find_by_id(song_id) {
                    self.queue.remove(entry);
                }
            }
            Operation::Skip { forward } => {
                if forward {
                    self.queue.skip_next();
                } else {
                    self.queue.skip_prev();
                }
            }
            Operation::MoveUp { song_id } => {
                if let Some(entry) = self.queue.find_by_id(song_id) {
                    self.queue.move_up(entry);
                }
            }
            Operation::MoveDown { song_id } => {
                if let Some(entry) = self.queue.find_by_id(song_id) {
                    self.queue.move_down(entry);
                }
            }
            Operation::UpdatePriority { song_id, new_priority, .. } => {
                self.heap.update_priority(song_id, new_priority);
            }
        }
        self.undo_stack.push(op);
        true
    }

    // ---- accessors --------------------------------------------------

    pub fn current_song(&self) -> SongId {
        self.queue.current_song().unwrap_or(NO_CURRENT_SONG)
    }

    pub fn queue_size(&self) -> usize {
        self.queue.len()
    }

    /// Ordered song ids starting at `head`.
    pub fn queue_snapshot(&self) -> Vec<SongId> {
        self.queue.snapshot()
    }

    /// Up to `limit` song ids in non-increasing priority order. Clones the
    /// heap internally so the live index is never mutated by a read.
    pub fn recommendations(&self, limit: usize) -> Vec<SongId> {
        self.heap.top_n(limit).into_iter().map(|entry| entry.song_id).collect()
    }

    pub fn search_songs(&self, prefix: &str) -> Vec<SongId> {
        self.title_trie.search_prefix(prefix)
    }

    pub fn search_artists(&self, prefix: &str) -> Vec<SongId> {
        self.artist_trie.search_prefix(prefix)
    }

    /// Number of entries available to `undo()`.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.size()
    }

    /// Number of entries available to `redo()`.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.size()
    }

    pub fn enqueue_upcoming(&mut self, song_id: SongId) {
        self.upcoming.enqueue(song_id);
    }

    pub fn dequeue_upcoming(&mut self) -> Option<SongId> {
        self.upcoming.dequeue()
    }

    pub fn peek_upcoming(&self) -> Option<SongId> {
        self.upcoming.peek()
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_empty_add_current() {
        let mut m = Manager::create(16).unwrap();
        m.add_song(1, "Alpha", "AX", 0, 0);
        assert_eq!(m.current_song(), 1);
        assert_eq!(m.queue_size(), 1);
    }

    #[test]
    fn scenario_circularity() {
        let mut m = Manager::create(16).unwrap();
        m.add_song(1, "Alpha", "AX", 0, 0);
        m.add_song(2, "Beta", "BX", 0, 0);
        m.add_song(3, "Gamma", "GX", 0, 0);

        let start = m.current_song();
        for _ in 0..3 {
            m.skip_next();
        }
        assert_eq!(m.current_song(), start);
        assert_eq!(m.queue_snapshot(), vec![1, 2, 3]);
    }

    #[test]
    fn scenario_undo_add_then_redo() {
        let mut m = Manager::create(16).unwrap();
        m.add_song(1, "Alpha", "AX", 0, 0);
        m.add_song(2, "Beta", "BX", 0, 0);
        m.add_song(3, "Gamma", "GX", 0, 0);

        assert!(m.undo());
        assert_eq!(m.queue_snapshot(), vec![1, 2]);
        assert_eq!(m.queue_size(), 2);

        assert!(m.redo());
        assert_eq!(m.queue_snapshot(), vec![1, 2, 3]);
    }

    #[test]
    fn scenario_move_sequence() {
        let mut m = Manager::create(16).unwrap();
        m.add_song(1, "A", "AX", 0, 0);
        m.add_song(2, "B", "BX", 0, 0);
        m.add_song(3, "C", "CX", 0, 0);

        m.move_up(3);
        assert_eq!(m.queue_snapshot(), vec![1, 3, 2]);

        m.move_up(3);
        assert_eq!(m.queue_snapshot(), vec![3, 1, 2]);

        m.move_down(3);
        assert_eq!(m.queue_snapshot(), vec![1, 3, 2]);
    }

    #[test]
    fn scenario_heap_ordering() {
        let mut m = Manager::create(16).unwrap();
        m.update_priority(10, 3, 4); // 10
        m.update_priority(11, 1, 2); // 4
        m.update_priority(12, 10, 0); // 20
        assert_eq!(m.recommendations(3), vec![12, 10, 11]);
    }

    #[test]
    fn scenario_search_fold() {
        let mut m = Manager::create(16).unwrap();
        m.add_song(7, "Señorita", "Shawn", 0, 0);
        assert!(!m.search_songs("se").contains(&7));
        assert!(m.search_songs("seo").contains(&7));
    }

    #[test]
    fn property_move_up_then_move_down_restores_order() {
        let mut m = Manager::create(16).unwrap();
        m.add_song(1, "A", "AX", 0, 0);
        m.add_song(2, "B", "BX", 0, 0);
        m.add_song(3, "C", "CX", 0, 0);
        let before = m.queue_snapshot();

        m.move_up(3);
        m.move_down(3);
        assert_eq!(m.queue_snapshot(), before);
    }

    #[test]
    fn property_recommendations_do_not_mutate_live_heap() {
        let mut m = Manager::create(16).unwrap();
        m.update_priority(1, 1, 1);
        m.update_priority(2, 2, 2);
        let _ = m.recommendations(usize::MAX);
        let _ = m.recommendations(usize::MAX);
        assert_eq!(m.recommendations(usize::MAX).len(), 2);
    }

    #[test]
    fn remove_song_does_not_touch_trie_or_heap() {
        let mut m = Manager::create(16).unwrap();
        m.add_song(1, "Alpha", "AX", 5, 5);
        m.remove_song(1);
        assert_eq!(m.search_songs("alpha"), vec![1]);
        assert_eq!(m.recommendations(1), vec![1]);
    }

    #[test]
    fn undo_remove_reappends_at_tail() {
        let mut m = Manager::create(16).unwrap();
        m.add_song(1, "A", "AX", 0, 0);
        m.add_song(2, "B", "BX", 0, 0);
        m.remove_song(1);
        assert_eq!(m.queue_snapshot(), vec![2]);
        m.undo();
        assert_eq!(m.queue_snapshot(), vec![2, 1]);
    }

    #[test]
    fn undo_skip_reverses_direction_exactly() {
        let mut m = Manager::create(16).unwrap();
        m.add_song(1, "A", "AX", 0, 0);
        m.add_song(2, "B", "BX", 0, 0);
        let start = m.current_song();
        m.skip_next();
        assert_ne!(m.current_song(), start);
        m.undo();
        assert_eq!(m.current_song(), start);
    }

    #[test]
    fn undo_update_priority_restores_old_value() {
        let mut m = Manager::create(16).unwrap();
        m.update_priority(1, 0, 5); // priority 5
        m.update_priority(1, 10, 0); // priority 20
        m.undo(); // back to priority 5
        m.update_priority(2, 3, 0); // priority 6, now ahead of the restored 5
        assert_eq!(m.recommendations(2), vec![2, 1]);
    }

    #[test]
    fn redo_update_priority_restores_new_value() {
        let mut m = Manager::create(16).unwrap();
        m.update_priority(1, 0, 5); // priority 5
        m.update_priority(1, 10, 0); // priority 20
        m.undo();
        m.redo(); // priority 20 again
        m.update_priority(2, 3, 0); // priority 6, behind the redone 20
        assert_eq!(m.recommendations(2), vec![1, 2]);
    }

    #[test]
    fn undo_on_empty_history_returns_false() {
        let mut m = Manager::create(16).unwrap();
        assert!(!m.undo());
        assert!(!m.redo());
    }

    #[test]
    fn new_recording_clears_redo_stack() {
        let mut m = Manager::create(16).unwrap();
        m.add_song(1, "A", "AX", 0, 0);
        m.undo();
        assert_eq!(m.redo_depth(), 1);
        m.add_song(2, "B", "BX", 0, 0);
        assert_eq!(m.redo_depth(), 0);
    }

    #[test]
    fn rotate_is_not_recorded_for_undo() {
        let mut m = Manager::create(16).unwrap();
        m.add_song(1, "A", "AX", 0, 0);
        m.add_song(2, "B", "BX", 0, 0);
        let depth_before = m.undo_depth();
        m.rotate_queue(true);
        assert_eq!(m.undo_depth(), depth_before);
    }

    #[test]
    fn upcoming_buffer_is_independent_of_queue() {
        let mut m = Manager::create(16).unwrap();
        m.enqueue_upcoming(42);
        assert_eq!(m.queue_size(), 0);
        assert_eq!(m.peek_upcoming(), Some(42));
        assert_eq!(m.dequeue_upcoming(), Some(42));
    }

    #[test]
    fn zero_capacity_create_fails() {
        assert!(Manager::create(0).is_err());
    }

    #[test]
    fn current_song_sentinel_on_empty_queue() {
        let m = Manager::create(16).unwrap();
        assert_eq!(m.current_song(), NO_CURRENT_SONG);
    }

    /// I1 (circularity): the snapshot always has exactly `queue_size` ids.
    /// I2 (current reachability): `current_song` is the sentinel iff the
    /// queue is empty, otherwise it names an id present in the snapshot.
    fn assert_queue_invariants(m: &Manager) {
        let snapshot = m.queue_snapshot();
        assert_eq!(snapshot.len(), m.queue_size());
        if snapshot.is_empty() {
            assert_eq!(m.current_song(), NO_CURRENT_SONG);
        } else {
            assert!(snapshot.contains(&m.current_song()));
        }
    }

    #[test]
    fn invariants_hold_across_an_interleaved_call_sequence() {
        let mut m = Manager::create(16).unwrap();
        assert_queue_invariants(&m);

        m.add_song(1, "Alpha", "AX", 1, 1);
        assert_queue_invariants(&m);
        m.add_song(2, "Beta", "BX", 2, 0);
        assert_queue_invariants(&m);
        m.add_song(3, "Gamma", "GX", 0, 3);
        assert_queue_invariants(&m);

        m.skip_next();
        assert_queue_invariants(&m);
        m.move_up(3);
        assert_queue_invariants(&m);
        m.move_down(3);
        assert_queue_invariants(&m);

        // I6: undo echoes to redo, and the very next mutator clears it again.
        assert_eq!(m.redo_depth(), 0);
        assert!(m.undo());
        assert_queue_invariants(&m);
        assert_eq!(m.redo_depth(), 1);

        m.remove_song(2);
        assert_queue_invariants(&m);
        assert_eq!(m.redo_depth(), 0, "remove_song is a new recording, so it must clear redo");

        assert!(m.undo());
        assert_queue_invariants(&m);
        assert!(m.undo());
        assert_queue_invariants(&m);

        assert!(m.redo());
        assert_queue_invariants(&m);
        assert!(m.redo());
        assert_queue_invariants(&m);

        m.skip_prev();
        assert_queue_invariants(&m);
        m.update_priority(1, 5, 5);
        assert_queue_invariants(&m);

        while m.undo() {
            assert_queue_invariants(&m);
        }
        assert_eq!(m.queue_size(), 0);
        assert_queue_invariants(&m);
    }
}
