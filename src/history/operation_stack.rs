//! Tagged operation record (C4's payload) and the LIFO stack that holds it.
//!
//! The reference design expresses `Operation` as `{kind, song_id,
//! old_position, old_priority}` with unused fields carrying sentinels. The
//! idiomatic Rust translation is a tagged enum with per-variant payload
//! fields instead (no inheritance, no sentinel fields, per spec's own
//! design note), so each variant only carries what reversal actually needs.

use crate::types::{PriorityScore, SongId};

/// A single reversible edit, recorded on the undo stack and echoed to the
/// redo stack when undone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Add { song_id: SongId, position: usize },
    Remove { song_id: SongId, position: usize },
    /// `forward = true` recorded a `skip_next`; its reverse is one step
    /// along `prev`-links (and vice versa). Exact, because the queue's own
    /// links (not a position snapshot) define what "one step back" means.
    Skip { forward: bool },
    MoveUp { song_id: SongId },
    MoveDown { song_id: SongId },
    UpdatePriority { song_id: SongId, old_priority: PriorityScore, new_priority: PriorityScore },
}

/// `Vec`-backed LIFO of [`Operation`] records. Used twice by the manager,
/// once as the undo stack and once as the redo stack, so it carries no
/// knowledge of which role it plays.
#[derive(Debug, Clone, Default)]
pub struct OperationStack {
    entries: Vec<Operation>,
}

impl OperationStack {
    pub fn new() -> Self {
        OperationStack { entries: Vec::new() }
    }

    pub fn push(&mut self, op: Operation) {
        self.entries.push(op);
    }

    pub fn pop(&mut self) -> Option<Operation> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&Operation> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_pop_is_lifo() {
        let mut stack = OperationStack::new();
        stack.push(Operation::Add { song_id: 1, position: 0 });
        stack.push(Operation::Remove { song_id: 2, position: 1 });
        assert_eq!(stack.pop(), Some(Operation::Remove { song_id: 2, position: 1 }));
        assert_eq!(stack.pop(), Some(Operation::Add { song_id: 1, position: 0 }));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn peek_does_not_remove() {
        let mut stack = OperationStack::new();
        stack.push(Operation::Skip { forward: true });
        assert_eq!(stack.peek(), Some(&Operation::Skip { forward: true }));
        assert_eq!(stack.size(), 1);
    }

    #[test]
    fn clear_empties_the_stack() {
        let mut stack = OperationStack::new();
        stack.push(Operation::MoveUp { song_id: 1 });
        stack.push(Operation::MoveDown { song_id: 2 });
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.size(), 0);
    }
}
