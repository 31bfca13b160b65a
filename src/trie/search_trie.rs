//! 26-ary trie over `[a-z]` realizing the prefix search index (C3).
//!
//! Keys are case-folded and every character outside `[A-Za-z]` is skipped
//! during both insertion and lookup; neither advances the walk nor marks an
//! end. Nodes live in an arena; there is no ownership cycle to manage, so the
//! "destroy" step the reference design calls out explicitly is just the
//! arena's own `Drop`.

use log::trace;

use crate::types::SongId;

const ALPHABET_SIZE: usize = 26;

struct Node {
    children: [Option<usize>; ALPHABET_SIZE],
    terminal: bool,
    /// Song ids attached to this terminal node, most-recently-inserted first
    /// (duplicate (key, id) insertions are preserved, not deduplicated).
    ids: Vec<SongId>,
}

impl Node {
    fn new() -> Self {
        Node { children: [None; ALPHABET_SIZE], terminal: false, ids: Vec::new() }
    }
}

/// Case-folded `[a-z]` prefix trie mapping inserted keys to the list of song
/// ids whose insertion ended exactly at that key.
pub struct SearchTrie {
    arena: Vec<Node>,
}

impl Default for SearchTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTrie {
    pub fn new() -> Self {
        SearchTrie { arena: vec![Node::new()] }
    }

    fn slot(ch: char) -> Option<usize> {
        if ch.is_ascii_alphabetic() {
            Some((ch.to_ascii_lowercase() as u8 - b'a') as usize)
        } else {
            None
        }
    }

    /// Walks/creates the path for `key`'s case-folded, alphabetic-only
    /// characters and prepends `song_id` to the terminal node's list.
    pub fn insert(&mut self, key: &str, song_id: SongId) {
        let mut node_idx = 0usize;
        for ch in key.chars() {
            let Some(slot) = Self::slot(ch) else { continue };
            node_idx = match self.arena[node_idx].children[slot] {
                Some(child) => child,
                None => {
                    let child = self.arena.len();
                    self.arena.push(Node::new());
                    self.arena[node_idx].children[slot] = Some(child);
                    child
                }
            };
        }
        self.arena[node_idx].terminal = true;
        self.arena[node_idx].ids.insert(0, song_id);
        trace!("trie used for insert operation: key={key:?} song_id={song_id}");
    }

    /// Walks the path for `prefix`'s folded, alphabetic-only characters and
    /// returns the terminal list of the final node. Words that merely have
    /// `prefix` as a prefix but end further down the path do not contribute.
    /// Callers wanting "everything under a prefix" must recurse
    /// themselves; this is the pinned, simpler behavior.
    pub fn search_prefix(&self, prefix: &str) -> Vec<SongId> {
        let mut node_idx = 0usize;
        for ch in prefix.chars() {
            let Some(slot) = Self::slot(ch) else { continue };
            match self.arena[node_idx].children[slot] {
                Some(child) => node_idx = child,
                None => return Vec::new(),
            }
        }
        self.arena[node_idx].ids.clone()
    }
}
