//! Playback queue module: a circular doubly-linked list with a cursor.

pub mod playback_queue;

pub use playback_queue::{PlaybackQueue, QueueEntryId};
