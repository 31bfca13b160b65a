//! Primitive types shared across the queue engine's substructures.

/// Catalog-assigned song identifier. Not required to be unique across queue
/// entries; the playback queue may hold duplicate ids.
pub type SongId = i64;

/// Derived popularity score (`2 * likes + play_count`), opaque to the heap.
pub type PriorityScore = f64;

/// Sentinel returned by [`crate::manager::Manager::current_song`] when the
/// queue is empty.
pub const NO_CURRENT_SONG: SongId = -1;
