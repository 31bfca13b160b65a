//! In-memory music queue engine: a composite data-structure layer (playback
//! queue, popularity index, prefix search, undo/redo history, and a prefetch
//! buffer) plus the manager that keeps them mutually consistent.
//!
//! The engine owns no I/O, no persistence, no network surface, and no
//! presentation. It is embedded inside a larger application, which is
//! responsible for serializing access to it (see [`manager::Manager`]'s
//! docs) and for everything outside the composite data-structure layer.

pub mod config;
pub mod error;
pub mod heap;
pub mod history;
pub mod manager;
pub mod queue;
pub mod trie;
mod types;
pub mod upcoming;

pub use config::EngineConfig;
pub use error::EngineError;
pub use manager::Manager;
pub use types::{PriorityScore, SongId, NO_CURRENT_SONG};
