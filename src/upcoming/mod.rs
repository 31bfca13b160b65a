//! Prefetch hint channel: a plain FIFO of song ids, independent of queue
//! semantics.

pub mod upcoming_buffer;

pub use upcoming_buffer::UpcomingBuffer;
