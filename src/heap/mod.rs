//! Popularity index module: a fixed-capacity array-backed max-heap.

pub mod popularity_heap;

pub use popularity_heap::PopularityHeap;
