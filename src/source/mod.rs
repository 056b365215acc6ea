//! Record sources, the record cache and the repository tying them together.

pub mod cache;
pub mod client;
pub mod repository;

// Re-export main types
pub use cache::{CacheEntry, CachePolicy, FileCache, MemoryCache, RecordCache};
pub use client::{source_for, FileSource, HttpSource, RecordSource};
pub use repository::{LoadOrigin, RecordRepository};
