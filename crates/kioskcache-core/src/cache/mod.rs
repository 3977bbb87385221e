//! Versioned cache buckets.
//!
//! A bucket is a named key-value store mapping request identities to
//! stored responses. Bucket names embed a version number; bumping the
//! name invalidates every prior bucket at activation time.
//!
//! Two implementations of the [`CacheStore`] trait are provided:
//!
//! - `MemoryStore`: in-process, used by tests and embedders
//! - `DiskStore`: one directory per bucket, one JSON file per entry

pub mod disk;
pub mod memory;
pub mod store;

pub use disk::DiskStore;
pub use memory::MemoryStore;
pub use store::{CacheStore, StoreError};
