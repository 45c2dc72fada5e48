//! Storage layer
//!
//! Key-value persistence for the bookmark store.
//!
//! ## Architecture
//!
//! - **KeyValueStore**: typed read-with-default / overwrite-on-write contract
//! - **JsonFileStore**: one JSON file per key in the data directory
//! - **MemoryStore**: map-backed store with an optional byte quota

pub mod error;
pub mod memory;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use persistence::{JsonFileStore, KeyValueStore, BOOKMARKS_KEY, CATEGORIES_KEY};
