//! linkshelf Core Library
//!
//! This crate provides the core functionality for linkshelf, a local
//! bookmark manager: links saved under named categories, persisted as
//! JSON values in a key-value store.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut store = Store::open(config.storage());
//!
//! // Add a bookmark
//! store.add_bookmark("Rust", "https://rust-lang.org", "Work")?;
//!
//! // Delete a category; its bookmarks move to "General"
//! store.remove_category("Work")?;
//! ```
//!
//! # Modules
//!
//! - `store`: The bookmark store (main entry point)
//! - `models`: Bookmark record and category constants
//! - `favicon`: Icon URL resolution and URL checks
//! - `validate`: Input checks run by front ends before mutating
//! - `storage`: Key-value persistence
//! - `config`: Application configuration

pub mod config;
pub mod favicon;
pub mod models;
pub mod storage;
pub mod store;
pub mod validate;

pub use config::Config;
pub use favicon::{is_valid_url, FaviconResolver, GoogleFavicons};
pub use models::{Bookmark, CategoryFilter, DEFAULT_CATEGORIES, FALLBACK_CATEGORY};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};
pub use store::Store;
pub use validate::{validate_new_bookmark, validate_new_category, ValidationError};
