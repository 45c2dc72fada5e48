//! Command handlers

use linkshelf_core::{JsonFileStore, Store};

pub mod bookmark;
pub mod category;
pub mod config;
pub mod status;

/// The store as used by the CLI
pub type Shelf = Store<JsonFileStore>;
