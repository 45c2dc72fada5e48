//! Data models for linkshelf
//!
//! Defines the `Bookmark` record and the category constants.
//! Categories are plain strings; the store keeps them as an ordered list.
//!
//! Field names are serialized in camelCase so persisted values keep the
//! layout `[{"id", "title", "url", "category", "favicon", "createdAt"}]`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category that absorbs bookmarks whose category was deleted
pub const FALLBACK_CATEGORY: &str = "General";

/// Categories seeded on first run
pub const DEFAULT_CATEGORIES: [&str; 3] = [FALLBACK_CATEGORY, "Work", "Personal"];

/// The default category sequence as owned strings
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Current time in epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A saved link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// Unique identifier (UUID v4 text)
    pub id: String,
    /// Display title
    pub title: String,
    /// The URL, stored verbatim
    pub url: String,
    /// Category name
    pub category: String,
    /// Icon URL, resolved once from `url` at creation
    pub favicon: String,
    /// Creation time in epoch milliseconds
    pub created_at: i64,
}

impl Bookmark {
    /// Create a bookmark with a fresh id, stamped with the current time
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        category: impl Into<String>,
        favicon: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            url: url.into(),
            category: category.into(),
            favicon: favicon.into(),
            created_at: now_millis(),
        }
    }

    /// Short form of the id for display
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }

    /// Whether this bookmark belongs to the given category
    pub fn is_in(&self, category: &str) -> bool {
        self.category == category
    }
}

/// Category selection for listing and counting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every bookmark
    All,
    /// Bookmarks whose category equals the name exactly
    Named(String),
}

impl CategoryFilter {
    /// Check whether a bookmark passes the filter
    pub fn matches(&self, bookmark: &Bookmark) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => bookmark.is_in(name),
        }
    }
}
