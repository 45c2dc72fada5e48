//! Bookmark store
//!
//! The `Store` owns the bookmark list and the category list. Every read goes
//! through its accessors and every change goes through its mutation methods,
//! which write the affected lists back to the key-value storage before
//! returning.
//!
//! ## Persistence
//!
//! Both lists are loaded once in `Store::open`, falling back to an empty
//! bookmark list and the seed categories. A mutation is applied in memory
//! first; if the write then fails, the error is returned and the in-memory
//! state stays as the latest truth. The next successful write of the same
//! key persists it.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open(JsonFileStore::new(config.data_dir.clone()));
//!
//! store.add_bookmark("Rust", "https://rust-lang.org", "Work")?;
//! store.remove_category("Work")?;   // bookmark moves to "General"
//!
//! for bookmark in store.list_bookmarks() { ... }
//! ```

use tracing::{debug, info, warn};

use crate::favicon::{FaviconResolver, GoogleFavicons};
use crate::models::{default_categories, Bookmark, CategoryFilter, FALLBACK_CATEGORY};
use crate::storage::{KeyValueStore, StorageResult, BOOKMARKS_KEY, CATEGORIES_KEY};

pub struct Store<S: KeyValueStore> {
    /// Newest first
    bookmarks: Vec<Bookmark>,
    /// Insertion order, unique names
    categories: Vec<String>,
    storage: S,
    resolver: Box<dyn FaviconResolver>,
}

impl<S: KeyValueStore> Store<S> {
    /// Load state from `storage`, seeding defaults for missing keys
    pub fn open(storage: S) -> Self {
        Self::with_resolver(storage, Box::new(GoogleFavicons))
    }

    /// Same as `open`, with a custom favicon resolver
    pub fn with_resolver(storage: S, resolver: Box<dyn FaviconResolver>) -> Self {
        let bookmarks: Vec<Bookmark> = storage.read(BOOKMARKS_KEY, Vec::new());
        let categories: Vec<String> = storage.read(CATEGORIES_KEY, default_categories());

        debug!(
            "Loaded {} bookmarks and {} categories",
            bookmarks.len(),
            categories.len()
        );

        Self {
            bookmarks,
            categories,
            storage,
            resolver,
        }
    }

    /// Get the underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ==================== Queries ====================

    /// All bookmarks, newest first
    pub fn list_bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// All category names, in the order they were added
    pub fn list_categories(&self) -> &[String] {
        &self.categories
    }

    /// Get a bookmark by exact id
    pub fn get_bookmark(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    /// Bookmarks whose id starts with `prefix`
    pub fn find_by_id_prefix(&self, prefix: &str) -> Vec<&Bookmark> {
        self.bookmarks
            .iter()
            .filter(|b| b.id.starts_with(prefix))
            .collect()
    }

    /// Bookmarks passing `filter`, newest first
    pub fn bookmarks_in(&self, filter: &CategoryFilter) -> Vec<&Bookmark> {
        self.bookmarks.iter().filter(|b| filter.matches(b)).collect()
    }

    /// Number of bookmarks passing `filter`
    pub fn category_count(&self, filter: &CategoryFilter) -> usize {
        self.bookmarks.iter().filter(|b| filter.matches(b)).count()
    }

    /// Each category with its bookmark count, in category order
    ///
    /// Categories used by bookmarks but missing from the list (such as
    /// "General" after it was deleted) follow in order of first appearance,
    /// so the counts always add up to the number of bookmarks.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = self
            .categories
            .iter()
            .map(|name| (name.clone(), 0))
            .collect();

        for bookmark in &self.bookmarks {
            match counts.iter().position(|(name, _)| *name == bookmark.category) {
                Some(i) => counts[i].1 += 1,
                None => counts.push((bookmark.category.clone(), 1)),
            }
        }

        counts
    }

    /// Whether `name` may be assigned to a bookmark
    ///
    /// The fallback category always counts as present.
    pub fn has_category(&self, name: &str) -> bool {
        name == FALLBACK_CATEGORY || self.categories.iter().any(|c| c == name)
    }

    // ==================== Bookmark Operations ====================

    /// Save a new bookmark at the front of the list
    ///
    /// Inputs are stored as given; callers validate them beforehand.
    pub fn add_bookmark(
        &mut self,
        title: &str,
        url: &str,
        category: &str,
    ) -> StorageResult<Bookmark> {
        let favicon = self.resolver.resolve(url);
        let bookmark = Bookmark::new(title, url, category, favicon);

        info!("Adding bookmark {} in '{}'", bookmark.id, bookmark.category);
        self.bookmarks.insert(0, bookmark.clone());
        self.persist_bookmarks()?;

        Ok(bookmark)
    }

    /// Remove the bookmark with `id`
    ///
    /// Returns whether one was removed. Unknown ids are not an error.
    pub fn remove_bookmark(&mut self, id: &str) -> StorageResult<bool> {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id != id);
        let removed = self.bookmarks.len() != before;

        if removed {
            info!("Removed bookmark {}", id);
        } else {
            debug!("No bookmark with id {}", id);
        }
        self.persist_bookmarks()?;

        Ok(removed)
    }

    // ==================== Category Operations ====================

    /// Append a category unless one with the same name exists
    ///
    /// Returns whether it was added.
    pub fn add_category(&mut self, name: &str) -> StorageResult<bool> {
        let added = !self.categories.iter().any(|c| c == name);
        if added {
            info!("Adding category '{}'", name);
            self.categories.push(name.to_string());
        } else {
            debug!("Category '{}' already exists", name);
        }
        self.persist_categories()?;

        Ok(added)
    }

    /// Delete a category, moving its bookmarks to the fallback category
    ///
    /// Returns how many bookmarks were moved.
    pub fn remove_category(&mut self, name: &str) -> StorageResult<usize> {
        let mut moved = 0;
        for bookmark in self.bookmarks.iter_mut().filter(|b| b.is_in(name)) {
            bookmark.category = FALLBACK_CATEGORY.to_string();
            moved += 1;
        }
        self.categories.retain(|c| c != name);

        info!(
            "Removed category '{}', {} bookmark(s) moved to {}",
            name, moved, FALLBACK_CATEGORY
        );

        // Bookmarks first: a stored category list must never drop a name
        // that stored bookmarks still use
        self.persist_bookmarks()?;
        self.persist_categories()?;

        Ok(moved)
    }

    // ==================== Persistence ====================

    fn persist_bookmarks(&mut self) -> StorageResult<()> {
        self.storage
            .write(BOOKMARKS_KEY, &self.bookmarks)
            .map_err(|e| {
                warn!("Failed to persist bookmarks: {}", e);
                e
            })
    }

    fn persist_categories(&mut self) -> StorageResult<()> {
        self.storage
            .write(CATEGORIES_KEY, &self.categories)
            .map_err(|e| {
                warn!("Failed to persist categories: {}", e);
                e
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favicon::fallback_favicon;
    use crate::models::now_millis;
    use crate::storage::{JsonFileStore, MemoryStore, StorageError};
    use tempfile::TempDir;

    fn new_store() -> Store<MemoryStore> {
        Store::open(MemoryStore::new())
    }

    #[test]
    fn test_open_seeds_defaults() {
        let store = new_store();
        assert!(store.list_bookmarks().is_empty());
        assert_eq!(store.list_categories(), ["General", "Work", "Personal"]);
    }

    #[test]
    fn test_add_bookmark_prepends() {
        let mut store = new_store();
        let before = now_millis();

        store.add_bookmark("First", "https://one.com", "Work").unwrap();
        let added = store.add_bookmark("Second", "https://two.com", "Personal").unwrap();

        let bookmarks = store.list_bookmarks();
        assert_eq!(bookmarks.len(), 2);
        assert_eq!(bookmarks[0], added);
        assert_eq!(bookmarks[0].title, "Second");
        assert_eq!(bookmarks[0].url, "https://two.com");
        assert_eq!(bookmarks[0].category, "Personal");
        assert_eq!(bookmarks[1].title, "First");
        assert!(!added.id.is_empty());
        assert!(added.created_at >= before);
        assert!(added.favicon.ends_with("domain=two.com"));
    }

    #[test]
    fn test_add_identical_bookmarks_get_distinct_ids() {
        let mut store = new_store();
        let a = store.add_bookmark("Same", "https://a.com", "General").unwrap();
        let b = store.add_bookmark("Same", "https://a.com", "General").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list_bookmarks().len(), 2);
    }

    #[test]
    fn test_add_bookmark_stores_unvalidated_input() {
        let mut store = new_store();
        let bookmark = store.add_bookmark("X", "not-a-url", "General").unwrap();

        assert_eq!(bookmark.url, "not-a-url");
        assert_eq!(bookmark.favicon, fallback_favicon());
        assert_eq!(store.list_bookmarks()[0].url, "not-a-url");

        // Unknown categories are also taken as given
        let odd = store.add_bookmark("", "https://b.com", "Nowhere").unwrap();
        assert_eq!(odd.category, "Nowhere");
        assert_eq!(odd.title, "");
    }

    #[test]
    fn test_remove_bookmark_is_idempotent() {
        let mut store = new_store();
        let keep = store.add_bookmark("Keep", "https://keep.com", "Work").unwrap();
        let gone = store.add_bookmark("Gone", "https://gone.com", "Work").unwrap();

        assert!(store.remove_bookmark(&gone.id).unwrap());
        assert_eq!(store.list_bookmarks(), [keep.clone()]);

        assert!(!store.remove_bookmark(&gone.id).unwrap());
        assert_eq!(store.list_bookmarks(), [keep]);
    }

    #[test]
    fn test_add_category_ignores_duplicates() {
        let mut store = new_store();
        assert!(store.add_category("Reading").unwrap());
        assert!(!store.add_category("Reading").unwrap());

        let count = store
            .list_categories()
            .iter()
            .filter(|c| c.as_str() == "Reading")
            .count();
        assert_eq!(count, 1);
        assert_eq!(store.list_categories().last().unwrap(), "Reading");
    }

    #[test]
    fn test_add_category_is_case_sensitive() {
        let mut store = new_store();
        assert!(store.add_category("work").unwrap());
        assert_eq!(store.list_categories().len(), 4);
    }

    #[test]
    fn test_remove_category_moves_bookmarks_to_fallback() {
        let mut store = new_store();
        let work1 = store.add_bookmark("W1", "https://w1.com", "Work").unwrap();
        let personal = store.add_bookmark("P", "https://p.com", "Personal").unwrap();
        let work2 = store.add_bookmark("W2", "https://w2.com", "Work").unwrap();

        let moved = store.remove_category("Work").unwrap();
        assert_eq!(moved, 2);

        assert_eq!(store.get_bookmark(&work1.id).unwrap().category, "General");
        assert_eq!(store.get_bookmark(&work2.id).unwrap().category, "General");
        assert_eq!(store.get_bookmark(&personal.id).unwrap(), &personal);
        assert_eq!(store.list_categories(), ["General", "Personal"]);

        // Order is untouched
        let ids: Vec<_> = store.list_bookmarks().iter().map(|b| b.id.clone()).collect();
        assert_eq!(ids, vec![work2.id, personal.id, work1.id]);
    }

    #[test]
    fn test_remove_unknown_category_is_noop() {
        let mut store = new_store();
        store.add_bookmark("W", "https://w.com", "Work").unwrap();

        assert_eq!(store.remove_category("Missing").unwrap(), 0);
        assert_eq!(store.list_categories(), ["General", "Work", "Personal"]);
        assert_eq!(store.list_bookmarks()[0].category, "Work");
    }

    #[test]
    fn test_remove_fallback_category() {
        let mut store = new_store();
        let b = store.add_bookmark("G", "https://g.com", "General").unwrap();

        assert_eq!(store.remove_category("General").unwrap(), 1);
        assert_eq!(store.list_categories(), ["Work", "Personal"]);
        assert_eq!(store.get_bookmark(&b.id).unwrap().category, "General");
        assert!(store.has_category("General"));
    }

    #[test]
    fn test_seed_scenario() {
        let mut store = new_store();
        store.add_bookmark("Site", "https://a.com", "Work").unwrap();
        assert_eq!(store.list_bookmarks().len(), 1);
        assert_eq!(store.list_bookmarks()[0].category, "Work");

        store.remove_category("Work").unwrap();
        assert_eq!(store.list_bookmarks()[0].category, "General");
        assert_eq!(store.list_categories(), ["General", "Personal"]);
    }

    #[test]
    fn test_counts_and_filters() {
        let mut store = new_store();
        store.add_bookmark("A", "https://a.com", "Work").unwrap();
        store.add_bookmark("B", "https://b.com", "Work").unwrap();
        store.add_bookmark("C", "https://c.com", "General").unwrap();

        assert_eq!(store.category_count(&CategoryFilter::All), 3);
        assert_eq!(store.category_count(&CategoryFilter::Named("Work".into())), 2);
        assert_eq!(
            store.category_counts(),
            vec![
                ("General".to_string(), 1),
                ("Work".to_string(), 2),
                ("Personal".to_string(), 0)
            ]
        );

        let work = store.bookmarks_in(&CategoryFilter::Named("Work".into()));
        assert_eq!(work.len(), 2);
        assert_eq!(work[0].title, "B");
    }

    #[test]
    fn test_find_by_id_prefix() {
        let mut store = new_store();
        let b = store.add_bookmark("A", "https://a.com", "Work").unwrap();

        let found = store.find_by_id_prefix(b.short_id());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, b.id);
        assert!(store.find_by_id_prefix("zzzz-not-hex").is_empty());
    }

    #[test]
    fn test_state_survives_reopen() {
        let mut store = new_store();
        store.add_bookmark("A", "https://a.com", "Work").unwrap();
        store.add_category("Reading").unwrap();
        store.remove_category("Personal").unwrap();

        let bookmarks = store.list_bookmarks().to_vec();
        let categories = store.list_categories().to_vec();

        let reopened = Store::open(store.storage().clone());
        assert_eq!(reopened.list_bookmarks(), bookmarks.as_slice());
        assert_eq!(reopened.list_categories(), categories.as_slice());
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let created;
        {
            let mut store = Store::open(JsonFileStore::new(temp_dir.path()));
            created = store.add_bookmark("Rust", "https://rust-lang.org", "Work").unwrap();
            store.add_category("Reading").unwrap();
        }

        let store = Store::open(JsonFileStore::new(temp_dir.path()));
        assert_eq!(store.list_bookmarks(), [created]);
        assert_eq!(
            store.list_categories(),
            ["General", "Work", "Personal", "Reading"]
        );
    }

    #[test]
    fn test_persistence_failure_keeps_memory_state() {
        let mut store = Store::open(MemoryStore::with_quota(64));

        let err = store
            .add_bookmark("Big", "https://example.com/a/long/path", "Work")
            .unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));

        // Applied in memory even though it was not written
        assert_eq!(store.list_bookmarks().len(), 1);
        assert!(!store.storage().contains(BOOKMARKS_KEY));
    }

    #[test]
    fn test_next_write_persists_after_failure() {
        let mut store = Store::open(MemoryStore::with_quota(64));
        let _ = store.add_bookmark("Big", "https://example.com/a/long/path", "Work");
        let id = store.list_bookmarks()[0].id.clone();

        // The smaller list fits and replaces whatever was stored
        assert!(store.remove_bookmark(&id).unwrap());
        assert!(store.storage().contains(BOOKMARKS_KEY));

        let reopened = Store::open(store.storage().clone());
        assert!(reopened.list_bookmarks().is_empty());
    }

    #[test]
    fn test_remove_category_failure_keeps_storage_consistent() {
        let mut store = new_store();
        let work = store.add_bookmark("W", "https://w.com", "Work").unwrap();
        store.add_category("Reading").unwrap();

        // No room left: moving the bookmark to "General" grows the list
        let mut storage = store.storage().clone();
        storage.set_quota(Some(storage.used_bytes()));
        let mut store = Store::open(storage);

        let err = store.remove_category("Work").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));

        // Memory has the new state
        assert_eq!(store.get_bookmark(&work.id).unwrap().category, "General");
        assert_eq!(store.list_categories(), ["General", "Personal", "Reading"]);

        // Storage still has the old state, in which every bookmark's
        // category is listed
        let reloaded = Store::open(store.storage().clone());
        assert_eq!(
            reloaded.list_categories(),
            ["General", "Work", "Personal", "Reading"]
        );
        for bookmark in reloaded.list_bookmarks() {
            assert!(reloaded.has_category(&bookmark.category));
            assert!(reloaded.list_categories().contains(&bookmark.category));
        }
        assert_eq!(reloaded.get_bookmark(&work.id).unwrap().category, "Work");
    }

    #[test]
    fn test_category_counts_include_unlisted() {
        let mut store = new_store();
        store.add_bookmark("G", "https://g.com", "General").unwrap();
        store.add_bookmark("W", "https://w.com", "Work").unwrap();
        store.add_bookmark("O", "https://o.com", "Old").unwrap();
        store.remove_category("General").unwrap();

        let counts = store.category_counts();
        assert_eq!(
            counts,
            vec![
                ("Work".to_string(), 1),
                ("Personal".to_string(), 0),
                ("Old".to_string(), 1),
                ("General".to_string(), 1)
            ]
        );
        let sum: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(sum, store.category_count(&CategoryFilter::All));
    }

    struct FixedIcon;

    impl FaviconResolver for FixedIcon {
        fn resolve(&self, _url: &str) -> String {
            "icon.png".to_string()
        }
    }

    #[test]
    fn test_custom_resolver() {
        let mut store = Store::with_resolver(MemoryStore::new(), Box::new(FixedIcon));
        let b = store.add_bookmark("A", "https://a.com", "Work").unwrap();
        assert_eq!(b.favicon, "icon.png");
    }

    #[test]
    fn test_favicon_not_rederived_on_load() {
        let mut store = Store::with_resolver(MemoryStore::new(), Box::new(FixedIcon));
        store.add_bookmark("A", "https://a.com", "Work").unwrap();

        let reopened = Store::open(store.storage().clone());
        assert_eq!(reopened.list_bookmarks()[0].favicon, "icon.png");
    }
}
