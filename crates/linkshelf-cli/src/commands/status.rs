//! Status command handler

use anyhow::Result;

use linkshelf_core::storage::{BOOKMARKS_KEY, CATEGORIES_KEY};
use linkshelf_core::{CategoryFilter, KeyValueStore};

use super::Shelf;
use crate::output::{human_size, Output, OutputFormat};

/// Show storage location and counts
pub fn show(store: &Shelf, output: &Output) -> Result<()> {
    let storage = store.storage();
    let size = storage.disk_usage(&[BOOKMARKS_KEY, CATEGORIES_KEY]);
    let bookmarks = store.category_count(&CategoryFilter::All);
    let categories = store.list_categories().len();
    let initialized = storage.contains(BOOKMARKS_KEY) || storage.contains(CATEGORIES_KEY);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": storage.dir(),
                    "initialized": initialized,
                    "storage_size": size,
                    "counts": {
                        "bookmarks": bookmarks,
                        "categories": categories
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", bookmarks);
        }
        OutputFormat::Human => {
            println!("linkshelf Status");
            println!("================");
            println!();
            println!("Storage:");
            println!("  Location: {}", storage.dir().display());
            if initialized {
                println!("  Size:     {}", human_size(size));
            } else {
                println!("  Size:     (nothing saved yet)");
            }
            println!();
            println!("Contents:");
            println!("  Bookmarks:  {}", bookmarks);
            println!("  Categories: {}", categories);
        }
    }

    Ok(())
}
