//! Category command handlers

use anyhow::{bail, Context, Result};

use linkshelf_core::{validate_new_category, CategoryFilter, FALLBACK_CATEGORY};

use super::Shelf;
use crate::output::Output;
use crate::prompt::confirm;

/// List categories with bookmark counts
pub fn list(store: &Shelf, output: &Output) -> Result<()> {
    let total = store.category_count(&CategoryFilter::All);
    output.print_categories(&store.category_counts(), total);
    Ok(())
}

/// Add a category
pub fn add(store: &mut Shelf, name: String, output: &Output) -> Result<()> {
    validate_new_category(&name, store.list_categories())?;

    store
        .add_category(&name)
        .context("Failed to save category")?;

    output.success(&format!("New category added: {}", name));
    Ok(())
}

/// Delete a category, moving its bookmarks to the fallback category
pub fn delete(store: &mut Shelf, name: String, yes: bool, output: &Output) -> Result<()> {
    if !store.list_categories().contains(&name) {
        bail!("No category named: {}", name);
    }

    let count = store.category_count(&CategoryFilter::Named(name.clone()));

    if !yes && output.should_prompt() {
        println!(
            "Delete \"{}\"? All bookmarks in this category ({}) will be moved to \"{}\".",
            name, count, FALLBACK_CATEGORY
        );
        if name == FALLBACK_CATEGORY {
            println!(
                "\"{}\" stays available for new bookmarks even after it is removed from the list.",
                FALLBACK_CATEGORY
            );
        }
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let moved = store
        .remove_category(&name)
        .context("Failed to delete category")?;

    output.success(&format!(
        "{} deleted. {} bookmark(s) moved to {}.",
        name, moved, FALLBACK_CATEGORY
    ));
    Ok(())
}
