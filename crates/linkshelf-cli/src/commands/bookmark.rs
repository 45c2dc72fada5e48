//! Bookmark command handlers

use anyhow::{bail, Context, Result};

use linkshelf_core::favicon::host_of;
use linkshelf_core::{is_valid_url, validate_new_bookmark, Bookmark, CategoryFilter};

use super::Shelf;
use crate::metadata::fetch_title;
use crate::output::Output;
use crate::prompt::confirm;

/// Save a new bookmark
pub async fn add(
    store: &mut Shelf,
    url: String,
    title: Option<String>,
    category: String,
    output: &Output,
) -> Result<()> {
    let title = match title {
        Some(title) => title,
        None if is_valid_url(&url) => default_title(&url, fetch_title(&url).await),
        None => default_title(&url, None),
    };

    validate_new_bookmark(&title, &url, &category, store.list_categories())?;

    let bookmark = store
        .add_bookmark(&title, &url, &category)
        .context("Failed to save bookmark")?;

    output.success("Bookmark added.");
    output.print_bookmark(&bookmark);

    Ok(())
}

/// List bookmarks, grouped by category or limited to one
pub fn list(store: &Shelf, category: Option<String>, output: &Output) -> Result<()> {
    match category {
        Some(name) => {
            let filter = CategoryFilter::Named(name.clone());
            if !store.has_category(&name) && store.category_count(&filter) == 0 {
                bail!("Unknown category: {}", name);
            }
            output.print_bookmarks(&store.bookmarks_in(&filter));
        }
        None => output.print_grouped(store.list_categories(), store.list_bookmarks()),
    }
    Ok(())
}

/// Show a single bookmark
pub fn show(store: &Shelf, id: String, output: &Output) -> Result<()> {
    let bookmark = resolve_bookmark(store, &id)?;
    output.print_bookmark(bookmark);
    Ok(())
}

/// Open a bookmark in the system browser
pub fn open(store: &Shelf, id: String, output: &Output) -> Result<()> {
    let bookmark = resolve_bookmark(store, &id)?;

    ::open::that(&bookmark.url)
        .with_context(|| format!("Failed to open {} in a browser", bookmark.url))?;

    output.message(&format!("Opened {}", bookmark.url));
    Ok(())
}

/// Print only the URL, for piping into a clipboard tool
pub fn url(store: &Shelf, id: String) -> Result<()> {
    let bookmark = resolve_bookmark(store, &id)?;
    println!("{}", bookmark.url);
    Ok(())
}

/// Delete a bookmark
pub fn delete(store: &mut Shelf, id: String, yes: bool, output: &Output) -> Result<()> {
    let bookmark = resolve_bookmark(store, &id)?.clone();

    if !yes && output.should_prompt() {
        println!("Delete bookmark: {} - {}", bookmark.short_id(), bookmark.title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store
        .remove_bookmark(&bookmark.id)
        .context("Failed to delete bookmark")?;

    output.success(&format!("Deleted bookmark: {}", bookmark.title));
    Ok(())
}

/// Title to use when none was given: the page title, else the host
fn default_title(url: &str, fetched: Option<String>) -> String {
    fetched
        .or_else(|| host_of(url))
        .unwrap_or_else(|| url.to_string())
}

/// Find a bookmark by full id or unique id prefix
fn resolve_bookmark<'a>(store: &'a Shelf, id: &str) -> Result<&'a Bookmark> {
    if let Some(bookmark) = store.get_bookmark(id) {
        return Ok(bookmark);
    }

    if id.is_empty() {
        bail!("No bookmark id given");
    }

    let matches = store.find_by_id_prefix(id);
    match matches.as_slice() {
        [] => bail!("No bookmark found matching: {}", id),
        [bookmark] => Ok(*bookmark),
        _ => {
            eprintln!("Multiple bookmarks match '{}':", id);
            for bookmark in &matches {
                eprintln!("  {} - {}", bookmark.id, bookmark.title);
            }
            bail!("Ambiguous ID. Please provide more characters.")
        }
    }
}
