//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::{DateTime, Local};
use serde::Serialize;

use linkshelf_core::Bookmark;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single bookmark
    pub fn print_bookmark(&self, bookmark: &Bookmark) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", bookmark.id);
                println!("Title:    {}", bookmark.title);
                println!("URL:      {}", bookmark.url);
                println!("Category: {}", bookmark.category);
                println!("Icon:     {}", bookmark.favicon);
                println!("Created:  {}", format_timestamp(bookmark.created_at));
            }
            OutputFormat::Json => print_json(bookmark),
            OutputFormat::Quiet => println!("{}", bookmark.id),
        }
    }

    /// Print a flat list of bookmarks
    pub fn print_bookmarks(&self, bookmarks: &[&Bookmark]) {
        match self.format {
            OutputFormat::Human => {
                if bookmarks.is_empty() {
                    println!("No bookmarks found.");
                    return;
                }
                for bookmark in bookmarks {
                    println!("{}", bookmark_row(bookmark));
                }
                println!("\n{} bookmark(s)", bookmarks.len());
            }
            OutputFormat::Json => print_json(&bookmarks),
            OutputFormat::Quiet => {
                for bookmark in bookmarks {
                    println!("{}", bookmark.id);
                }
            }
        }
    }

    /// Print bookmarks under one heading per category
    pub fn print_grouped(&self, categories: &[String], bookmarks: &[Bookmark]) {
        let groups = group_by_category(categories, bookmarks);
        match self.format {
            OutputFormat::Human => {
                if bookmarks.is_empty() {
                    println!("No bookmarks yet. Add one with `linkshelf add <url>`.");
                    return;
                }
                for (name, items) in &groups {
                    println!("── {} ({}) ──", name, items.len());
                    for bookmark in items {
                        println!("{}", bookmark_row(bookmark));
                    }
                    println!();
                }
                println!("{} bookmark(s)", bookmarks.len());
            }
            OutputFormat::Json => {
                let json: Vec<_> = groups
                    .iter()
                    .map(|(name, items)| serde_json::json!({"category": name, "bookmarks": items}))
                    .collect();
                print_json(&json);
            }
            OutputFormat::Quiet => {
                for (_, items) in &groups {
                    for bookmark in items {
                        println!("{}", bookmark.id);
                    }
                }
            }
        }
    }

    /// Print categories with their bookmark counts
    pub fn print_categories(&self, counts: &[(String, usize)], total: usize) {
        match self.format {
            OutputFormat::Human => {
                println!("All ({})", total);
                for (name, count) in counts {
                    println!("{} ({})", name, count);
                }
                println!("\n{} categories", counts.len());
            }
            OutputFormat::Json => {
                let json: Vec<_> = counts
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&json);
            }
            OutputFormat::Quiet => {
                for (name, _) in counts {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Pretty-print a value as JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON output: {}", e),
    }
}

/// Group bookmarks by category
///
/// Categories come in list order and only appear when non-empty. Bookmarks
/// whose category is not in the list (such as "General" after it was
/// deleted) follow in groups of their own, in order of first appearance.
pub fn group_by_category<'a>(
    categories: &[String],
    bookmarks: &'a [Bookmark],
) -> Vec<(String, Vec<&'a Bookmark>)> {
    let mut groups: Vec<(String, Vec<&Bookmark>)> = categories
        .iter()
        .map(|name| (name.clone(), Vec::new()))
        .collect();

    for bookmark in bookmarks {
        match groups.iter().position(|(name, _)| *name == bookmark.category) {
            Some(i) => groups[i].1.push(bookmark),
            None => groups.push((bookmark.category.clone(), vec![bookmark])),
        }
    }

    groups.retain(|(_, items)| !items.is_empty());
    groups
}

/// Format an epoch-millisecond timestamp in local time
pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "(unknown)".to_string())
}

/// Format a byte count for display
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

fn bookmark_row(bookmark: &Bookmark) -> String {
    format!(
        "{} | {} | {}",
        bookmark.short_id(),
        truncate(&bookmark.title, 35),
        truncate(&bookmark.url, 45)
    )
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(title: &str, category: &str) -> Bookmark {
        Bookmark::new(title, "https://example.com", category, "icon")
    }

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("ééééééééééé", 5), "éé...");
    }

    #[test]
    fn test_group_by_category_order() {
        let categories = vec![
            "General".to_string(),
            "Work".to_string(),
            "Personal".to_string(),
        ];
        let bookmarks = vec![
            bookmark("w1", "Work"),
            bookmark("g1", "General"),
            bookmark("w2", "Work"),
        ];

        let groups = group_by_category(&categories, &bookmarks);
        let names: Vec<_> = groups.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["General", "Work"]);

        let work: Vec<_> = groups[1].1.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(work, vec!["w1", "w2"]);
    }

    #[test]
    fn test_group_by_category_unlisted() {
        let categories = vec!["Work".to_string()];
        let bookmarks = vec![
            bookmark("a", "General"),
            bookmark("b", "Work"),
            bookmark("c", "Old"),
            bookmark("d", "General"),
        ];

        let groups = group_by_category(&categories, &bookmarks);
        let names: Vec<_> = groups.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Work", "General", "Old"]);
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(i64::MAX), "(unknown)");
        let formatted = format_timestamp(1_700_000_000_000);
        assert!(formatted.starts_with("2023-11-1"));
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }
}
