//! Input checks performed by callers before mutating the store
//!
//! The store accepts whatever it is given. Front ends run these first.

use thiserror::Error;

use crate::favicon::is_valid_url;
use crate::models::FALLBACK_CATEGORY;

/// Rejected user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill all fields: title, URL and category are required.")]
    MissingFields,

    #[error("Invalid URL '{0}': enter a full URL such as https://example.com")]
    InvalidUrl(String),

    #[error("Unknown category '{0}'. Add it first with `linkshelf category add`.")]
    UnknownCategory(String),

    #[error("Category name cannot be empty.")]
    EmptyCategoryName,

    #[error("Category '{0}' already exists.")]
    DuplicateCategory(String),
}

/// Check a new bookmark against the current category list
pub fn validate_new_bookmark(
    title: &str,
    url: &str,
    category: &str,
    categories: &[String],
) -> Result<(), ValidationError> {
    if title.trim().is_empty() || url.trim().is_empty() || category.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if !is_valid_url(url) {
        return Err(ValidationError::InvalidUrl(url.to_string()));
    }

    if category != FALLBACK_CATEGORY && !categories.iter().any(|c| c == category) {
        return Err(ValidationError::UnknownCategory(category.to_string()));
    }

    Ok(())
}

/// Check a new category name
pub fn validate_new_category(name: &str, categories: &[String]) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyCategoryName);
    }
    if categories.iter().any(|c| c == name) {
        return Err(ValidationError::DuplicateCategory(name.to_string()));
    }
    Ok(())
}
