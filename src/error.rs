//! Error types for the navigator.
//!
//! Two families live here. Wiring mistakes (unknown page, duplicate name,
//! editing a page that is already on screen) are programming errors and
//! propagate out of whatever call triggered them. Capacity refusals are
//! recoverable: the run loop reports them in place and prompts again.

use thiserror::Error;

/// Errors raised by the page registry and the navigator.
#[derive(Error, Debug)]
pub enum NavError {
    /// No page is registered under this name.
    #[error("Page does not exist: {0}")]
    PageNotFound(String),

    /// A page with this name was already registered.
    #[error("Page already exists: {0}")]
    DuplicatePage(String),

    /// Two selections on one page share a label.
    #[error("Page {page} has more than one selection labelled {label}")]
    DuplicateSelection { page: String, label: String },

    /// Selections can only change before the page is first opened.
    #[error("Page is open and cannot be modified: {0}")]
    PageOpen(String),

    /// `run` was called before any page was opened.
    #[error("No page is open")]
    NoPageOpen,

    /// Opening another column would exceed the configured maximum.
    #[error("Too many pages open (maximum {max_columns} columns)")]
    TooManyPages { max_columns: usize },

    /// Terminal I/O failure.
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NavError {
    /// Whether the run loop may report this and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NavError::TooManyPages { .. })
    }
}

pub type Result<T> = std::result::Result<T, NavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_capacity_is_recoverable() {
        assert!(NavError::TooManyPages { max_columns: 2 }.is_recoverable());
        assert!(!NavError::PageNotFound("Home".into()).is_recoverable());
        assert!(!NavError::DuplicatePage("Home".into()).is_recoverable());
        assert!(!NavError::NoPageOpen.is_recoverable());
    }

    #[test]
    fn messages_name_the_page() {
        let err = NavError::PageNotFound("Settings".into());
        assert_eq!(err.to_string(), "Page does not exist: Settings");

        let err = NavError::DuplicateSelection {
            page: "Home".into(),
            label: "Exit".into(),
        };
        assert_eq!(err.to_string(), "Page Home has more than one selection labelled Exit");
    }
}
