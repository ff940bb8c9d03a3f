//! Page registry: name → page definition.

use std::collections::HashMap;

use crate::error::{NavError, Result};
use crate::types::Page;

/// All pages known to one navigator, keyed by name.
#[derive(Debug, Default)]
pub struct PageRegistry {
    pages: HashMap<String, Page>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page. Names must be unique, and so must the labels on a page.
    pub fn register(&mut self, page: Page) -> Result<()> {
        if self.pages.contains_key(page.name()) {
            return Err(NavError::DuplicatePage(page.name().to_string()));
        }
        if let Some(label) = page.duplicate_label() {
            return Err(NavError::DuplicateSelection {
                page: page.name().to_string(),
                label: label.to_string(),
            });
        }
        self.pages.insert(page.name().to_string(), page);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Page> {
        self.pages
            .get(name)
            .ok_or_else(|| NavError::PageNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Page> {
        self.pages
            .get_mut(name)
            .ok_or_else(|| NavError::PageNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PageOptions, Selection};

    fn page(name: &str) -> Page {
        Page::new(name, vec![], PageOptions::default())
    }

    #[test]
    fn register_then_lookup() {
        let mut registry = PageRegistry::new();
        registry.register(page("Home")).unwrap();
        assert_eq!(registry.get("Home").unwrap().name(), "Home");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut registry = PageRegistry::new();
        registry.register(page("Home")).unwrap();
        let err = registry.register(page("Home")).unwrap_err();
        assert!(matches!(err, NavError::DuplicatePage(name) if name == "Home"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_label_is_rejected() {
        let mut registry = PageRegistry::new();
        let dup = Page::new(
            "Ops",
            vec![Selection::link("Go", "A"), Selection::link("Go", "B")],
            PageOptions::default(),
        );
        let err = registry.register(dup).unwrap_err();
        assert!(matches!(err, NavError::DuplicateSelection { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn missing_page_is_an_error() {
        let registry = PageRegistry::new();
        let err = registry.get("Nowhere").unwrap_err();
        assert!(matches!(err, NavError::PageNotFound(name) if name == "Nowhere"));
    }
}
