//! Domain types for multipage.
//!
//! Pages, their selections, per-page display options, and the entries of
//! the open-page stack. Everything here is plain data; behaviour lives in
//! the registry, the stack, and the navigator.

use std::fmt;
use std::rc::Rc;

use crossterm::style::Color;

use crate::error::Result;
use crate::tui::navigator::Navigator;
use crate::tui::theme;

/// Label of the implicit first selection on every page with a back button.
pub const BACK_LABEL: &str = "Back";

// ============================================================================
// SELECTIONS
// ============================================================================

/// Callback bound to a selection. Receives the navigator that dispatched it.
pub type ActionFn = Rc<dyn Fn(&mut Navigator) -> Result<()>>;

/// What pressing a selection's number does.
#[derive(Clone)]
pub enum SelectionAction {
    /// Built-in: return to the previous page.
    Back,
    /// Open (or return to) the named page.
    Open(String),
    /// Host-supplied callback.
    Run(ActionFn),
}

impl fmt::Debug for SelectionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionAction::Back => f.write_str("Back"),
            SelectionAction::Open(page) => write!(f, "Open({:?})", page),
            SelectionAction::Run(_) => f.write_str("Run(..)"),
        }
    }
}

/// A numbered, labelled entry on a page.
#[derive(Debug, Clone)]
pub struct Selection {
    pub label: String,
    pub action: SelectionAction,
}

impl Selection {
    /// A selection that runs `action` when chosen.
    pub fn new<F>(label: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut Navigator) -> Result<()> + 'static,
    {
        Selection {
            label: label.into(),
            action: SelectionAction::Run(Rc::new(action)),
        }
    }

    /// A selection that opens (or returns to) another page.
    pub fn link(label: impl Into<String>, page: impl Into<String>) -> Self {
        Selection {
            label: label.into(),
            action: SelectionAction::Open(page.into()),
        }
    }

    /// The implicit back selection.
    pub fn back() -> Self {
        Selection {
            label: BACK_LABEL.to_string(),
            action: SelectionAction::Back,
        }
    }

    pub fn is_back(&self) -> bool {
        matches!(self.action, SelectionAction::Back)
    }
}

// ============================================================================
// PAGES
// ============================================================================

/// Display options consumed when a page is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    /// Colour of the page title.
    pub title_colour: Color,
    /// Whether selection 0 is an implicit "Back".
    pub has_back_button: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title_colour: theme::TITLE_DEFAULT,
            has_back_button: true,
        }
    }
}

impl PageOptions {
    pub fn with_title_colour(mut self, colour: Color) -> Self {
        self.title_colour = colour;
        self
    }

    pub fn without_back_button(mut self) -> Self {
        self.has_back_button = false;
        self
    }
}

/// A named screen with an ordered list of selections.
#[derive(Debug, Clone)]
pub struct Page {
    name: String,
    selections: Vec<Selection>,
    options: PageOptions,
}

impl Page {
    /// Build a page, prepending "Back" unless the options suppress it.
    pub fn new(name: impl Into<String>, selections: Vec<Selection>, options: PageOptions) -> Self {
        let mut all = Vec::with_capacity(selections.len() + 1);
        if options.has_back_button {
            all.push(Selection::back());
        }
        all.extend(selections);

        Page {
            name: name.into(),
            selections: all,
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Append a selection, returning its index.
    pub fn add_selection(&mut self, selection: Selection) -> usize {
        self.selections.push(selection);
        self.selections.len() - 1
    }

    /// Remove the selection at `index`, if any.
    pub fn remove_selection(&mut self, index: usize) -> Option<Selection> {
        (index < self.selections.len()).then(|| self.selections.remove(index))
    }

    /// First label that appears more than once.
    pub fn duplicate_label(&self) -> Option<&str> {
        self.selections.iter().enumerate().find_map(|(i, s)| {
            self.selections[..i]
                .iter()
                .any(|earlier| earlier.label == s.label)
                .then_some(s.label.as_str())
        })
    }
}

// ============================================================================
// STACK ENTRIES
// ============================================================================

/// One entry of the open-page stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEntry {
    /// A registered page occupying a column.
    Page(String),
    /// An action ran without opening a page; its output occupies a column.
    TransientAction,
}

impl StackEntry {
    pub fn page_name(&self) -> Option<&str> {
        match self {
            StackEntry::Page(name) => Some(name),
            StackEntry::TransientAction => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut Navigator) -> Result<()> {
        Ok(())
    }

    #[test]
    fn page_gets_implicit_back_first() {
        let page = Page::new("Ops", vec![Selection::new("Add", noop)], PageOptions::default());
        let labels: Vec<_> = page.selections().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Back", "Add"]);
        assert!(page.selections()[0].is_back());
    }

    #[test]
    fn back_button_can_be_suppressed() {
        let options = PageOptions::default().without_back_button();
        let page = Page::new("Home", vec![Selection::new("Exit", noop)], options);
        assert_eq!(page.selections().len(), 1);
        assert_eq!(page.selections()[0].label, "Exit");
    }

    #[test]
    fn default_options_are_grey_with_back() {
        let options = PageOptions::default();
        assert_eq!(options.title_colour, Color::Grey);
        assert!(options.has_back_button);
    }

    #[test]
    fn add_and_remove_selection() {
        let mut page = Page::new("Ops", vec![], PageOptions::default());
        let index = page.add_selection(Selection::new("Add", noop));
        assert_eq!(index, 1);

        let removed = page.remove_selection(0).expect("back exists");
        assert!(removed.is_back());
        assert_eq!(page.selections()[0].label, "Add");
        assert!(page.remove_selection(5).is_none());
    }

    #[test]
    fn duplicate_label_is_detected() {
        let page = Page::new(
            "Ops",
            vec![Selection::new("Add", noop), Selection::new("Add", noop)],
            PageOptions::default(),
        );
        assert_eq!(page.duplicate_label(), Some("Add"));

        let page = Page::new("Ops", vec![Selection::new("Add", noop)], PageOptions::default());
        assert_eq!(page.duplicate_label(), None);
    }

    #[test]
    fn a_page_named_like_the_old_sentinel_is_just_a_page() {
        let entry = StackEntry::Page("function".into());
        assert_eq!(entry.page_name(), Some("function"));
        assert_eq!(StackEntry::TransientAction.page_name(), None);
    }
}
