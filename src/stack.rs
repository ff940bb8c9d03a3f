//! The open-page stack.
//!
//! Pure bookkeeping, no rendering: which pages are on screen, in column
//! order, and whether an action's output currently occupies the column
//! to the right of the top page. Columns are 1-based stack positions.
//!
//! Invariant: `TransientAction` appears at most once, and only on top.

use crate::types::StackEntry;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageStack {
    entries: Vec<StackEntry>,
}

impl PageStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    /// Number of entries, counting a transient entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Page names bottom to top.
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(StackEntry::page_name)
    }

    pub fn page_count(&self) -> usize {
        self.pages().count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column_of(name).is_some()
    }

    /// 1-based column a page occupies.
    pub fn column_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.page_name() == Some(name))
            .map(|i| i + 1)
    }

    /// Page name in a given column, if that column holds a page.
    pub fn page_at(&self, column: usize) -> Option<&str> {
        column
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .and_then(StackEntry::page_name)
    }

    /// Topmost page, ignoring a transient entry above it.
    pub fn top_page(&self) -> Option<&str> {
        self.pages().last()
    }

    pub fn has_transient(&self) -> bool {
        self.entries.last() == Some(&StackEntry::TransientAction)
    }

    /// Push a page, dropping the transient entry first.
    pub fn push_page(&mut self, name: &str) {
        self.remove_transient();
        self.entries.push(StackEntry::Page(name.to_string()));
    }

    /// Mark that an action is running. Returns false if already marked.
    pub fn push_transient(&mut self) -> bool {
        if self.has_transient() {
            return false;
        }
        self.entries.push(StackEntry::TransientAction);
        true
    }

    pub fn remove_transient(&mut self) {
        if self.has_transient() {
            self.entries.pop();
        }
    }

    /// Pop the top entry if it is not `name`'s page, returning its column.
    ///
    /// Callers loop on this to close everything above `name` top to bottom.
    pub fn pop_above(&mut self, name: &str) -> Option<usize> {
        let keep = self.column_of(name)?;
        if self.entries.len() > keep {
            let column = self.entries.len();
            self.entries.pop();
            Some(column)
        } else {
            None
        }
    }

    /// Page that back-navigation should return to.
    ///
    /// With a single page open this is that page; otherwise the page just
    /// below the top page. Transient entries are never a target.
    pub fn back_target(&self) -> Option<&str> {
        let pages: Vec<&str> = self.pages().collect();
        match pages.len() {
            0 => None,
            1 => Some(pages[0]),
            n => Some(pages[n - 2]),
        }
    }
}
