//! The navigator: page registry, open-page stack, and the selection loop.
//!
//! Navigation calls only update state and draw; they never block. The one
//! blocking loop is `run`, which reads a key, dispatches the selection, and
//! goes round again with whatever page is current afterwards. Actions that
//! navigate therefore return straight back into the loop instead of
//! nesting another one, so the call stack stays flat however long the
//! session lasts.

use std::rc::Rc;

use tracing::{debug, info, warn};

use super::display::{DisplayStrategy, FixedColumns};
use super::terminal::{KeyPress, SharedTerminal};
use super::theme;
use super::writer::{Writer, INVALID_INPUT};
use crate::error::{NavError, Result};
use crate::registry::PageRegistry;
use crate::stack::PageStack;
use crate::types::{Page, PageOptions, Selection, SelectionAction};

/// Reported when a selection would open one column too many.
pub const TOO_MANY_PAGES: &str = "Too many pages!";

pub struct Navigator {
    terminal: SharedTerminal,
    registry: PageRegistry,
    stack: PageStack,
    current: Option<String>,
    max_columns: usize,
    ended: bool,
    style: Rc<dyn DisplayStrategy>,
}

impl Navigator {
    /// Clear the terminal, set its title, and start with no page open.
    ///
    /// `max_columns` counts columns to the right of the first page; it is
    /// raised to 1 if given as 0.
    pub fn new(terminal: SharedTerminal, title: &str, max_columns: usize) -> Result<Self> {
        let (width, _) = {
            let mut term = terminal.borrow_mut();
            term.clear()?;
            term.set_title(title)?;
            term.size()?
        };
        let max_columns = max_columns.max(1);
        if usize::from(width) < max_columns + 1 {
            warn!(width, max_columns, "columns narrower than one cell");
        }
        Ok(Navigator {
            terminal,
            registry: PageRegistry::new(),
            stack: PageStack::new(),
            current: None,
            max_columns,
            ended: false,
            style: Rc::new(FixedColumns),
        })
    }

    pub fn with_style(mut self, style: Rc<dyn DisplayStrategy>) -> Self {
        self.style = style;
        self
    }

    /// Swap the display strategy. Takes effect at the next draw.
    pub fn set_style(&mut self, style: Rc<dyn DisplayStrategy>) {
        self.style = style;
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn terminal(&self) -> SharedTerminal {
        Rc::clone(&self.terminal)
    }

    pub fn registry(&self) -> &PageRegistry {
        &self.registry
    }

    pub fn stack(&self) -> &PageStack {
        &self.stack
    }

    pub fn page(&self, name: &str) -> Result<&Page> {
        self.registry.get(name)
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.current
            .as_deref()
            .and_then(|name| self.registry.get(name).ok())
    }

    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    /// Most stack entries allowed at once: the first page plus `max_columns`.
    pub fn capacity(&self) -> usize {
        self.max_columns + 1
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn viewport(&self) -> Result<(u16, u16)> {
        Ok(self.terminal.borrow().size()?)
    }

    // ------------------------------------------------------------------------
    // Page registration
    // ------------------------------------------------------------------------

    /// Register a page. Selection 0 is "Back" unless `options` suppress it.
    pub fn create_page(
        &mut self,
        name: &str,
        selections: Vec<Selection>,
        options: PageOptions,
    ) -> Result<()> {
        self.registry.register(Page::new(name, selections, options))?;
        debug!(page = name, "registered page");
        Ok(())
    }

    /// Append a selection to a page that has not been opened yet.
    pub fn add_selection(&mut self, page: &str, selection: Selection) -> Result<usize> {
        let page = self.unopened_page_mut(page)?;
        if page.selections().iter().any(|s| s.label == selection.label) {
            return Err(NavError::DuplicateSelection {
                page: page.name().to_string(),
                label: selection.label,
            });
        }
        Ok(page.add_selection(selection))
    }

    /// Remove a selection from a page that has not been opened yet.
    pub fn remove_selection(&mut self, page: &str, index: usize) -> Result<Option<Selection>> {
        Ok(self.unopened_page_mut(page)?.remove_selection(index))
    }

    fn unopened_page_mut(&mut self, name: &str) -> Result<&mut Page> {
        if self.stack.contains(name) {
            return Err(NavError::PageOpen(name.to_string()));
        }
        self.registry.get_mut(name)
    }

    // ------------------------------------------------------------------------
    // Writers
    // ------------------------------------------------------------------------

    /// A writer for logical `column` (1-based), starting at `row`.
    pub fn writer_at(&self, column: usize, row: u16) -> Result<Writer> {
        let physical = self.style.column_for(self, column).max(1);
        let width = self.style.column_width(self)?;
        let offset = u16::try_from(physical - 1)
            .unwrap_or(u16::MAX)
            .saturating_mul(width);
        Ok(Writer::new(self.terminal(), offset, width, row)?)
    }

    /// A writer where action output goes.
    pub fn writer(&self) -> Result<Writer> {
        let (column, row) = self.style.action_origin(self)?;
        self.writer_at(column, row)
    }

    /// Writer on the current page's status row, just under its menu.
    fn prompt_writer(&self, page: &Page) -> Result<Writer> {
        let column = self.stack.column_of(page.name()).unwrap_or(1);
        let row = u16::try_from(page.selections().len() + 1).unwrap_or(u16::MAX);
        self.writer_at(column, row)
    }

    fn clear_action_area(&self) -> Result<()> {
        let mut writer = self.writer()?;
        let rows = writer.height().saturating_sub(writer.row());
        for _ in 0..rows {
            writer.blank()?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Open `name`, or return to it if it is already open.
    ///
    /// Returning closes every column above it. Opening fails with
    /// `TooManyPages`, leaving the stack untouched, when the new page would
    /// not fit. Does nothing once the session has ended.
    pub fn navigate_page(&mut self, name: &str) -> Result<()> {
        if self.ended {
            return Ok(());
        }
        if !self.registry.contains(name) {
            return Err(NavError::PageNotFound(name.to_string()));
        }

        let style = Rc::clone(&self.style);
        if self.stack.contains(name) {
            debug!(page = name, depth = self.stack.len(), "returning to page");
            self.current = Some(name.to_string());
            while let Some(column) = self.stack.pop_above(name) {
                style.clear_column(self, Some(column))?;
            }
            style.render_backward(self, name)
        } else {
            if self.stack.page_count() + 1 > self.capacity() {
                warn!(page = name, max_columns = self.max_columns, "refusing to open page");
                return Err(NavError::TooManyPages {
                    max_columns: self.max_columns,
                });
            }
            debug!(page = name, depth = self.stack.len(), "opening page");
            self.stack.push_page(name);
            self.current = Some(name.to_string());
            style.render_forward(self, name)
        }
    }

    /// Return to the page below the top one; with one page open, redraw it.
    pub fn navigate_back(&mut self) -> Result<()> {
        if self.ended {
            return Ok(());
        }
        match self.stack.back_target() {
            Some(target) => {
                let target = target.to_string();
                self.navigate_page(&target)
            }
            None => Err(NavError::NoPageOpen),
        }
    }

    /// End the session: clear the screen and ignore all further navigation.
    pub fn clear_console(&mut self) -> Result<()> {
        self.ended = true;
        self.terminal.borrow_mut().clear()?;
        info!("session ended");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Selection loop
    // ------------------------------------------------------------------------

    /// Read keys and dispatch selections until the session ends.
    ///
    /// Bad keys and capacity refusals are reported on the current page's
    /// status row and the loop prompts again. Wiring and I/O errors end the
    /// loop and are returned.
    pub fn run(&mut self) -> Result<()> {
        if self.ended {
            return Ok(());
        }
        if self.current.is_none() {
            return Err(NavError::NoPageOpen);
        }
        info!(page = self.current.as_deref().unwrap_or_default(), "session started");

        let mut status: Option<&'static str> = None;
        while !self.ended {
            let name = self.current.clone().ok_or(NavError::NoPageOpen)?;
            let page = self.registry.get(&name)?;
            let selection_count = page.selections().len();

            let mut prompt = self.prompt_writer(page)?;
            let status_row = prompt.row();
            let reported = status.take();
            match reported {
                Some(message) => prompt.out_coloured(message, theme::ERROR)?,
                None => prompt.blank()?,
            }
            prompt.set_row(status_row);

            let style = Rc::clone(&self.style);
            style.prepare_input(self, &prompt)?;
            let key = self.terminal.borrow_mut().read_key()?;

            // The report belongs to this prompt; erase it before anything redraws.
            if reported.is_some() {
                prompt.blank()?;
            }

            status = match key {
                KeyPress::Interrupt => {
                    self.clear_console()?;
                    None
                }
                KeyPress::Back => settle(self.navigate_back())?,
                KeyPress::Char(c) => match parse_selection(c, selection_count) {
                    Some(index) => self.dispatch(&name, index)?,
                    None => Some(INVALID_INPUT),
                },
                KeyPress::Other => Some(INVALID_INPUT),
            };
        }
        Ok(())
    }

    /// Run selection `index` of page `name`.
    fn dispatch(&mut self, name: &str, index: usize) -> Result<Option<&'static str>> {
        let action = self.registry.get(name)?.selections()[index].action.clone();
        match action {
            SelectionAction::Back => settle(self.navigate_back()),
            SelectionAction::Open(page) => settle(self.navigate_page(&page)),
            SelectionAction::Run(run) => {
                if !self.stack.has_transient() {
                    if self.stack.len() + 1 > self.capacity() {
                        warn!(page = name, index, "no room for action output");
                        return Ok(Some(TOO_MANY_PAGES));
                    }
                    self.stack.push_transient();
                }
                self.clear_action_area()?;
                debug!(page = name, index, "running selection");
                settle(run(self))
            }
        }
    }
}

/// Turn a recoverable failure into a status message; pass the rest on.
fn settle(outcome: Result<()>) -> Result<Option<&'static str>> {
    match outcome {
        Ok(()) => Ok(None),
        Err(err) if err.is_recoverable() => {
            warn!(error = %err, "recovered");
            Ok(Some(TOO_MANY_PAGES))
        }
        Err(err) => Err(err),
    }
}

/// Selection index for a key, if it is a digit within range.
pub fn parse_selection(key: char, selection_count: usize) -> Option<usize> {
    key.to_digit(10)
        .map(|d| d as usize)
        .filter(|&index| index < selection_count)
}

// ============================================================================
// TESTS
// ============================================================================
