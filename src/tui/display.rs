//! Display strategies: how navigation is drawn.
//!
//! A strategy is a stateless policy. The navigator keeps the stack and the
//! current page correct on its own and then asks the strategy to draw; it
//! never asks which strategy is installed; layout questions go through the
//! capability queries (`column_for`, `column_width`, `action_origin`).

use std::io;

use super::navigator::Navigator;
use super::writer::{fit_row, Writer};
use crate::error::Result;
use crate::types::Page;

pub trait DisplayStrategy {
    /// Draw a page that was just pushed onto the stack.
    fn render_forward(&self, nav: &Navigator, page: &str) -> Result<()>;

    /// Redraw a page that was already open.
    ///
    /// Every entry above it has already been popped, and each of those
    /// columns passed through `clear_column`, top to bottom.
    fn render_backward(&self, nav: &Navigator, page: &str) -> Result<()>;

    /// Blank a column's full height. `None` means the stack's top column.
    fn clear_column(&self, nav: &Navigator, column: Option<usize>) -> Result<()>;

    /// Place the cursor just before the loop blocks on a key.
    fn prepare_input(&self, nav: &Navigator, writer: &Writer) -> Result<()>;

    /// Physical column a writer for logical `column` should use.
    fn column_for(&self, _nav: &Navigator, column: usize) -> usize {
        column
    }

    /// Width of one column in cells.
    fn column_width(&self, nav: &Navigator) -> Result<u16>;

    /// Column and row where an action's output begins.
    fn action_origin(&self, nav: &Navigator) -> Result<(usize, u16)> {
        let column = nav
            .stack()
            .top_page()
            .and_then(|name| nav.stack().column_of(name))
            .unwrap_or(0);
        Ok((column + 1, 0))
    }
}

// ============================================================================
// SHARED DRAWING
// ============================================================================

/// Title line followed by `[i] label` for each selection.
fn draw_menu(writer: &mut Writer, page: &Page, title: &str) -> io::Result<()> {
    writer.out_coloured(title, page.options().title_colour)?;
    for (index, selection) in page.selections().iter().enumerate() {
        writer.out(&format!("[{}] {}", index, selection.label))?;
    }
    Ok(())
}

/// Blank `rows` consecutive rows of a column starting at `writer`'s row.
fn blank_rows(writer: &mut Writer, rows: u16) -> io::Result<()> {
    for _ in 0..rows {
        writer.blank()?;
    }
    Ok(())
}

// ============================================================================
// FIXED COLUMNS
// ============================================================================

/// Every open page keeps its own column for as long as it stays open.
///
/// The active page's title reads `<- Name ->`; the pages to its left show
/// just their name, repainted after each navigation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedColumns;

impl FixedColumns {
    fn draw_page(&self, nav: &Navigator, name: &str) -> Result<()> {
        let column = nav.stack().column_of(name).unwrap_or(1);
        self.clear_column(nav, Some(column))?;

        let page = nav.page(name)?;
        let mut writer = nav.writer_at(column, 0)?;
        draw_menu(&mut writer, page, &format!("<- {} ->", page.name()))?;
        self.repaint_siblings(nav, column)
    }

    /// Repaint the titles of the columns left of `column`.
    fn repaint_siblings(&self, nav: &Navigator, column: usize) -> Result<()> {
        for sibling in 1..column {
            let Some(name) = nav.stack().page_at(sibling) else {
                continue;
            };
            let colour = nav.page(name)?.options().title_colour;
            let mut writer = nav.writer_at(sibling, 0)?;
            writer.blank()?;
            writer.set_row(0);
            writer.out_coloured(name, colour)?;
        }
        Ok(())
    }
}

impl DisplayStrategy for FixedColumns {
    fn render_forward(&self, nav: &Navigator, page: &str) -> Result<()> {
        self.draw_page(nav, page)
    }

    fn render_backward(&self, nav: &Navigator, page: &str) -> Result<()> {
        self.draw_page(nav, page)
    }

    fn clear_column(&self, nav: &Navigator, column: Option<usize>) -> Result<()> {
        let column = column.unwrap_or_else(|| nav.stack().len().max(1));
        let mut writer = nav.writer_at(column, 0)?;
        let rows = writer.height();
        blank_rows(&mut writer, rows)?;
        Ok(())
    }

    fn prepare_input(&self, nav: &Navigator, writer: &Writer) -> Result<()> {
        nav.terminal()
            .borrow_mut()
            .move_to(writer.column_offset(), 0)?;
        Ok(())
    }

    fn column_width(&self, nav: &Navigator) -> Result<u16> {
        let (width, _) = nav.viewport()?;
        let slots = u16::try_from(nav.capacity()).unwrap_or(u16::MAX);
        Ok((width / slots.max(1)).max(1))
    }
}

// ============================================================================
// BREADCRUMB
// ============================================================================

/// One full-width surface titled with the path, e.g. `Home > Ops > Add`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Breadcrumb;

impl Breadcrumb {
    /// Open pages joined with ` > `, bottom first.
    pub fn trail(nav: &Navigator) -> String {
        nav.stack().pages().collect::<Vec<_>>().join(" > ")
    }

    fn draw_page(&self, nav: &Navigator, name: &str) -> Result<()> {
        self.clear_column(nav, None)?;
        let page = nav.page(name)?;
        let mut writer = nav.writer_at(1, 0)?;
        draw_menu(&mut writer, page, &Self::trail(nav))?;
        Ok(())
    }
}

impl DisplayStrategy for Breadcrumb {
    fn render_forward(&self, nav: &Navigator, page: &str) -> Result<()> {
        self.draw_page(nav, page)
    }

    fn render_backward(&self, nav: &Navigator, page: &str) -> Result<()> {
        self.draw_page(nav, page)
    }

    fn clear_column(&self, nav: &Navigator, _column: Option<usize>) -> Result<()> {
        let mut writer = nav.writer_at(1, 0)?;
        let rows = writer.height();
        blank_rows(&mut writer, rows)?;
        Ok(())
    }

    fn prepare_input(&self, _nav: &Navigator, _writer: &Writer) -> Result<()> {
        Ok(())
    }

    fn column_for(&self, _nav: &Navigator, _column: usize) -> usize {
        1
    }

    fn column_width(&self, nav: &Navigator) -> Result<u16> {
        let (width, _) = nav.viewport()?;
        Ok(width)
    }

    /// Below the menu, leaving the status row free; row 1 if that is off screen.
    fn action_origin(&self, nav: &Navigator) -> Result<(usize, u16)> {
        let (_, height) = nav.viewport()?;
        let menu_rows = nav.current_page().map_or(0, |p| p.selections().len());
        let row = u16::try_from(menu_rows + 2).unwrap_or(u16::MAX);
        Ok((1, fit_row(row, height)))
    }
}
