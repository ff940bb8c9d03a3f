//! Column writer: line output and integer input bound to one column.
//!
//! A writer is cheap and short-lived. It remembers the column's left edge
//! and width, the next row to use, and whether any `get` so far came back
//! empty, which lets a caller prompt for several values and report a bad
//! one only once at the end through `check`.

use std::io;

use crossterm::style::Color;

use super::terminal::SharedTerminal;
use super::theme;

/// Reported in place of a result after bad input, and for bad selections.
pub const INVALID_INPUT: &str = "Invalid input.";

/// `row` if it is on screen, otherwise the first row below the title.
pub fn fit_row(row: u16, height: u16) -> u16 {
    if row < height {
        row
    } else {
        1.min(height.saturating_sub(1))
    }
}

/// Parse one line of user input as an integer. Empty or non-numeric is `None`.
pub fn parse_int(line: &str) -> Option<i64> {
    line.trim().parse().ok()
}

pub struct Writer {
    terminal: SharedTerminal,
    row: u16,
    column_offset: u16,
    column_width: u16,
    height: u16,
    bad_input: bool,
}

impl Writer {
    /// A writer for the column starting at `column_offset`, beginning at `row`.
    ///
    /// A `row` past the bottom of the viewport starts at row 1 instead.
    pub fn new(
        terminal: SharedTerminal,
        column_offset: u16,
        column_width: u16,
        row: u16,
    ) -> io::Result<Self> {
        let (_, height) = terminal.borrow().size()?;
        Ok(Writer {
            terminal,
            row: fit_row(row, height),
            column_offset,
            column_width,
            height,
            bad_input: false,
        })
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn set_row(&mut self, row: u16) {
        self.row = fit_row(row, self.height);
    }

    pub fn column_offset(&self) -> u16 {
        self.column_offset
    }

    pub fn column_width(&self) -> u16 {
        self.column_width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn had_bad_input(&self) -> bool {
        self.bad_input
    }

    /// Write one line in the body colour.
    pub fn out(&mut self, text: &str) -> io::Result<()> {
        self.out_coloured(text, theme::TEXT)
    }

    /// Write one line, clipped to the column width.
    pub fn out_coloured(&mut self, text: &str, colour: Color) -> io::Result<()> {
        let clipped: String = text.chars().take(self.column_width as usize).collect();
        {
            let mut terminal = self.terminal.borrow_mut();
            terminal.move_to(self.column_offset, self.row)?;
            terminal.write_line(&clipped, colour)?;
        }
        self.advance();
        Ok(())
    }

    /// Overwrite the current row of this column with spaces.
    pub fn blank(&mut self) -> io::Result<()> {
        let spaces = " ".repeat(self.column_width as usize);
        self.out(&spaces)
    }

    /// Read an integer on the current row.
    ///
    /// `None` for empty, non-numeric, or exhausted input; that also marks
    /// the writer so a later `check` reports invalid input.
    pub fn get(&mut self) -> io::Result<Option<i64>> {
        let value = self.read_int()?;
        if value.is_none() {
            self.bad_input = true;
        }
        Ok(value)
    }

    /// Read integers, one per row, until a non-numeric line.
    ///
    /// The terminating line is not an error and does not mark the writer.
    pub fn get_list(&mut self) -> io::Result<Vec<i64>> {
        let mut values = Vec::new();
        while let Some(value) = self.read_int()? {
            values.push(value);
        }
        Ok(values)
    }

    /// Write `message`, or the invalid-input notice if any `get` failed.
    pub fn check(&mut self, message: &str) -> io::Result<()> {
        if self.bad_input {
            self.out(INVALID_INPUT)
        } else {
            self.out(message)
        }
    }

    fn read_int(&mut self) -> io::Result<Option<i64>> {
        let line = {
            let mut terminal = self.terminal.borrow_mut();
            terminal.move_to(self.column_offset, self.row)?;
            terminal.read_line()?
        };
        self.advance();
        Ok(line.as_deref().and_then(parse_int))
    }

    /// Next row, wrapping to row 1 rather than running off the bottom.
    fn advance(&mut self) {
        self.row = fit_row(self.row.saturating_add(1), self.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::script::ScriptedTerminal;
    use crate::tui::terminal::shared;

    fn writer_on(term: &ScriptedTerminal, offset: u16) -> Writer {
        Writer::new(shared(term.clone()), offset, 20, 0).unwrap()
    }

    #[test]
    fn parse_int_accepts_signed_and_padded() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int(" -7 "), Some(-7));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("x"), None);
        assert_eq!(parse_int("4.5"), None);
    }

    #[test]
    fn out_writes_at_column_and_advances() {
        let term = ScriptedTerminal::new(40, 10);
        let mut writer = writer_on(&term, 20);
        writer.out("first").unwrap();
        writer.out("second").unwrap();
        assert_eq!(term.text_at(20, 0, 20), "first");
        assert_eq!(term.text_at(20, 1, 20), "second");
        assert_eq!(writer.row(), 2);
    }

    #[test]
    fn out_clips_to_column_width() {
        let term = ScriptedTerminal::new(40, 10);
        let mut writer = Writer::new(shared(term.clone()), 0, 10, 0).unwrap();
        writer.out("a very long line indeed").unwrap();
        assert_eq!(term.row_text(0), "a very lon");
    }

    #[test]
    fn rows_wrap_to_one_at_the_bottom() {
        let term = ScriptedTerminal::new(40, 3);
        let mut writer = writer_on(&term, 0);
        writer.out("a").unwrap();
        writer.out("b").unwrap();
        assert_eq!(writer.row(), 2);
        writer.out("c").unwrap();
        assert_eq!(writer.row(), 1);
        writer.out("d").unwrap();
        assert_eq!(term.row_text(1), "d");
    }

    #[test]
    fn start_row_below_the_screen_begins_at_one() {
        let term = ScriptedTerminal::new(40, 6);
        let mut writer = Writer::new(shared(term.clone()), 0, 20, 7).unwrap();
        assert_eq!(writer.row(), 1);
        writer.out("RESULT").unwrap();
        assert_eq!(term.row_text(1), "RESULT");
    }

    #[test]
    fn fit_row_keeps_rows_on_screen() {
        assert_eq!(fit_row(5, 6), 5);
        assert_eq!(fit_row(6, 6), 1);
        assert_eq!(fit_row(3, 1), 0);
    }

    #[test]
    fn get_list_stops_at_first_non_number() {
        let term = ScriptedTerminal::new(40, 10).with_lines(["3", "5", "x"]);
        let mut writer = writer_on(&term, 0);
        assert_eq!(writer.get_list().unwrap(), vec![3, 5]);
        assert!(!writer.had_bad_input());
    }

    #[test]
    fn get_list_can_be_empty() {
        let term = ScriptedTerminal::new(40, 10).with_lines(["x"]);
        let mut writer = writer_on(&term, 0);
        assert!(writer.get_list().unwrap().is_empty());
    }

    #[test]
    fn get_list_ends_at_end_of_input() {
        let term = ScriptedTerminal::new(40, 10).with_lines(["1", "2"]);
        let mut writer = writer_on(&term, 0);
        assert_eq!(writer.get_list().unwrap(), vec![1, 2]);
    }

    #[test]
    fn check_reports_earlier_bad_input_even_after_good_input() {
        let term = ScriptedTerminal::new(40, 10).with_lines(["oops", "4"]);
        let mut writer = writer_on(&term, 0);
        assert_eq!(writer.get().unwrap(), None);
        assert_eq!(writer.get().unwrap(), Some(4));
        writer.check("Answer: 4").unwrap();
        assert_eq!(term.row_text(2), INVALID_INPUT);
        assert!(!term.shows("Answer"));
    }

    #[test]
    fn check_passes_message_through_on_good_input() {
        let term = ScriptedTerminal::new(40, 10).with_lines(["2", "3"]);
        let mut writer = writer_on(&term, 0);
        let a = writer.get().unwrap().unwrap();
        let b = writer.get().unwrap().unwrap();
        writer.check(&format!("Answer: {}", a + b)).unwrap();
        assert_eq!(term.row_text(2), "Answer: 5");
    }

    #[test]
    fn empty_line_is_missing_value() {
        let term = ScriptedTerminal::new(40, 10).with_lines([""]);
        let mut writer = writer_on(&term, 0);
        assert_eq!(writer.get().unwrap(), None);
        assert!(writer.had_bad_input());
    }
}
