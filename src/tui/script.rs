//! In-memory terminal driven by a script of keys and lines.
//!
//! Keeps a character grid the size of the viewport so tests can ask what
//! is visible at a given cell, plus a log of every line written. Cloning
//! the handle shares the same screen, so a test can hand one clone to the
//! navigator and inspect the other afterwards.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use crossterm::style::Color;

use super::terminal::{KeyPress, Terminal};

/// One `write_line` call, as recorded by the scripted terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenLine {
    pub column: u16,
    pub row: u16,
    pub text: String,
    pub colour: Color,
}

#[derive(Debug)]
struct Screen {
    width: u16,
    height: u16,
    cells: Vec<Vec<char>>,
    cursor: (u16, u16),
    title: String,
    keys: VecDeque<KeyPress>,
    lines: VecDeque<String>,
    written: Vec<WrittenLine>,
    clears: usize,
}

impl Screen {
    fn blank(&mut self) {
        self.cells = vec![vec![' '; self.width as usize]; self.height as usize];
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedTerminal {
    screen: Rc<RefCell<Screen>>,
}

impl ScriptedTerminal {
    pub fn new(width: u16, height: u16) -> Self {
        let mut screen = Screen {
            width,
            height,
            cells: Vec::new(),
            cursor: (0, 0),
            title: String::new(),
            keys: VecDeque::new(),
            lines: VecDeque::new(),
            written: Vec::new(),
            clears: 0,
        };
        screen.blank();
        ScriptedTerminal {
            screen: Rc::new(RefCell::new(screen)),
        }
    }

    /// Queue one key press per character.
    pub fn with_keys(self, keys: &str) -> Self {
        self.push_keys(keys);
        self
    }

    /// Queue lines for `read_line`.
    pub fn with_lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.screen
            .borrow_mut()
            .lines
            .extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn push_keys(&self, keys: &str) {
        self.screen
            .borrow_mut()
            .keys
            .extend(keys.chars().map(KeyPress::Char));
    }

    pub fn push_key(&self, key: KeyPress) {
        self.screen.borrow_mut().keys.push_back(key);
    }

    /// Visible text of a row, trailing blanks removed.
    pub fn row_text(&self, row: u16) -> String {
        let screen = self.screen.borrow();
        screen
            .cells
            .get(row as usize)
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// Visible text in `[column, column + len)` of a row, blanks trimmed.
    pub fn text_at(&self, column: u16, row: u16, len: u16) -> String {
        let screen = self.screen.borrow();
        screen
            .cells
            .get(row as usize)
            .map(|cells| {
                cells
                    .iter()
                    .skip(column as usize)
                    .take(len as usize)
                    .collect::<String>()
                    .trim()
                    .to_string()
            })
            .unwrap_or_default()
    }

    /// Whether any visible row contains `needle`.
    pub fn shows(&self, needle: &str) -> bool {
        let height = self.screen.borrow().height;
        (0..height).any(|row| self.row_text(row).contains(needle))
    }

    pub fn written(&self) -> Vec<WrittenLine> {
        self.screen.borrow().written.clone()
    }

    pub fn title(&self) -> String {
        self.screen.borrow().title.clone()
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.screen.borrow().cursor
    }

    pub fn clears(&self) -> usize {
        self.screen.borrow().clears
    }

    pub fn keys_left(&self) -> usize {
        self.screen.borrow().keys.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn clear(&mut self) -> io::Result<()> {
        let mut screen = self.screen.borrow_mut();
        screen.blank();
        screen.cursor = (0, 0);
        screen.clears += 1;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        self.screen.borrow_mut().title = title.to_string();
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        let screen = self.screen.borrow();
        Ok((screen.width, screen.height))
    }

    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        self.screen.borrow_mut().cursor = (column, row);
        Ok(())
    }

    fn write_line(&mut self, text: &str, colour: Color) -> io::Result<()> {
        let mut screen = self.screen.borrow_mut();
        let (column, row) = screen.cursor;
        let width = screen.width as usize;
        if let Some(cells) = screen.cells.get_mut(row as usize) {
            for (offset, c) in text.chars().enumerate() {
                match cells.get_mut(column as usize + offset) {
                    Some(cell) if column as usize + offset < width => *cell = c,
                    _ => break,
                }
            }
        }
        screen.written.push(WrittenLine {
            column,
            row,
            text: text.to_string(),
            colour,
        });
        screen.cursor = (0, row.saturating_add(1));
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.screen.borrow_mut().lines.pop_front())
    }

    fn read_key(&mut self) -> io::Result<KeyPress> {
        Ok(self
            .screen
            .borrow_mut()
            .keys
            .pop_front()
            .unwrap_or(KeyPress::Interrupt))
    }
}
