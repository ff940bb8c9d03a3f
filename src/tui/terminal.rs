//! The terminal capability consumed by the navigator.
//!
//! Everything the engine needs from a terminal fits in one small trait:
//! clear, title, size, cursor placement, coloured line output, and two
//! blocking reads. `ConsoleTerminal` drives a real terminal; the scripted
//! implementation backs the tests.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crossterm::style::Color;

/// A single key press, reduced to what the selection loop cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// A printable character.
    Char(char),
    /// Go back one page.
    Back,
    /// End the session (Ctrl+C, or the key source is exhausted).
    Interrupt,
    /// Anything else.
    Other,
}

pub trait Terminal {
    /// Blank the whole screen and home the cursor.
    fn clear(&mut self) -> io::Result<()>;

    fn set_title(&mut self, title: &str) -> io::Result<()>;

    /// Viewport as (width, height) in cells.
    fn size(&self) -> io::Result<(u16, u16)>;

    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()>;

    /// Write `text` at the cursor in `colour`, then move to the next line.
    fn write_line(&mut self, text: &str, colour: Color) -> io::Result<()>;

    /// Block for a line of input. `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Block for a single key press.
    fn read_key(&mut self) -> io::Result<KeyPress>;
}

/// Single-threaded handle shared by the navigator and its writers.
pub type SharedTerminal = Rc<RefCell<dyn Terminal>>;

/// Wrap a terminal so the navigator and writers can share it.
pub fn shared<T: Terminal + 'static>(terminal: T) -> SharedTerminal {
    Rc::new(RefCell::new(terminal))
}
