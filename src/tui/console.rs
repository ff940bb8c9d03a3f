//! Real terminal backend: crossterm, alternate screen, key mapping.
//!
//! This is the only module that touches the process's terminal. Keys are
//! read in raw mode, one press at a time; lines are read in cooked mode so
//! the user gets the terminal's own echo and editing.

use std::io::{self, BufRead, Stdout, Write};

use crossterm::cursor::{MoveTo, MoveToNextLine};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen, SetTitle,
};
use crossterm::{execute, queue};

use super::terminal::{KeyPress, Terminal};

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a key press the selection loop understands.
pub fn map_key(key: KeyEvent) -> KeyPress {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyPress::Interrupt;
    }

    match key.code {
        KeyCode::Char(c) => KeyPress::Char(c),
        KeyCode::Esc | KeyCode::Backspace => KeyPress::Back,
        _ => KeyPress::Other,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

/// Raw mode for the duration of one key read.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

// ============================================================================
// CONSOLE TERMINAL
// ============================================================================

/// The process's own terminal, in the alternate screen while alive.
pub struct ConsoleTerminal {
    out: Stdout,
}

impl ConsoleTerminal {
    /// Enter the alternate screen. Dropping the value leaves it again.
    pub fn setup() -> io::Result<Self> {
        install_panic_hook();
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(ConsoleTerminal { out })
    }
}

impl Drop for ConsoleTerminal {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

impl Terminal for ConsoleTerminal {
    fn clear(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(self.out, SetTitle(title))
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        execute!(self.out, MoveTo(column, row))
    }

    fn write_line(&mut self, text: &str, colour: Color) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(colour),
            Print(text),
            ResetColor,
            MoveToNextLine(1)
        )?;
        self.out.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_key(&mut self) -> io::Result<KeyPress> {
        let _raw = RawMode::enable()?;
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(map_key(key)),
                _ => {} // ignore releases, mouse, resize, etc.
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
