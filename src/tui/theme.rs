//! Navigator colour constants.
//!
//! Plain data read by the writer, the display strategies and the demo.
//!
//! Colour semantics:
//! - Grey: default page titles and plain text
//! - Red: in-place error reports (bad key, too many pages)
//! - Cyan: root page title in the demo, interactive emphasis
//! - Green: banner art

use crossterm::style::Color;

/// Page title colour when a page does not choose one.
pub const TITLE_DEFAULT: Color = Color::Grey;

/// Body text: menu entries, prompts, action output.
pub const TEXT: Color = Color::Grey;

/// In-place error reports.
pub const ERROR: Color = Color::Red;

/// Emphasised titles.
pub const ACCENT: Color = Color::Cyan;

/// Banner art.
pub const BANNER: Color = Color::Green;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_stand_out_from_text() {
        assert_ne!(ERROR, TEXT);
        assert_eq!(TITLE_DEFAULT, Color::Grey);
    }
}
