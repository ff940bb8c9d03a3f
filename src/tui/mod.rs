//! Terminal navigator: column writers, display strategies, the run loop.
//!
//! Organized along the same effect boundary throughout:
//! - `terminal`: the capability trait every drawing call goes through
//! - `console` / `script`: the real terminal and the in-memory one
//! - `writer`, `display`, `navigator`: the engine, written against the trait

pub mod console;
pub mod display;
pub mod navigator;
pub mod script;
pub mod terminal;
pub mod theme;
pub mod writer;
