//! multipage: a multi-column paging navigator for text-mode terminals.

pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod stack;
pub mod tui;
pub mod types;

pub use error::{NavError, Result};
pub use tui::display::{Breadcrumb, DisplayStrategy, FixedColumns};
pub use tui::navigator::Navigator;
pub use types::{Page, PageOptions, Selection};
