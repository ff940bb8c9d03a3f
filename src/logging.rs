//! Tracing setup.
//!
//! The terminal belongs to the UI, so events go to a file or nowhere.
//! The filter comes from `RUST_LOG`, defaulting to info for this crate.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub fn default_filter() -> EnvFilter {
    EnvFilter::new(format!("warn,{}=info", env!("CARGO_CRATE_NAME")))
}

/// Open (appending) the log file and install it as the global subscriber.
///
/// Installing twice is harmless: the second attempt is ignored.
pub fn init(path: &Path) -> io::Result<()> {
    let file = open_log(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init();

    tracing::info!(path = %path.display(), "logging initialised");
    Ok(())
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
