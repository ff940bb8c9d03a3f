//! Navigator configuration.
//!
//! Read from a JSON file (explicit path, or the per-user default location
//! when that file exists), then overridden by command-line flags.
//!
//! ```json
//! { "title": "Multi", "max_columns": 3, "style": "breadcrumb" }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tui::display::{Breadcrumb, DisplayStrategy, FixedColumns};

/// Config filename within the per-user config directory.
const CONFIG_FILENAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("max_columns must be at least 1")]
    NoColumns,
}

/// Which display strategy to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    /// Side-by-side columns.
    #[default]
    Fixed,
    /// One surface titled with the path.
    Breadcrumb,
}

impl StyleKind {
    pub fn strategy(self) -> Rc<dyn DisplayStrategy> {
        match self {
            StyleKind::Fixed => Rc::new(FixedColumns),
            StyleKind::Breadcrumb => Rc::new(Breadcrumb),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Terminal window title.
    pub title: String,
    /// Columns available to the right of the first page.
    pub max_columns: usize,
    pub style: StyleKind,
    /// Where to write tracing output. None disables logging.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Multi".to_string(),
            max_columns: 3,
            style: StyleKind::Fixed,
            log_file: None,
        }
    }
}

/// Returns the default config file location.
///
/// On Linux: ~/.config/multipage/config.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("multipage")
        .join(CONFIG_FILENAME)
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given; otherwise the default file if it exists;
    /// otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default = default_config_path();
                if default.is_file() {
                    Self::load(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        Ok(())
    }
}
