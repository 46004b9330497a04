//! Settings for the formgrid binary, read from an optional TOML file.
//!
//! We look for a formgrid.toml in the working directory and load settings from it if present.
//! This provides the default template, output formatting and log verbosity.

use facet::Facet;
use std::fs;
use std::path::Path;
use tracing::warn;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "formgrid.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from formgrid.toml or falling back to defaults.
pub struct Config {
    #[facet(default = String::new())]
    /// Template JSON loaded when none is given on the command line; empty for none.
    pub template_path: String,
    #[facet(default = true)]
    /// Whether the final snapshot is pretty-printed.
    pub pretty: bool,
    #[facet(default = "warn".to_string())]
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

// Must agree with the `#[facet(default)]` values above.
impl Default for Config {
    fn default() -> Self {
        Self {
            template_path: String::new(),
            pretty: true,
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from formgrid.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, using defaults if it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
            config
        } else {
            warn!(path = %path.display(), "ignoring malformed config");
            Self::default()
        }
    }

    #[must_use]
    /// Configured template location, if one is set.
    pub fn template(&self) -> Option<&Path> {
        (!self.template_path.is_empty()).then(|| Path::new(&self.template_path))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
