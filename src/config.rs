//! Runtime settings.
//!
//! winplace deliberately reads no configuration file: every run starts from
//! the compiled-in defaults and applies the overrides given on the command
//! line.  The settings serialize so a dry run can print them next to the
//! plan:
//!
//! ```json
//! {
//!   "decoration": { "border": 2, "title": 13 },
//!   "dry_run": false
//! }
//! ```

use crate::placement::Decoration;
use serde::Serialize;

/// Top-level settings for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Frame thickness used by the placement arithmetic.
    pub decoration: Decoration,

    /// Compute and print the placement without touching the window.
    pub dry_run: bool,
}

/// Command-line overrides applied on top of [`Config::default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub border: Option<i32>,
    pub title: Option<i32>,
    pub dry_run: bool,
}

impl Config {
    /// Build the settings for this run from the defaults and `overrides`.
    pub fn resolve(overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(border) = overrides.border {
            config.decoration.border = border;
        }
        if let Some(title) = overrides.title {
            config.decoration.title = title;
        }
        config.dry_run = overrides.dry_run;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.decoration.border < 0 {
            return Err(ConfigError(format!(
                "border must not be negative (got {})",
                self.decoration.border
            )));
        }
        if self.decoration.title < 0 {
            return Err(ConfigError(format!(
                "title must not be negative (got {})",
                self.decoration.title
            )));
        }
        Ok(())
    }
}

/// Invalid runtime settings.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
