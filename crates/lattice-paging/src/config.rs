//! Mediator configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! indicator_text = "Fetching more…"
//! indicator_height = 36.0
//! prefetch_distance = 120.0
//! ```

use std::path::Path;

use lattice_paging_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::Color;

/// Height of the loading row while it is shown.
pub const DEFAULT_INDICATOR_HEIGHT: f32 = 30.0;

/// Text of the loading row.
pub const DEFAULT_INDICATOR_TEXT: &str = "Loading...";

/// Tunables for a [`PagingMediator`](crate::PagingMediator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediatorConfig {
    /// Height of the loading row while the indicator is shown.
    pub indicator_height: f32,
    /// Text shown in the loading row.
    pub indicator_text: String,
    /// Text color of the loading row.
    pub indicator_color: Color,
    /// Row height used when neither the observer nor the widget can answer.
    pub fallback_row_height: f32,
    /// Start loading this far before the end of the content. Zero waits
    /// until the end is actually reached.
    pub prefetch_distance: f32,
    /// Whether start/stop reload the widget when no flag is passed.
    pub updates_table: bool,
}

impl Default for MediatorConfig {
    fn default() -> Self {
        Self {
            indicator_height: DEFAULT_INDICATOR_HEIGHT,
            indicator_text: DEFAULT_INDICATOR_TEXT.to_string(),
            indicator_color: Color::RED,
            fallback_row_height: crate::view::DEFAULT_ROW_HEIGHT,
            prefetch_distance: 0.0,
            updates_table: true,
        }
    }
}

impl MediatorConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loading mediator config");
        Self::from_toml_str(&source)
    }

    /// Serializes the config to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("indicator_height", self.indicator_height),
            ("fallback_row_height", self.fallback_row_height),
            ("prefetch_distance", self.prefetch_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid_value(
                    field,
                    format!("expected a finite, non-negative number, got {value}"),
                ));
            }
        }
        if self.indicator_text.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "indicator_text",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Sets the indicator height.
    pub fn with_indicator_height(mut self, height: f32) -> Self {
        self.indicator_height = height;
        self
    }

    /// Sets the indicator text.
    pub fn with_indicator_text(mut self, text: impl Into<String>) -> Self {
        self.indicator_text = text.into();
        self
    }

    /// Sets the indicator text color.
    pub fn with_indicator_color(mut self, color: Color) -> Self {
        self.indicator_color = color;
        self
    }

    /// Sets the fallback row height.
    pub fn with_fallback_row_height(mut self, height: f32) -> Self {
        self.fallback_row_height = height;
        self
    }

    /// Sets the prefetch distance.
    pub fn with_prefetch_distance(mut self, distance: f32) -> Self {
        self.prefetch_distance = distance;
        self
    }

    /// Sets the default for the `updates_table` flag.
    pub fn with_updates_table(mut self, updates_table: bool) -> Self {
        self.updates_table = updates_table;
        self
    }
}
