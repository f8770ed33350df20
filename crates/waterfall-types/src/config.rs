//! Widget configuration loaded from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, WaterfallError};

/// Where the column-count width is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthSource {
    /// The host viewport width (document body client width).
    #[default]
    Viewport,
    /// The container's own measured width, falling back to the viewport.
    Container,
}

/// Configuration for a single waterfall widget (`waterfall.toml`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WaterfallConfig {
    /// Selector locating the container element.
    #[serde(default = "default_selector")]
    pub selector: String,
    /// Minimum width of a column in pixels.
    #[serde(default = "default_min_column_width")]
    pub min_column_width: u32,
    /// Extra CSS rules appended after the base layout rules.
    #[serde(default)]
    pub extra_styles: String,
    /// Width used to derive the column count.
    #[serde(default)]
    pub width_source: WidthSource,
}

fn default_selector() -> String {
    ".waterfall__container".to_string()
}
fn default_min_column_width() -> u32 {
    500
}

impl Default for WaterfallConfig {
    fn default() -> Self {
        Self {
            selector: default_selector(),
            min_column_width: default_min_column_width(),
            extra_styles: String::new(),
            width_source: WidthSource::default(),
        }
    }
}

impl WaterfallConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded waterfall config from {}", path.display());
        Ok(config)
    }

    /// Reject values the layout engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.selector.trim().is_empty() {
            return Err(WaterfallError::Config("selector must not be empty".into()));
        }
        if self.min_column_width == 0 {
            return Err(WaterfallError::Config(
                "min_column_width must be positive".into(),
            ));
        }
        Ok(())
    }
}
