//! Error types for the waterfall layout engine.

use std::io;

/// Errors produced by the waterfall crates.
#[derive(Debug, thiserror::Error)]
pub enum WaterfallError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("selector error: {0}")]
    Selector(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, WaterfallError>;
