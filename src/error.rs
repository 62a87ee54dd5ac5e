use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or resolving layout data.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed layout data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("layout has no captions for language '{0}'")]
    UnknownLanguage(String),

    #[error("layout contains no keys")]
    Empty,
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference storage is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum KeyboardError {
    /// The first layout could not be loaded, so there is nothing to render.
    #[error("keyboard initialization failed for language '{language}': {source}")]
    Init {
        language: String,
        #[source]
        source: LayoutError,
    },

    #[error("layout switch failed: {0}")]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error("invalid keyboard configuration: {0}")]
    Config(String),
}

pub type Result<T, E = KeyboardError> = std::result::Result<T, E>;
