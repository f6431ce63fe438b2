// src/error.rs

use std::path::PathBuf;

/// Failures from the surfaces around generation: host scenes and config files.
///
/// Generation itself never fails; odd parameters only produce odd fields.
#[derive(Debug, thiserror::Error)]
pub enum CloudFieldError {
    #[error("parent node {0} does not exist in the scene")]
    UnknownParent(String),

    #[error("host rejected cloud instance: {0}")]
    Host(String),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid cloud config: {0}")]
    Config(#[from] toml::de::Error),
}
