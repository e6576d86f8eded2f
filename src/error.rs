//! Error types for the battle library and its configuration layer.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected text input when naming an action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BattleError {
    #[error("unknown action `{0}`")]
    UnknownAction(String),
}

/// Failures while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
