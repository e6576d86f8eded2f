//! Runtime configuration loaded from JSON.
//!
//! Every field has a default, so a partial file (or none at all) works.

use crate::constants::*;
use crate::error::ConfigError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// Names and timings used by a battle session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub player_name: String,
    pub opponent_name: String,
    /// Delay before the opponent picks automatically.
    pub opponent_delay_ms: u64,
    /// Battle start / new battle banner.
    pub announce_ms: u64,
    /// Choice confirmations and cooldown rejections.
    pub notice_ms: u64,
    /// Victory and defeat banners.
    pub result_notice_ms: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            player_name: "Hero".to_string(),
            opponent_name: "Rival".to_string(),
            opponent_delay_ms: OPPONENT_DELAY_MS,
            announce_ms: ANNOUNCE_NOTICE_MS,
            notice_ms: CHOICE_NOTICE_MS,
            result_notice_ms: RESULT_NOTICE_MS,
        }
    }
}

/// Top-level configuration for the terminal game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub battle: BattleConfig,
    /// Input poll interval of the terminal loop.
    pub frame_ms: u64,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            frame_ms: FRAME_MS,
            log_filter: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Platform config location, e.g. `~/.config/elemental-duel/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Parses a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `explicit` if given, otherwise the default location.
    /// A missing default file yields the defaults; an explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "elemental-duel")
}
