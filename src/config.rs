//! App configuration read from `card_match.toml`.
//!
//! ```toml
//! deck_dir = "decks"
//! saves_dir = "saves"
//! default_deck = "spanish_basic.json"
//! # seed = 42
//!
//! [pair_keys]
//! source = "en"
//! target = "es"
//! ```

use crate::error::{DrillError, Result};
use crate::models::PairKeys;
use crate::storage::{DeckLibrary, SaveStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "card_match.toml";

/// Missing fields fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding deck source files.
    pub deck_dir: PathBuf,

    /// Directory save files are written to. Kept apart from `deck_dir`.
    pub saves_dir: PathBuf,

    /// Deck file opened by "New Game", relative to `deck_dir`.
    pub default_deck: Option<String>,

    /// Fixed RNG seed for reproducible pick order.
    pub seed: Option<u64>,

    pub pair_keys: PairKeys,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deck_dir: PathBuf::from("decks"),
            saves_dir: PathBuf::from("saves"),
            default_deck: Some("spanish_basic.json".to_string()),
            seed: None,
            pair_keys: PairKeys::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.deck_dir.as_os_str().is_empty() {
            return Err(DrillError::Config("deck_dir must not be empty".to_string()));
        }
        if self.saves_dir.as_os_str().is_empty() {
            return Err(DrillError::Config("saves_dir must not be empty".to_string()));
        }
        if self.pair_keys.source.trim().is_empty() || self.pair_keys.target.trim().is_empty() {
            return Err(DrillError::Config(
                "pair_keys.source and pair_keys.target must be non-empty".to_string(),
            ));
        }
        if self.pair_keys.source == self.pair_keys.target {
            return Err(DrillError::Config(
                "pair_keys.source and pair_keys.target must differ".to_string(),
            ));
        }
        Ok(())
    }

    pub fn save_store(&self) -> SaveStore {
        SaveStore::new(&self.saves_dir)
    }

    pub fn deck_library(&self) -> DeckLibrary {
        DeckLibrary::new(&self.deck_dir)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AppConfig::default()`.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        let cfg = AppConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&contents)
        .map_err(|e| DrillError::Config(format!("parse {}: {}", path.display(), e)))?;
    cfg.validate()?;
    Ok(cfg)
}
