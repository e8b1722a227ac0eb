//! Deck source files kept in the deck directory.
use crate::error::Result;
use crate::import::parse_deck_source;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct DeckLibrary {
    dir: PathBuf,
}

impl DeckLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves a deck file name relative to the deck directory.
    /// Absolute paths are returned unchanged.
    pub fn path_for(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// `*.json` files in the deck directory, sorted by file name.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut decks = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
                decks.push(path);
            }
        }
        decks.sort();
        Ok(decks)
    }

    /// Reads and parses a deck source file.
    pub fn read(&self, path: &Path) -> Result<Value> {
        let contents = fs::read_to_string(path)?;
        let raw = parse_deck_source(&contents)?;
        log::debug!("Read deck source {}", path.display());
        Ok(raw)
    }
}
