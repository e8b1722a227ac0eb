//! Save files: one `<name>.json` per saved game inside the saves directory.

use crate::error::{DrillError, Result};
use crate::models::{PairKeys, SaveRecord};
use chrono::{DateTime, Local};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct SaveStore {
    dir: PathBuf,
}

/// A save file found on disk.
#[derive(Clone, Debug)]
pub struct SaveEntry {
    pub name: String,
    pub modified: DateTime<Local>,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maps a save name to `<dir>/<name>.json`.
    /// Names that could escape the saves directory are rejected.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\', '\0']);
        if invalid {
            return Err(DrillError::Io(io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid save name '{}'", name),
            )));
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }

    /// Writes the record as pretty-printed JSON and returns the file path.
    pub fn write(&self, record: &SaveRecord, name: &str) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir)?;

        let json_string = serde_json::to_string_pretty(&record.to_json())
            .map_err(|e| DrillError::Io(io::Error::new(ErrorKind::InvalidData, e)))?;
        fs::write(&path, json_string)?;

        log::info!(
            "Saved '{}' ({} remaining, score {}) to {}",
            record.deck_name,
            record.remaining.len(),
            record.score,
            path.display()
        );
        Ok(path)
    }

    /// Loads `<name>.json`. Only an exact filename match is accepted.
    pub fn read(&self, name: &str, keys: &PairKeys) -> Result<SaveRecord> {
        let path = self.path_for(name)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DrillError::SaveNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let value: serde_json::Value = serde_json::from_str(&contents)
            .map_err(|e| DrillError::CorruptSave(format!("{}: {}", path.display(), e)))?;
        let record = SaveRecord::from_json(&value, keys)?;

        log::info!("Loaded save '{}' from {}", name, path.display());
        Ok(record)
    }

    /// Lists saves, newest first. A missing directory has no saves.
    pub fn list(&self) -> Result<Vec<SaveEntry>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut saves = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let modified: DateTime<Local> = entry.metadata()?.modified()?.into();
            saves.push(SaveEntry {
                name: name.to_string(),
                modified,
            });
        }

        saves.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
        Ok(saves)
    }
}

/// Formats a save time as `YYYY-MM-DD HH:MM`.
pub fn format_modified(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}
