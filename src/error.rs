//! Error taxonomy shared by the loader, the save store and the converter.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    #[error("Malformed deck: {0}")]
    MalformedDeck(String),

    #[error("Deck '{0}' not found")]
    DeckNotFound(String),

    #[error("Save file '{0}' not found")]
    SaveNotFound(String),

    #[error("Corrupt save file: {0}")]
    CorruptSave(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DrillError>;
