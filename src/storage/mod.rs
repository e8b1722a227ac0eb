pub mod decks;
pub mod saves;

pub use decks::DeckLibrary;
pub use saves::{SaveEntry, SaveStore};
