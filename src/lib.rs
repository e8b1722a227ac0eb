pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod storage;

pub use error::{DrillError, Result};
pub use models::{Deck, GameSession, Pair, PairKeys, SaveRecord};
