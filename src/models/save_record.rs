//! On-disk snapshot of a game in progress.
//!
//! ```json
//! { "deck_name": "spanish_basic", "remaining": [{"en": "...", "es": "..."}], "score": 3 }
//! ```

use super::{Deck, Pair, PairKeys};
use crate::error::{DrillError, Result};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveRecord {
    pub deck_name: String,
    pub remaining: Vec<Pair>,
    pub score: u64,
    pub keys: PairKeys,
}

impl SaveRecord {
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("deck_name".to_string(), Value::String(self.deck_name.clone()));
        object.insert(
            "remaining".to_string(),
            Value::Array(self.remaining.iter().map(|p| p.to_json(&self.keys)).collect()),
        );
        object.insert("score".to_string(), Value::from(self.score));
        Value::Object(object)
    }

    /// `deck_name` and `remaining` are required; a missing `score` reads as 0.
    pub fn from_json(value: &Value, keys: &PairKeys) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| corrupt("top level is not an object"))?;

        let deck_name = match object.get("deck_name") {
            Some(Value::String(name)) => name.clone(),
            Some(_) => return Err(corrupt("'deck_name' is not a string")),
            None => return Err(corrupt("missing 'deck_name'")),
        };

        let remaining = match object.get("remaining") {
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| Pair::from_json(entry, keys).map_err(|reason| corrupt(&reason)))
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(corrupt("'remaining' is not a list")),
            None => return Err(corrupt("missing 'remaining'")),
        };

        let score = match object.get("score") {
            None | Some(Value::Null) => 0,
            Some(value) => value
                .as_u64()
                .ok_or_else(|| corrupt("'score' is not a non-negative integer"))?,
        };

        Ok(Self {
            deck_name,
            remaining,
            score,
            keys: keys.clone(),
        })
    }

    /// Rebuilds the loader's view of the saved deck plus the score to resume from.
    pub fn into_deck(self) -> (Deck, u64) {
        (Deck::new(&self.deck_name, self.remaining, self.keys), self.score)
    }
}

fn corrupt(reason: &str) -> DrillError {
    DrillError::CorruptSave(reason.to_string())
}
