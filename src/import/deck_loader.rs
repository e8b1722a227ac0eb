//! Normalizes a parsed deck source into a single named [`Deck`].
//!
//! Accepted shapes:
//! - named decks: `{"spanish_basic": [{"en": "hello", "es": "hola"}, ...], ...}`
//! - a bare list: `[{"en": "hello", "es": "hola"}, ...]`
//! - converter output: `{"deck_name": "Spanish Basics", "pairs": [...]}`
//!
//! The named map is the canonical form; the other two are adapted into it.
//! An object whose only key is `"pairs"` reads as converter output with no
//! `deck_name`; it is named `"deck"` but can also be requested as `"pairs"`.

use crate::error::{DrillError, Result};
use crate::models::deck::FALLBACK_DECK_NAME;
use crate::models::{Deck, Pair, PairKeys};
use serde_json::{Map, Value};

/// Parses deck source text. Invalid JSON is reported as a malformed deck.
pub fn parse_deck_source(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| DrillError::MalformedDeck(e.to_string()))
}

/// Deck names a caller may request, in file order.
pub fn deck_names(raw: &Value) -> Vec<String> {
    match raw {
        Value::Object(object) => match as_wrapper(object) {
            Some((name, _, _)) => vec![name],
            None => object.keys().cloned().collect(),
        },
        Value::Array(_) => vec![FALLBACK_DECK_NAME.to_string()],
        _ => Vec::new(),
    }
}

/// Resolves which deck to play and returns an owned copy of its pairs.
///
/// A blank `requested` name is treated as no request.
pub fn normalize(raw: &Value, requested: Option<&str>, keys: &PairKeys) -> Result<Deck> {
    let requested = requested.filter(|name| !name.trim().is_empty());

    let (name, list) = match raw {
        Value::Array(_) => (requested.unwrap_or(FALLBACK_DECK_NAME).to_string(), raw),
        Value::Object(object) => match as_wrapper(object) {
            Some((name, list, named)) => match requested {
                None => (name, list),
                Some(wanted) if wanted == name => (name, list),
                Some("pairs") if !named => ("pairs".to_string(), list),
                Some(wanted) => return Err(DrillError::DeckNotFound(wanted.to_string())),
            },
            None => resolve_named(object, requested)?,
        },
        other => {
            return Err(DrillError::MalformedDeck(format!(
                "expected a list of pairs or a map of decks, found {}",
                json_kind(other)
            )));
        }
    };

    let pairs = pairs_from_list(&name, list, keys)?;
    log::debug!("Normalized deck '{}' with {} pairs", name, pairs.len());
    Ok(Deck::new(&name, pairs, keys.clone()))
}

fn resolve_named<'a>(
    object: &'a Map<String, Value>,
    requested: Option<&str>,
) -> Result<(String, &'a Value)> {
    match requested {
        Some(name) => match object.get(name) {
            Some(Value::Array(list)) if list.is_empty() => {
                Err(DrillError::DeckNotFound(name.to_string()))
            }
            Some(Value::Null) | None => Err(DrillError::DeckNotFound(name.to_string())),
            Some(list) => Ok((name.to_string(), list)),
        },
        // First key in file order is the convenience default
        None => object
            .iter()
            .next()
            .map(|(name, list)| (name.clone(), list))
            .ok_or_else(|| DrillError::MalformedDeck("deck file contains no decks".to_string())),
    }
}

/// Recognizes `{"deck_name": ..., "pairs": [...]}`. `deck_name` is optional;
/// the flag reports whether it was given.
fn as_wrapper(object: &Map<String, Value>) -> Option<(String, &Value, bool)> {
    let pairs = object.get("pairs").filter(|v| v.is_array())?;
    if object.keys().any(|k| k != "pairs" && k != "deck_name") {
        return None;
    }
    let name = match object.get("deck_name") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return None,
    };
    let named = name.is_some();
    Some((
        name.unwrap_or_else(|| FALLBACK_DECK_NAME.to_string()),
        pairs,
        named,
    ))
}

fn pairs_from_list(name: &str, list: &Value, keys: &PairKeys) -> Result<Vec<Pair>> {
    let entries = list.as_array().ok_or_else(|| {
        DrillError::MalformedDeck(format!(
            "deck '{}' is {}, not a list of pairs",
            name,
            json_kind(list)
        ))
    })?;

    entries
        .iter()
        .map(|entry| {
            Pair::from_json(entry, keys)
                .map_err(|reason| DrillError::MalformedDeck(format!("deck '{}': {}", name, reason)))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
