//! Converts a two-column CSV word list into a JSON deck file.
//!
//! Output shape: `{"deck_name": "...", "pairs": [{"en": "...", "es": "..."}, ...]}`,
//! which the deck loader accepts as a single named deck.

use crate::error::{DrillError, Result};
use crate::models::{Pair, PairKeys};
use serde_json::{Map, Value};
use std::fs;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_DECK_NAME: &str = "Spanish Basics";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckFile {
    pub deck_name: String,
    pub pairs: Vec<Pair>,
    /// Column headers, reused as the pair field names.
    pub keys: PairKeys,
}

impl DeckFile {
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("deck_name".to_string(), Value::String(self.deck_name.clone()));
        object.insert(
            "pairs".to_string(),
            Value::Array(self.pairs.iter().map(|p| p.to_json(&self.keys)).collect()),
        );
        Value::Object(object)
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let json_string = serde_json::to_string_pretty(&self.to_json())
            .map_err(|e| DrillError::MalformedDeck(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json_string)?;
        Ok(())
    }
}

/// Reads CSV with a header row and picks the `columns.source` / `columns.target`
/// columns by header name (trimmed, case-insensitive). Cell text is kept as is.
pub fn convert<R: Read>(reader: R, deck_name: &str, columns: &PairKeys) -> Result<DeckFile> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let find = |wanted: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted.trim()))
            .ok_or_else(|| {
                DrillError::MalformedDeck(format!("CSV has no '{}' column", wanted))
            })
    };
    let source_col = find(&columns.source)?;
    let target_col = find(&columns.target)?;

    let mut pairs = Vec::new();
    for result in reader.records() {
        let record = result?;
        pairs.push(Pair::new(
            record.get(source_col).unwrap_or(""),
            record.get(target_col).unwrap_or(""),
        ));
    }

    Ok(DeckFile {
        deck_name: deck_name.to_string(),
        pairs,
        keys: columns.clone(),
    })
}

/// Converts `input` and writes the deck JSON to `output`.
pub fn convert_file(
    input: &Path,
    output: &Path,
    deck_name: &str,
    columns: &PairKeys,
) -> Result<DeckFile> {
    let file = fs::File::open(input)?;
    let deck_file = convert(file, deck_name, columns)?;
    deck_file.write_to_path(output)?;
    log::info!(
        "Converted {} -> {} ({} pairs)",
        input.display(),
        output.display(),
        deck_file.pairs.len()
    );
    Ok(deck_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::deck_loader::{normalize, parse_deck_source};
    use serde_json::json;

    #[test]
    fn test_convert_basic() {
        let csv = "en,es\nhouse,casa\ncat,gato\n";
        let deck_file = convert(csv.as_bytes(), "Spanish Basics", &PairKeys::default()).unwrap();

        assert_eq!(deck_file.deck_name, "Spanish Basics");
        assert_eq!(
            deck_file.pairs,
            vec![Pair::new("house", "casa"), Pair::new("cat", "gato")]
        );
        assert_eq!(
            deck_file.to_json(),
            json!({
                "deck_name": "Spanish Basics",
                "pairs": [{"en": "house", "es": "casa"}, {"en": "cat", "es": "gato"}]
            })
        );
    }

    #[test]
    fn test_columns_found_by_header_in_any_order() {
        let csv = "notes,ES,En\nx,casa,house\n";
        let deck_file = convert(csv.as_bytes(), "d", &PairKeys::default()).unwrap();
        assert_eq!(deck_file.pairs, vec![Pair::new("house", "casa")]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let csv = "en,es\nlonely\n";
        let deck_file = convert(csv.as_bytes(), "d", &PairKeys::default()).unwrap();
        assert_eq!(deck_file.pairs, vec![Pair::new("lonely", "")]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "english,spanish\nhouse,casa\n";
        let result = convert(csv.as_bytes(), "d", &PairKeys::default());
        assert!(matches!(result, Err(DrillError::MalformedDeck(_))));
    }

    #[test]
    fn test_output_loads_as_deck() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("spanish_basic.csv");
        let output = dir.path().join("decks").join("spanish_basic.json");
        fs::write(&input, "en,es\nhello,hola\nthank you,gracias\n").unwrap();

        convert_file(&input, &output, "Spanish Basics", &PairKeys::default()).unwrap();

        let raw = parse_deck_source(&fs::read_to_string(&output).unwrap()).unwrap();
        let deck = normalize(&raw, None, &PairKeys::default()).unwrap();
        assert_eq!(deck.name, "Spanish Basics");
        assert_eq!(deck.pairs.len(), 2);
        assert_eq!(deck.pairs[1], Pair::new("thank you", "gracias"));
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = convert_file(
            &dir.path().join("missing.csv"),
            &dir.path().join("out.json"),
            "d",
            &PairKeys::default(),
        );
        assert!(matches!(result, Err(DrillError::Io(_))));
    }
}
