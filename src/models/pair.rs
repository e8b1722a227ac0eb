//! Pair is a <source, target> couple: the prompt shown and the answer expected.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pair {
    pub source: String,
    pub target: String,
}

impl Pair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// True when `input` equals the target after trimming and case-folding both.
    /// A blank target never matches.
    pub fn is_answered_by(&self, input: &str) -> bool {
        let expected = normalize_answer(&self.target);
        !expected.is_empty() && normalize_answer(input) == expected
    }

    /// Reads a pair from a JSON object. Missing keys become empty strings.
    pub fn from_json(value: &Value, keys: &PairKeys) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| format!("pair entry is not an object: {}", value))?;

        let field = |key: &str| match object.get(key) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(format!("field '{}' is not a string: {}", key, other)),
        };

        Ok(Self {
            source: field(&keys.source)?,
            target: field(&keys.target)?,
        })
    }

    pub fn to_json(&self, keys: &PairKeys) -> Value {
        let mut object = Map::new();
        object.insert(keys.source.clone(), Value::String(self.source.clone()));
        object.insert(keys.target.clone(), Value::String(self.target.clone()));
        Value::Object(object)
    }
}

/// JSON field names used for the two sides of a pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairKeys {
    pub source: String,
    pub target: String,
}

impl Default for PairKeys {
    fn default() -> Self {
        Self {
            source: "en".to_string(),
            target: "es".to_string(),
        }
    }
}

pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}
