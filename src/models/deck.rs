//! Deck is a named, ordered list of pairs as produced by the loader
use super::{Pair, PairKeys};

pub const FALLBACK_DECK_NAME: &str = "deck";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    pub name: String,
    pub pairs: Vec<Pair>,
    /// Field names the pairs were read with; saves are written with the same ones.
    pub keys: PairKeys,
}

impl Deck {
    /// Blank names are replaced by the `"deck"` placeholder.
    pub fn new(name: &str, pairs: Vec<Pair>, keys: PairKeys) -> Self {
        let name = if name.trim().is_empty() {
            FALLBACK_DECK_NAME.to_string()
        } else {
            name.to_string()
        };
        Self { name, pairs, keys }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_falls_back() {
        let deck = Deck::new("   ", Vec::new(), PairKeys::default());
        assert_eq!(deck.name, "deck");
    }

    #[test]
    fn test_name_kept_verbatim() {
        let deck = Deck::new("Spanish Basics", vec![Pair::new("a", "b")], PairKeys::default());
        assert_eq!(deck.name, "Spanish Basics");
        assert_eq!(deck.pairs.len(), 1);
    }
}
