//! Drill session: owns one deck, picks prompts, grades answers and keeps score.
//!
//! Pairs are drawn uniformly at random from what is left, independently on
//! every pick. Only a correct answer removes a pair, so a missed prompt can
//! come back on a later draw and an empty deck means every pair was mastered.

use super::{Deck, Pair, PairKeys, SaveRecord};
use crate::error::Result;
use crate::import::normalize;
use crate::storage::SaveStore;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::Value;
use std::path::PathBuf;

pub struct GameSession {
    deck: Deck,
    score: u64,
    rng: StdRng,
}

impl GameSession {
    /// Starts a session on a normalized deck with the given starting score.
    pub fn new(deck: Deck, initial_score: u64) -> Self {
        Self {
            deck,
            score: initial_score,
            rng: StdRng::from_entropy(),
        }
    }

    /// Same as [`GameSession::new`] but with a reproducible pick order.
    pub fn with_seed(deck: Deck, initial_score: u64, seed: u64) -> Self {
        Self {
            deck,
            score: initial_score,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn start(deck: Deck, initial_score: u64, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(deck, initial_score, seed),
            None => Self::new(deck, initial_score),
        }
    }

    /// Normalizes a raw deck source and starts a session on it.
    /// `seed` fixes the pick order; `None` seeds from entropy.
    pub fn new_game(
        raw: &Value,
        requested_name: Option<&str>,
        initial_score: u64,
        keys: &PairKeys,
        seed: Option<u64>,
    ) -> Result<Self> {
        let deck = normalize(raw, requested_name, keys)?;
        log::info!(
            "New game on deck '{}' ({} pairs, score {})",
            deck.name,
            deck.pairs.len(),
            initial_score
        );
        Ok(Self::start(deck, initial_score, seed))
    }

    /// Continues a saved game; the saved score becomes the starting score.
    pub fn resume(record: SaveRecord, seed: Option<u64>) -> Self {
        let (deck, score) = record.into_deck();
        log::info!(
            "Resumed deck '{}' ({} pairs left, score {})",
            deck.name,
            deck.pairs.len(),
            score
        );
        Self::start(deck, score, seed)
    }

    pub fn deck_name(&self) -> &str {
        &self.deck.name
    }

    pub fn remaining(&self) -> &[Pair] {
        &self.deck.pairs
    }

    pub fn remaining_count(&self) -> usize {
        self.deck.pairs.len()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.deck.pairs.is_empty()
    }

    /// Picks a random remaining pair, or `None` once the deck is exhausted.
    /// Game state is left untouched.
    pub fn pick_next(&mut self) -> Option<Pair> {
        self.deck.pairs.choose(&mut self.rng).cloned()
    }

    /// Grades `input` against the candidate's target.
    ///
    /// On a match the score goes up by one (saturating) and the first pair equal to
    /// `candidate` is removed; if none is left that part is a no-op.
    /// A miss changes nothing.
    pub fn check_answer(&mut self, input: &str, candidate: &Pair) -> bool {
        if !candidate.is_answered_by(input) {
            log::debug!(
                "Wrong answer for '{}': got '{}', expected '{}'",
                candidate.source,
                input.trim(),
                candidate.target
            );
            return false;
        }

        self.score = self.score.saturating_add(1);
        if let Some(index) = self.deck.pairs.iter().position(|p| p == candidate) {
            self.deck.pairs.remove(index);
        }
        log::info!(
            "Correct answer for '{}' (score {}, {} left)",
            candidate.source,
            self.score,
            self.deck.pairs.len()
        );
        true
    }

    /// Snapshot of the current state, remaining pairs in their current order.
    pub fn record(&self) -> SaveRecord {
        SaveRecord {
            deck_name: self.deck.name.clone(),
            remaining: self.deck.pairs.clone(),
            score: self.score,
            keys: self.deck.keys.clone(),
        }
    }

    /// Writes the snapshot as `<name>.json` in the store. The session keeps going.
    pub fn save(&self, store: &SaveStore, name: &str) -> Result<PathBuf> {
        store.write(&self.record(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrillError;
    use serde_json::json;
    use std::collections::HashSet;

    fn create_test_deck() -> Deck {
        Deck::new(
            "spanish_basic",
            vec![
                Pair::new("hello", "hola"),
                Pair::new("house", "casa"),
                Pair::new("cat", "gato"),
            ],
            PairKeys::default(),
        )
    }

    #[test]
    fn test_single_pair_end_to_end() {
        let raw = json!([{"en": "hello", "es": "hola"}]);
        let mut session = GameSession::new_game(&raw, None, 0, &PairKeys::default(), None).unwrap();

        let pair = session.pick_next().unwrap();
        assert_eq!(pair, Pair::new("hello", "hola"));

        assert!(session.check_answer("hola", &pair));
        assert_eq!(session.score(), 1);
        assert_eq!(session.remaining_count(), 0);
        assert!(session.pick_next().is_none());
        assert!(session.is_finished());
    }

    #[test]
    fn test_pick_does_not_mutate() {
        let mut session = GameSession::with_seed(create_test_deck(), 0, 7);
        for _ in 0..50 {
            let pair = session.pick_next().unwrap();
            assert!(session.remaining().contains(&pair));
        }
        assert_eq!(session.remaining_count(), 3);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_pick_reaches_every_pair() {
        let mut session = GameSession::with_seed(create_test_deck(), 0, 42);
        let seen: HashSet<_> = (0..200).filter_map(|_| session.pick_next()).collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_same_seed_same_picks() {
        let mut a = GameSession::with_seed(create_test_deck(), 0, 12345);
        let mut b = GameSession::with_seed(create_test_deck(), 0, 12345);
        for _ in 0..20 {
            assert_eq!(a.pick_next(), b.pick_next());
        }
    }

    #[test]
    fn test_wrong_answer_changes_nothing() {
        let mut session = GameSession::new(create_test_deck(), 5);
        let pair = Pair::new("house", "casa");

        assert!(!session.check_answer("Casas", &pair));
        assert_eq!(session.score(), 5);
        assert_eq!(session.remaining_count(), 3);
    }

    #[test]
    fn test_answer_is_case_and_whitespace_insensitive() {
        let mut session = GameSession::new(create_test_deck(), 0);
        assert!(session.check_answer("  Casa ", &Pair::new("house", "casa")));
        assert_eq!(session.remaining_count(), 2);
    }

    #[test]
    fn test_duplicates_removed_one_at_a_time() {
        let deck = Deck::new(
            "dupes",
            vec![
                Pair::new("cat", "gato"),
                Pair::new("dog", "perro"),
                Pair::new("cat", "gato"),
            ],
            PairKeys::default(),
        );
        let mut session = GameSession::new(deck, 0);
        let cat = Pair::new("cat", "gato");

        assert!(session.check_answer("gato", &cat));
        assert_eq!(
            session.remaining(),
            &[Pair::new("dog", "perro"), Pair::new("cat", "gato")]
        );

        assert!(session.check_answer("gato", &cat));
        assert_eq!(session.remaining(), &[Pair::new("dog", "perro")]);
    }

    #[test]
    fn test_correct_answer_on_absent_pair_still_scores() {
        let mut session = GameSession::new(create_test_deck(), 0);
        let stranger = Pair::new("tree", "árbol");

        assert!(session.check_answer("árbol", &stranger));
        assert_eq!(session.score(), 1);
        assert_eq!(session.remaining_count(), 3);
    }

    #[test]
    fn test_score_monotonic_and_removal_exact() {
        let mut session = GameSession::with_seed(create_test_deck(), 0, 99);
        let answers = ["hola", "nope", "CASA", "", "gato", "gato", "perro"];

        for (i, answer) in answers.iter().cycle().take(30).enumerate() {
            let Some(pair) = session.pick_next() else {
                break;
            };
            let score_before = session.score();
            let len_before = session.remaining_count();

            let correct = session.check_answer(answer, &pair);

            if correct {
                assert_eq!(session.score(), score_before + 1, "step {}", i);
                assert_eq!(session.remaining_count(), len_before - 1, "step {}", i);
            } else {
                assert_eq!(session.score(), score_before, "step {}", i);
                assert_eq!(session.remaining_count(), len_before, "step {}", i);
            }
        }
    }

    #[test]
    fn test_answering_everything_exhausts_deck() {
        let mut session = GameSession::with_seed(create_test_deck(), 0, 3);
        while let Some(pair) = session.pick_next() {
            let answer = pair.target.to_uppercase();
            assert!(session.check_answer(&answer, &pair));
        }
        assert_eq!(session.score(), 3);
        for _ in 0..5 {
            assert!(session.pick_next().is_none());
        }
    }

    #[test]
    fn test_new_game_propagates_loader_errors() {
        let raw = json!({"verbs": [{"en": "run", "es": "correr"}]});
        let result = GameSession::new_game(&raw, Some("nouns"), 0, &PairKeys::default(), None);
        assert!(matches!(result, Err(DrillError::DeckNotFound(_))));
    }

    #[test]
    fn test_record_round_trip() {
        let mut session = GameSession::with_seed(create_test_deck(), 2, 11);
        assert!(session.check_answer("hola", &Pair::new("hello", "hola")));

        let record = SaveRecord::from_json(&session.record().to_json(), &PairKeys::default())
            .unwrap();
        let resumed = GameSession::resume(record, None);

        assert_eq!(resumed.deck_name(), session.deck_name());
        assert_eq!(resumed.score(), 3);
        let expected: HashSet<_> = session.remaining().iter().cloned().collect();
        let actual: HashSet<_> = resumed.remaining().iter().cloned().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_save_and_resume_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("saves"));
        let mut session = GameSession::new(create_test_deck(), 0);
        assert!(session.check_answer("gato", &Pair::new("cat", "gato")));

        let path = session.save(&store, "tuesday").unwrap();
        assert!(path.ends_with("tuesday.json"));
        assert_eq!(session.remaining_count(), 2);
        assert_eq!(session.score(), 1);

        let resumed = GameSession::resume(store.read("tuesday", &PairKeys::default()).unwrap(), None);
        assert_eq!(resumed.deck_name(), "spanish_basic");
        assert_eq!(resumed.score(), 1);
        assert_eq!(resumed.remaining(), session.remaining());
    }

    #[test]
    fn test_save_with_bad_name_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path());
        let session = GameSession::new(create_test_deck(), 0);

        assert!(matches!(session.save(&store, "../up"), Err(DrillError::Io(_))));
    }

    #[test]
    fn test_score_saturates_at_maximum() {
        let record = SaveRecord {
            deck_name: "spanish_basic".to_string(),
            remaining: vec![Pair::new("hello", "hola")],
            score: u64::MAX,
            keys: PairKeys::default(),
        };
        let mut session = GameSession::resume(record, None);
        let pair = session.pick_next().unwrap();

        assert!(session.check_answer("hola", &pair));
        assert_eq!(session.score(), u64::MAX);
        assert!(session.is_finished());
    }

    #[test]
    fn test_seeded_resume_and_new_game_repeat_picks() {
        let raw = json!({"spanish_basic": [
            {"en": "hello", "es": "hola"},
            {"en": "house", "es": "casa"},
            {"en": "cat", "es": "gato"}
        ]});
        let keys = PairKeys::default();
        let mut fresh = GameSession::new_game(&raw, None, 0, &keys, Some(5)).unwrap();
        let mut resumed = GameSession::resume(fresh.record(), Some(5));

        assert_eq!(resumed.score(), 0);
        for _ in 0..20 {
            assert_eq!(fresh.pick_next(), resumed.pick_next());
        }
    }
}
