pub mod deck;
pub mod game_session;
pub mod pair;
pub mod save_record;

pub use deck::Deck;
pub use game_session::GameSession;
pub use pair::{Pair, PairKeys};
pub use save_record::SaveRecord;
