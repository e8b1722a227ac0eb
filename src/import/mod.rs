pub mod csv_convert;
pub mod deck_loader;

pub use deck_loader::{deck_names, normalize, parse_deck_source};
