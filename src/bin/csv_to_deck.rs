//! Turns a two-column CSV word list into a JSON deck file.
//!
//! ```bash
//! csv-to-deck decks/spanish_basic.csv --name "Spanish Basics"
//! ```
use card_match::PairKeys;
use card_match::import::csv_convert::{DEFAULT_DECK_NAME, convert_file};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csv-to-deck", about = "Convert a CSV word list into a JSON deck")]
struct Args {
    /// CSV file with a header row
    input: PathBuf,

    /// Output path (defaults to the input path with a .json extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Deck name written into the file
    #[arg(long, default_value = DEFAULT_DECK_NAME)]
    name: String,

    /// Header of the column shown as the prompt
    #[arg(long, default_value = "en")]
    source_column: String,

    /// Header of the column holding the expected answer
    #[arg(long, default_value = "es")]
    target_column: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("json"));
    let columns = PairKeys {
        source: args.source_column,
        target: args.target_column,
    };

    let deck_file = convert_file(&args.input, &output, &args.name, &columns)?;

    println!(
        "Converted {} -> {} ({} pairs)",
        args.input.display(),
        output.display(),
        deck_file.pairs.len()
    );
    Ok(())
}
