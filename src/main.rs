mod app;

use app::DrillApp;
use card_match::config::{DEFAULT_CONFIG_FILE, load_config};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "card-match", about = "Flashcard drill: type the translation")]
struct Args {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Deck file to offer for new games (overrides `default_deck`)
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Fixed seed for the card picker
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args.config.display(), e);
            std::process::exit(2);
        }
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    log::info!(
        "Decks from {}, saves in {}",
        config.deck_dir.display(),
        config.saves_dir.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([500.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Card Match",
        options,
        Box::new(move |_cc| Ok(Box::new(DrillApp::new(config, args.deck)))),
    )
}
