//! Main application UI and state management.
//! Hosts the new/load game screen and the drill screen for one active session.

use card_match::config::AppConfig;
use card_match::import::deck_names;
use card_match::storage::saves::format_modified;
use card_match::storage::{DeckLibrary, SaveEntry, SaveStore};
use card_match::{GameSession, Pair, Result};
use eframe::egui;
use std::path::{Path, PathBuf};

/// Application screen states
#[derive(Default)]
enum AppScreen {
    #[default]
    Main,
    Playing,
}

/// The game being played: the session handle plus what the drill screen shows.
struct PlayState {
    session: GameSession,
    current: Option<Pair>,
    intro: String,
    answer: String,
    feedback: String,
    focus_answer: bool,
}

impl PlayState {
    fn new(session: GameSession) -> Self {
        let intro = format!(
            "Deck '{}' loaded. {} cards.",
            session.deck_name(),
            session.remaining_count()
        );
        let mut state = Self {
            session,
            current: None,
            intro,
            answer: String::new(),
            feedback: String::new(),
            focus_answer: false,
        };
        state.next_card();
        state
    }

    fn next_card(&mut self) {
        self.current = self.session.pick_next();
        self.answer.clear();
        if self.session.is_finished() {
            self.feedback = format!("Final score: {}", self.session.score());
        } else {
            self.feedback.clear();
            self.focus_answer = true;
        }
    }

    fn prompt(&self) -> &str {
        match &self.current {
            Some(pair) => &pair.source,
            None => "No more cards - you're done!",
        }
    }

    fn check(&mut self) {
        let Some(pair) = self.current.clone() else {
            self.feedback = "No card to check.".to_string();
            return;
        };

        if self.session.check_answer(&self.answer, &pair) {
            self.next_card();
            if !self.session.is_finished() {
                self.feedback = "Correct - removed from deck.".to_string();
            }
        } else {
            self.feedback = format!("Wrong - correct: {}", pair.target);
        }
    }
}

/// Main application state
pub struct DrillApp {
    config: AppConfig,
    library: DeckLibrary,
    saves: SaveStore,

    current_screen: AppScreen,
    play: Option<PlayState>,

    deck_path: Option<PathBuf>,
    deck_files: Vec<PathBuf>,
    available_decks: Vec<String>,
    deck_name_input: String,
    load_name_input: String,
    saved_games: Vec<SaveEntry>,

    show_save_dialog: bool,
    save_name_input: String,

    show_confirmation_dialog: bool,
    allowed_to_close: bool,

    message: Option<(String, String)>,
}

impl eframe::App for DrillApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.current_screen {
            AppScreen::Main => self.render_main_screen(ctx),
            AppScreen::Playing => self.render_play_screen(ctx),
        }

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    if self.play.is_some() {
                        ui.label("Unsaved progress will be lost.");
                    }
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if self.show_save_dialog {
            self.render_save_dialog(ctx);
        }

        if let Some((title, body)) = &self.message {
            let mut dismissed = false;
            egui::Window::new(title.as_str())
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(body.as_str());
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            if dismissed {
                self.message = None;
            }
        }
    }
}

impl DrillApp {
    /// `deck_override` wins over the configured default deck file.
    pub fn new(config: AppConfig, deck_override: Option<PathBuf>) -> Self {
        let library = config.deck_library();
        let saves = config.save_store();
        let deck_path = deck_override.or_else(|| {
            config
                .default_deck
                .as_deref()
                .map(|file| library.path_for(file))
        });

        let mut app = Self {
            config,
            library,
            saves,
            current_screen: AppScreen::Main,
            play: None,
            deck_path: None,
            deck_files: Vec::new(),
            available_decks: Vec::new(),
            deck_name_input: String::new(),
            load_name_input: String::new(),
            saved_games: Vec::new(),
            show_save_dialog: false,
            save_name_input: String::new(),
            show_confirmation_dialog: false,
            allowed_to_close: false,
            message: None,
        };
        if let Some(path) = deck_path {
            app.select_deck_file(path, false);
        }
        app.refresh_deck_files();
        app.refresh_saves();
        app
    }

    fn show_message(&mut self, title: &str, body: String) {
        self.message = Some((title.to_string(), body));
    }

    /// Renders the main screen with new game and load game sections
    fn render_main_screen(&mut self, ctx: &egui::Context) {
        let mut action_pick_file = false;
        let mut action_select_file: Option<PathBuf> = None;
        let mut action_new_game = false;
        let mut action_load: Option<String> = None;
        let mut action_refresh = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Card Match");
            });
            ui.separator();

            ui.heading("New Game");
            ui.horizontal(|ui| {
                let file_label = self
                    .deck_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(none)".to_string());
                ui.label(format!("Deck file: {}", file_label));
                if ui.button("Choose...").clicked() {
                    action_pick_file = true;
                }
            });

            ui.horizontal_wrapped(|ui| {
                for file in &self.deck_files {
                    let selected = self.deck_path.as_ref() == Some(file);
                    let label = file
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    if ui.selectable_label(selected, label).clicked() {
                        action_select_file = Some(file.clone());
                    }
                }
            });

            if !self.available_decks.is_empty() {
                ui.label(format!("Available: {}", deck_hint(&self.available_decks)));
            }

            ui.horizontal(|ui| {
                ui.label("Deck name:");
                ui.text_edit_singleline(&mut self.deck_name_input);
            });
            if ui.button("New Game").clicked() {
                action_new_game = true;
            }

            ui.separator();

            ui.heading("Load Game");
            ui.horizontal(|ui| {
                ui.label("Save name:");
                ui.text_edit_singleline(&mut self.load_name_input);
                if ui.button("Load Game").clicked() {
                    action_load = Some(self.load_name_input.trim().to_string());
                }
            });

            ui.horizontal(|ui| {
                ui.label(format!("Saved games ({})", self.saved_games.len()));
                if ui.button("Refresh").clicked() {
                    action_refresh = true;
                }
            });

            egui::ScrollArea::vertical()
                .id_salt("saved_games")
                .max_height(250.0)
                .show(ui, |ui| {
                    for save in &self.saved_games {
                        ui.horizontal(|ui| {
                            let selected = self.load_name_input.trim() == save.name;
                            if ui
                                .selectable_label(
                                    selected,
                                    format!("{} ({})", save.name, format_modified(&save.modified)),
                                )
                                .clicked()
                            {
                                self.load_name_input = save.name.clone();
                            }
                            if ui.button("Load").clicked() {
                                action_load = Some(save.name.clone());
                            }
                        });
                    }
                });
        });

        // Execute deferred actions
        if action_pick_file {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("JSON files", &["json"])
                .set_directory(self.library.dir())
                .pick_file()
            {
                self.select_deck_file(path, true);
            }
        }
        if let Some(path) = action_select_file {
            self.select_deck_file(path, true);
        }
        if action_refresh {
            self.refresh_deck_files();
            self.refresh_saves();
        }
        if action_new_game {
            self.start_new_game();
        }
        if let Some(name) = action_load {
            if !name.is_empty() {
                self.load_game(&name);
            }
        }
    }

    /// Renders the drill screen for the active session
    fn render_play_screen(&mut self, ctx: &egui::Context) {
        let mut action_check = false;
        let mut action_next = false;
        let mut action_save = false;
        let mut action_back = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(play) = &mut self.play else {
                return;
            };

            ui.heading(format!("Playing: {}", play.session.deck_name()));
            ui.label(&play.intro);
            ui.add_space(20.0);

            let finished = play.session.is_finished();
            ui.vertical_centered(|ui| {
                ui.heading(play.prompt());
                ui.add_space(10.0);

                let response = ui.add_enabled(
                    !finished,
                    egui::TextEdit::singleline(&mut play.answer).desired_width(300.0),
                );
                if play.focus_answer {
                    response.request_focus();
                    play.focus_answer = false;
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    action_check = true;
                }

                ui.add_space(10.0);
                ui.label(&play.feedback);
                ui.label(format!(
                    "Score: {}    Cards left: {}",
                    play.session.score(),
                    play.session.remaining_count()
                ));
            });

            ui.add_space(20.0);

            ui.horizontal(|ui| {
                if ui.add_enabled(!finished, egui::Button::new("Check")).clicked() {
                    action_check = true;
                }
                if ui.add_enabled(!finished, egui::Button::new("Next")).clicked() {
                    action_next = true;
                }
                if ui.button("Save & Quit").clicked() {
                    action_save = true;
                }
                if ui.button("Back").clicked() {
                    action_back = true;
                }
            });
        });

        // Execute deferred actions
        if let Some(play) = &mut self.play {
            if action_check {
                play.check();
            }
            if action_next {
                play.next_card();
            }
        }
        if action_save {
            self.save_name_input.clear();
            self.show_save_dialog = true;
        }
        if action_back {
            self.end_game();
        }
    }

    fn render_save_dialog(&mut self, ctx: &egui::Context) {
        let mut action_save: Option<String> = None;
        let mut action_cancel = false;

        egui::Window::new("Save Game")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Enter a name for your save file:");
                let response = ui.text_edit_singleline(&mut self.save_name_input);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() || submitted {
                        action_save = Some(self.save_name_input.trim().to_string());
                    }
                    if ui.button("Cancel").clicked() {
                        action_cancel = true;
                    }
                });
            });

        if action_cancel {
            self.show_save_dialog = false;
        }
        if let Some(name) = action_save {
            if !name.is_empty() {
                self.save_and_quit(&name);
            }
        }
    }

    /// Reads a deck source so the available deck names can be offered.
    fn select_deck_file(&mut self, path: PathBuf, report_errors: bool) {
        match self.library.read(&path) {
            Ok(raw) => {
                self.available_decks = deck_names(&raw);
                log::info!(
                    "Deck file {} offers {} deck(s)",
                    path.display(),
                    self.available_decks.len()
                );
            }
            Err(e) => {
                self.available_decks.clear();
                log::warn!("Could not read deck file {}: {}", path.display(), e);
                if report_errors {
                    self.show_message("Error", format!("Could not read deck file: {}", e));
                }
            }
        }
        self.deck_path = Some(path);
    }

    fn refresh_deck_files(&mut self) {
        match self.library.list() {
            Ok(files) => self.deck_files = files,
            Err(e) => {
                log::warn!("Could not list decks in {}: {}", self.library.dir().display(), e);
                self.deck_files.clear();
            }
        }
    }

    fn refresh_saves(&mut self) {
        match self.saves.list() {
            Ok(saves) => self.saved_games = saves,
            Err(e) => {
                log::warn!("Could not list saves in {}: {}", self.saves.dir().display(), e);
                self.saved_games.clear();
            }
        }
    }

    fn start_new_game(&mut self) {
        let Some(path) = self.deck_path.clone() else {
            self.show_message("Error", "Choose a deck file first.".to_string());
            return;
        };

        match self.new_session(&path) {
            Ok(session) => {
                log::info!("Starting a new game with the {} deck", session.deck_name());
                self.play = Some(PlayState::new(session));
                self.current_screen = AppScreen::Playing;
            }
            Err(e) => self.show_message("Error", e.to_string()),
        }
    }

    fn new_session(&mut self, path: &Path) -> Result<GameSession> {
        let raw = self.library.read(path)?;
        self.available_decks = deck_names(&raw);

        let requested = self.deck_name_input.trim();
        let requested = Some(requested).filter(|name| !name.is_empty());
        GameSession::new_game(
            &raw,
            requested,
            0,
            &self.config.pair_keys,
            self.config.seed,
        )
    }

    fn load_game(&mut self, name: &str) {
        match self.saves.read(name, &self.config.pair_keys) {
            Ok(record) => {
                let session = GameSession::resume(record, self.config.seed);
                self.play = Some(PlayState::new(session));
                self.current_screen = AppScreen::Playing;
            }
            Err(e) => self.show_message("Error", e.to_string()),
        }
    }

    fn save_and_quit(&mut self, name: &str) {
        let Some(play) = &self.play else {
            self.show_save_dialog = false;
            return;
        };

        match play.session.save(&self.saves, name) {
            Ok(path) => {
                self.show_save_dialog = false;
                self.show_message("Saved", format!("Game saved to {}", path.display()));
                self.end_game();
                self.refresh_saves();
            }
            Err(e) => self.show_message("Error", format!("Save failed: {}", e)),
        }
    }

    fn end_game(&mut self) {
        self.play = None;
        self.current_screen = AppScreen::Main;
    }
}

/// First ten deck names, with "..." when there are more.
fn deck_hint(names: &[String]) -> String {
    let mut hint = names.iter().take(10).cloned().collect::<Vec<_>>().join(", ");
    if names.len() > 10 {
        hint.push_str("...");
    }
    hint
}
