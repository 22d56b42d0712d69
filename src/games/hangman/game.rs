use std::cell::Cell;

use crossterm::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::{debug, info, warn};

use crate::core::audio::Cue;
use crate::{Context, Game};

use super::config::{MatchConfig, MAX_WRONG_GUESSES, MIN_WRONG_GUESSES};
use super::controller::{Advance, MatchPhase, MatchState};
use super::error::{ConfigError, MatchError};
use super::leaderboard::Leaderboard;
use super::renderer;
use super::round::validate_word;

pub const NAME_MAX_LEN: usize = 15;
pub const WORD_MAX_LEN: usize = 20;
pub const HINT_MAX_LEN: usize = 40;
pub const MAX_ROUNDS: u32 = 10;
pub const MIN_TIME_SECS: u32 = 10;
pub const MAX_TIME_SECS: u32 = 300;
pub const TIME_STEP_SECS: u32 = 10;

pub const START_MENU: [&str; 4] = ["Play", "Sound settings", "Leaderboard", "Quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Player1,
    Player2,
    Starter,
    Rounds,
    WrongGuesses,
    TimeLimit,
}

pub const SETUP_FIELDS: [SetupField; 6] = [
    SetupField::Player1,
    SetupField::Player2,
    SetupField::Starter,
    SetupField::Rounds,
    SetupField::WrongGuesses,
    SetupField::TimeLimit,
];

/// Draft of the match settings, edited before the match starts
#[derive(Debug, Clone, PartialEq)]
pub struct SetupForm {
    pub player1_name: String,
    pub player2_name: String,
    pub starter_is_player1: bool,
    pub total_rounds: u32,
    pub max_wrong_guesses: u8,
    pub round_time_limit_secs: u32,
    pub selected: usize,
    pub error: Option<String>,
}

impl SetupForm {
    pub fn from_config(config: &MatchConfig) -> Self {
        Self {
            player1_name: config.player1_name.clone(),
            player2_name: config.player2_name.clone(),
            starter_is_player1: config.starter_is_player1,
            total_rounds: config.total_rounds,
            max_wrong_guesses: config.max_wrong_guesses,
            round_time_limit_secs: config.round_time_limit_secs,
            selected: 0,
            error: None,
        }
    }

    pub fn field(&self) -> SetupField {
        SETUP_FIELDS[self.selected]
    }

    /// Builds the frozen match config. Blank names fall back to "Player 1"/"Player 2".
    pub fn to_config(&self, sound_enabled: bool, music_enabled: bool) -> Result<MatchConfig, ConfigError> {
        let name_or = |name: &str, fallback: &str| {
            if name.trim().is_empty() { fallback.to_string() } else { name.to_string() }
        };
        let config = MatchConfig {
            player1_name: name_or(&self.player1_name, "Player 1"),
            player2_name: name_or(&self.player2_name, "Player 2"),
            starter_is_player1: self.starter_is_player1,
            total_rounds: self.total_rounds,
            max_wrong_guesses: self.max_wrong_guesses,
            round_time_limit_secs: self.round_time_limit_secs,
            sound_enabled,
            music_enabled,
        };
        config.validate()?;
        Ok(config)
    }

    fn name_mut(&mut self) -> Option<&mut String> {
        match self.field() {
            SetupField::Player1 => Some(&mut self.player1_name),
            SetupField::Player2 => Some(&mut self.player2_name),
            _ => None,
        }
    }

    fn adjust(&mut self, up: bool) {
        match self.field() {
            SetupField::Starter => self.starter_is_player1 = !self.starter_is_player1,
            SetupField::Rounds => {
                if up && self.total_rounds < MAX_ROUNDS {
                    self.total_rounds += 1;
                } else if !up && self.total_rounds > 1 {
                    self.total_rounds -= 1;
                }
            }
            SetupField::WrongGuesses => {
                if up && self.max_wrong_guesses < MAX_WRONG_GUESSES {
                    self.max_wrong_guesses += 1;
                } else if !up && self.max_wrong_guesses > MIN_WRONG_GUESSES {
                    self.max_wrong_guesses -= 1;
                }
            }
            SetupField::TimeLimit => {
                if up && self.round_time_limit_secs < MAX_TIME_SECS {
                    self.round_time_limit_secs += TIME_STEP_SECS;
                } else if !up && self.round_time_limit_secs > MIN_TIME_SECS {
                    self.round_time_limit_secs -= TIME_STEP_SECS;
                }
            }
            SetupField::Player1 | SetupField::Player2 => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryStep {
    #[default]
    Word,
    Hint,
}

/// The setter's word and hint while they are being typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordEntryForm {
    pub word: String,
    pub hint: String,
    pub step: EntryStep,
    pub error: Option<String>,
}

/// Which screen is up. A running match carries its own phase.
#[derive(Debug)]
pub enum Screen {
    Start { selected: usize },
    SoundSettings { selected: usize },
    Leaderboard,
    Setup(SetupForm),
    Match { state: MatchState, entry: WordEntryForm },
}

pub struct HangmanGame {
    screen: Screen,
    /// Seeds the setup form; updated with the last confirmed settings
    defaults: MatchConfig,
    sound_enabled: bool,
    music_enabled: bool,
    leaderboard: Leaderboard,
    quit: bool,
    music_announced: bool,
    /// Frame size of the last render, for mouse hit-testing
    last_area: Cell<Rect>,
}

impl HangmanGame {
    pub fn new(defaults: MatchConfig) -> Self {
        Self {
            screen: Screen::Start { selected: 0 },
            sound_enabled: defaults.sound_enabled,
            music_enabled: defaults.music_enabled,
            defaults,
            leaderboard: Leaderboard::new(),
            quit: false,
            music_announced: false,
            last_area: Cell::new(Rect::default()),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn match_state(&self) -> Option<&MatchState> {
        match &self.screen {
            Screen::Match { state, .. } => Some(state),
            _ => None,
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    fn click(&self, ctx: &Context<Cue>) {
        if self.sound_enabled {
            ctx.emit(Cue::Click);
        }
    }

    fn go_to(&mut self, screen: Screen) {
        debug!(screen = screen_name(&screen), "screen change");
        self.screen = screen;
    }

    fn back_to_setup(&mut self) {
        let form = SetupForm::from_config(&self.defaults);
        self.go_to(Screen::Setup(form));
    }

    fn on_key(&mut self, key: KeyEvent, ctx: &Context<Cue>) {
        let sound_enabled = self.sound_enabled;
        match &mut self.screen {
            Screen::Start { selected } => match key.code {
                KeyCode::Up => *selected = (*selected + START_MENU.len() - 1) % START_MENU.len(),
                KeyCode::Down => *selected = (*selected + 1) % START_MENU.len(),
                KeyCode::Enter => {
                    let choice = *selected;
                    self.click(ctx);
                    match choice {
                        0 => self.back_to_setup(),
                        1 => self.go_to(Screen::SoundSettings { selected: 0 }),
                        2 => self.go_to(Screen::Leaderboard),
                        _ => self.quit = true,
                    }
                }
                KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
                _ => {}
            },
            Screen::SoundSettings { selected } => match key.code {
                KeyCode::Up | KeyCode::Down => *selected = 1 - *selected,
                KeyCode::Left | KeyCode::Right | KeyCode::Enter => {
                    if *selected == 0 {
                        self.sound_enabled = !self.sound_enabled;
                    } else {
                        self.music_enabled = !self.music_enabled;
                        ctx.emit(Cue::Music(self.music_enabled));
                    }
                    self.defaults.sound_enabled = self.sound_enabled;
                    self.defaults.music_enabled = self.music_enabled;
                    info!(sound = self.sound_enabled, music = self.music_enabled, "sound settings changed");
                }
                KeyCode::Esc => {
                    self.click(ctx);
                    self.go_to(Screen::Start { selected: 1 });
                }
                _ => {}
            },
            Screen::Leaderboard => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    self.click(ctx);
                    self.go_to(Screen::Start { selected: 2 });
                }
            }
            Screen::Setup(form) => match key.code {
                KeyCode::Up => form.selected = (form.selected + SETUP_FIELDS.len() - 1) % SETUP_FIELDS.len(),
                KeyCode::Down => form.selected = (form.selected + 1) % SETUP_FIELDS.len(),
                KeyCode::Left => form.adjust(false),
                KeyCode::Right => form.adjust(true),
                KeyCode::Char(c) => {
                    if let Some(name) = form.name_mut() {
                        if name.chars().count() < NAME_MAX_LEN && (' '..='~').contains(&c) {
                            name.push(c);
                        }
                    }
                }
                KeyCode::Backspace => {
                    if let Some(name) = form.name_mut() {
                        name.pop();
                    }
                }
                KeyCode::Enter => {
                    self.click(ctx);
                    self.start_match();
                }
                KeyCode::Esc => {
                    self.click(ctx);
                    self.go_to(Screen::Start { selected: 0 });
                }
                _ => {}
            },
            Screen::Match { state, entry } => match state.phase() {
                MatchPhase::WordEntry => match key.code {
                    KeyCode::Esc => {
                        if sound_enabled {
                            ctx.emit(Cue::Click);
                        }
                        state.abandon_round();
                        self.back_to_setup();
                    }
                    _ => word_entry_key(state, entry, key.code),
                },
                MatchPhase::Guessing => match key.code {
                    KeyCode::Esc => {
                        if sound_enabled {
                            ctx.emit(Cue::Click);
                        }
                        state.abandon_round();
                        self.back_to_setup();
                    }
                    KeyCode::Char(c) => {
                        state.apply_guess(c);
                    }
                    _ => {}
                },
                MatchPhase::RoundResolved(_) => {
                    if key.code == KeyCode::Enter {
                        if sound_enabled {
                            ctx.emit(Cue::Click);
                        }
                        match state.advance_round() {
                            Ok(Advance::NextRound(_)) => *entry = WordEntryForm::default(),
                            Ok(Advance::MatchComplete) => {}
                            Err(err) => warn!(%err, "could not advance"),
                        }
                    }
                }
                MatchPhase::Summary => match key.code {
                    KeyCode::Enter => {
                        self.click(ctx);
                        self.finish_match();
                    }
                    KeyCode::Esc => self.quit = true,
                    _ => {}
                },
            },
        }
    }

    fn start_match(&mut self) {
        let Screen::Setup(form) = &mut self.screen else {
            return;
        };
        let begun = form
            .to_config(self.sound_enabled, self.music_enabled)
            .and_then(|config| Ok((config.clone(), MatchState::begin(config)?)));
        match begun {
            Ok((config, state)) => {
                self.defaults = config;
                self.go_to(Screen::Match { state, entry: WordEntryForm::default() });
            }
            Err(err) => {
                warn!(%err, "invalid settings");
                form.error = Some(err.to_string());
            }
        }
    }

    /// Records the final scores and returns to the start screen. The match is dropped.
    fn finish_match(&mut self) {
        let Screen::Match { state, .. } = &self.screen else {
            return;
        };
        self.leaderboard = state.record_final_scores(std::mem::take(&mut self.leaderboard));
        self.go_to(Screen::Start { selected: 0 });
    }

    fn on_click(&mut self, column: u16, row: u16) {
        let area = self.last_area.get();
        let Screen::Match { state, .. } = &mut self.screen else {
            return;
        };
        if state.phase() != MatchPhase::Guessing {
            return;
        }
        let layout = renderer::guessing_layout(area);
        let hit = renderer::keyboard_keys(layout.keyboard)
            .into_iter()
            .find(|(_, rect)| rect.contains(Position::new(column, row)));
        if let Some((letter, _)) = hit {
            state.apply_guess(letter);
        }
    }
}

fn word_entry_key(state: &mut MatchState, entry: &mut WordEntryForm, code: KeyCode) {
    match (code, entry.step) {
        (KeyCode::Char(c), EntryStep::Word) => {
            if (c.is_ascii_alphabetic() || c == ' ') && entry.word.len() < WORD_MAX_LEN {
                entry.word.push(c);
            }
        }
        (KeyCode::Char(c), EntryStep::Hint) => {
            if (' '..='~').contains(&c) && entry.hint.len() < HINT_MAX_LEN {
                entry.hint.push(c);
            }
        }
        (KeyCode::Backspace, EntryStep::Word) => {
            entry.word.pop();
        }
        (KeyCode::Backspace, EntryStep::Hint) => {
            entry.hint.pop();
        }
        (KeyCode::Tab | KeyCode::BackTab, step) => {
            entry.step = match step {
                EntryStep::Word => EntryStep::Hint,
                EntryStep::Hint => EntryStep::Word,
            };
        }
        (KeyCode::Enter, EntryStep::Word) => match validate_word(&entry.word) {
            Ok(()) => {
                entry.error = None;
                entry.step = EntryStep::Hint;
            }
            Err(err) => entry.error = Some(err.to_string()),
        },
        (KeyCode::Enter, EntryStep::Hint) => match state.submit_word(&entry.word, &entry.hint) {
            Ok(()) => *entry = WordEntryForm::default(),
            Err(MatchError::Validation(err)) => {
                if validate_word(&entry.word).is_err() {
                    entry.step = EntryStep::Word;
                }
                entry.error = Some(err.to_string());
            }
            Err(err) => warn!(%err, "word submission refused"),
        },
        _ => {}
    }
}

fn screen_name(screen: &Screen) -> &'static str {
    match screen {
        Screen::Start { .. } => "start",
        Screen::SoundSettings { .. } => "sound",
        Screen::Leaderboard => "leaderboard",
        Screen::Setup(_) => "setup",
        Screen::Match { .. } => "match",
    }
}

impl Game for HangmanGame {
    type Cue = Cue;

    fn on_tick(&mut self, dt: f32, ctx: &Context<Cue>) {
        if !self.music_announced {
            self.music_announced = true;
            if self.music_enabled {
                ctx.emit(Cue::Music(true));
            }
        }
        if let Screen::Match { state, .. } = &mut self.screen {
            if let Some(outcome) = state.apply_tick(dt) {
                debug!(?outcome, "round ended on the clock");
            }
        }
    }

    fn handle_input(&mut self, event: Event, ctx: &Context<Cue>) {
        match event {
            Event::Key(key) => self.on_key(key, ctx),
            Event::Mouse(mouse) => {
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                    self.on_click(mouse.column, mouse.row);
                }
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        self.last_area.set(frame.area());
        renderer::render(frame, self);
    }

    fn should_quit(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::step;
    use crate::games::hangman::round::RoundOutcome;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn ctx() -> (Context<Cue>, UnboundedReceiver<Cue>) {
        let (tx, rx) = unbounded_channel();
        (Context::new(tx), rx)
    }

    fn press(game: &mut HangmanGame, ctx: &Context<Cue>, code: KeyCode) {
        game.handle_input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), ctx);
    }

    fn type_text(game: &mut HangmanGame, ctx: &Context<Cue>, text: &str) {
        for c in text.chars() {
            press(game, ctx, KeyCode::Char(c));
        }
    }

    fn one_round_game() -> HangmanGame {
        HangmanGame::new(MatchConfig { total_rounds: 1, ..Default::default() })
    }

    #[test]
    fn plays_a_full_match_and_records_leaderboard() {
        let (ctx, _rx) = ctx();
        let mut game = one_round_game();

        press(&mut game, &ctx, KeyCode::Enter); // Play
        assert!(matches!(game.screen(), Screen::Setup(_)));
        press(&mut game, &ctx, KeyCode::Enter); // start match

        type_text(&mut game, &ctx, "cat");
        press(&mut game, &ctx, KeyCode::Enter);
        type_text(&mut game, &ctx, "Pet");
        press(&mut game, &ctx, KeyCode::Enter);
        assert_eq!(game.match_state().unwrap().phase(), MatchPhase::Guessing);

        type_text(&mut game, &ctx, "tac");
        let state = game.match_state().unwrap();
        assert!(matches!(state.phase(), MatchPhase::RoundResolved(_)));
        assert_eq!(state.guesser_name(), "Player 2");

        press(&mut game, &ctx, KeyCode::Enter);
        assert_eq!(game.match_state().unwrap().phase(), MatchPhase::Summary);

        press(&mut game, &ctx, KeyCode::Enter);
        assert!(matches!(game.screen(), Screen::Start { .. }));
        let entries = game.leaderboard().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Player 2");
        assert_eq!(entries[0].score, 1);
    }

    #[test]
    fn invalid_word_keeps_input_and_shows_error() {
        let (ctx, _rx) = ctx();
        let mut game = one_round_game();
        press(&mut game, &ctx, KeyCode::Enter);
        press(&mut game, &ctx, KeyCode::Enter);

        // digits are filtered out, so only a space gets in
        type_text(&mut game, &ctx, "1 2");
        press(&mut game, &ctx, KeyCode::Enter);
        let Screen::Match { entry, .. } = game.screen() else { panic!("not in a match") };
        assert_eq!(entry.word, " ");
        assert_eq!(entry.step, EntryStep::Word);
        assert_eq!(entry.error.as_deref(), Some("Word must contain at least one letter!"));
    }

    #[test]
    fn empty_hint_is_rejected() {
        let (ctx, _rx) = ctx();
        let mut game = one_round_game();
        press(&mut game, &ctx, KeyCode::Enter);
        press(&mut game, &ctx, KeyCode::Enter);
        type_text(&mut game, &ctx, "dog");
        press(&mut game, &ctx, KeyCode::Enter);
        press(&mut game, &ctx, KeyCode::Enter);

        let Screen::Match { state, entry } = game.screen() else { panic!("not in a match") };
        assert_eq!(state.phase(), MatchPhase::WordEntry);
        assert_eq!(entry.word, "dog");
        assert_eq!(entry.error.as_deref(), Some("Hint cannot be empty!"));
    }

    #[test]
    fn tick_runs_before_guess() {
        let (ctx, _rx) = ctx();
        let mut game = HangmanGame::new(MatchConfig {
            total_rounds: 1,
            round_time_limit_secs: 10,
            ..Default::default()
        });
        press(&mut game, &ctx, KeyCode::Enter);
        press(&mut game, &ctx, KeyCode::Enter);
        type_text(&mut game, &ctx, "a");
        press(&mut game, &ctx, KeyCode::Enter);
        type_text(&mut game, &ctx, "b");
        press(&mut game, &ctx, KeyCode::Enter);

        let late_guess = Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        step(&mut game, 10.5, vec![late_guess], &ctx);

        let state = game.match_state().unwrap();
        assert_eq!(state.phase(), MatchPhase::RoundResolved(RoundOutcome::LostByTimeout));
        assert_eq!(state.round().unwrap().masked_word(), "_");
        assert_eq!(state.score(state.setter()), 1);
    }

    #[test]
    fn escape_while_guessing_abandons_without_score() {
        let (ctx, mut rx) = ctx();
        let mut game = one_round_game();
        press(&mut game, &ctx, KeyCode::Enter);
        press(&mut game, &ctx, KeyCode::Enter);
        type_text(&mut game, &ctx, "owl");
        press(&mut game, &ctx, KeyCode::Enter);
        type_text(&mut game, &ctx, "Bird");
        press(&mut game, &ctx, KeyCode::Enter);
        while rx.try_recv().is_ok() {}
        press(&mut game, &ctx, KeyCode::Esc);

        assert_eq!(rx.try_recv().ok(), Some(Cue::Click));
        assert!(matches!(game.screen(), Screen::Setup(_)));
        assert!(game.leaderboard().is_empty());
    }

    #[test]
    fn setup_form_clamps_and_defaults_names() {
        let mut form = SetupForm::from_config(&MatchConfig::default());
        form.player1_name.clear();
        form.selected = 4;
        for _ in 0..10 {
            form.adjust(true);
        }
        assert_eq!(form.max_wrong_guesses, MAX_WRONG_GUESSES);
        form.selected = 5;
        for _ in 0..10 {
            form.adjust(false);
        }
        assert_eq!(form.round_time_limit_secs, MIN_TIME_SECS);

        let config = form.to_config(true, false).unwrap();
        assert_eq!(config.player1_name, "Player 1");
        assert_eq!(config.max_wrong_guesses, 7);
    }

    #[test]
    fn sound_toggle_controls_click_cue() {
        let (ctx, mut rx) = ctx();
        let mut game = one_round_game();
        press(&mut game, &ctx, KeyCode::Down);
        press(&mut game, &ctx, KeyCode::Enter);
        assert_eq!(rx.try_recv().ok(), Some(Cue::Click));

        press(&mut game, &ctx, KeyCode::Right); // sound off
        assert!(!game.sound_enabled());
        press(&mut game, &ctx, KeyCode::Esc);
        assert!(rx.try_recv().is_err());

        press(&mut game, &ctx, KeyCode::Up);
        press(&mut game, &ctx, KeyCode::Up); // wraps to Quit
        press(&mut game, &ctx, KeyCode::Enter);
        assert!(game.should_quit());
    }
}
