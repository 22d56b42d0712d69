/// Hangman rendering: reads game state, never writes it
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::controller::{MatchPhase, MatchState, Player};
use super::game::{EntryStep, HangmanGame, Screen, SetupField, SetupForm, WordEntryForm, SETUP_FIELDS, START_MENU};
use super::round::{Round, RoundOutcome};

const KEY_WIDTH: u16 = 5;
const KEY_HEIGHT: u16 = 3;
const KEY_COLUMNS: u16 = 7;

/// Gallows drawing, one frame per body part
const GALLOWS: [&str; 8] = [
    "  +---+\n      |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n=========",
    "  +---+\n  |   |\n  X   |\n /|\\  |\n / \\  |\n=========",
];

/// Areas of the guessing screen. Shared with mouse hit-testing.
pub struct GuessingLayout {
    pub sidebar: Rect,
    pub header: Rect,
    pub word: Rect,
    pub status: Rect,
    pub gallows: Rect,
    pub keyboard: Rect,
    pub footer: Rect,
}

pub fn guessing_layout(area: Rect) -> GuessingLayout {
    let [sidebar, main] = Layout::horizontal([Constraint::Length(26), Constraint::Min(0)]).areas(area);
    let [header, word, status, play, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Min(KEY_HEIGHT * 4 + 2),
        Constraint::Length(3),
    ])
    .areas(main);
    let [keyboard, gallows] =
        Layout::horizontal([Constraint::Length(KEY_WIDTH * KEY_COLUMNS + 2), Constraint::Min(0)]).areas(play);
    GuessingLayout { sidebar, header, word, status, gallows, keyboard, footer }
}

/// One cell per letter A-Z, seven to a row, inside the keyboard block's border.
/// Keys that do not fit are left out.
pub fn keyboard_keys(area: Rect) -> Vec<(char, Rect)> {
    ('A'..='Z')
        .enumerate()
        .map(|(i, letter)| {
            let col = i as u16 % KEY_COLUMNS;
            let row = i as u16 / KEY_COLUMNS;
            let rect = Rect::new(
                area.x + 1 + col * KEY_WIDTH,
                area.y + 1 + row * KEY_HEIGHT,
                KEY_WIDTH,
                KEY_HEIGHT,
            );
            (letter, rect)
        })
        .filter(|(_, rect)| rect.right() < area.right() && rect.bottom() < area.bottom())
        .collect()
}

pub fn render(frame: &mut Frame, game: &HangmanGame) {
    let area = frame.area();
    match game.screen() {
        Screen::Start { selected } => render_start(frame, area, *selected),
        Screen::SoundSettings { selected } => render_sound(frame, area, game, *selected),
        Screen::Leaderboard => render_leaderboard(frame, area, game),
        Screen::Setup(form) => render_setup(frame, area, form),
        Screen::Match { state, entry } => match state.phase() {
            MatchPhase::WordEntry => render_word_entry(frame, area, state, entry),
            MatchPhase::Guessing | MatchPhase::RoundResolved(_) => render_guessing(frame, area, state),
            MatchPhase::Summary => render_summary(frame, area, state),
        },
    }
}

fn highlight(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn screen_chunks(area: Rect) -> [Rect; 3] {
    Layout::vertical([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
        .margin(1)
        .areas(area)
}

fn render_title(frame: &mut Frame, area: Rect, title: &str) {
    frame.render_widget(
        Paragraph::new(title.to_string())
            .block(Block::bordered())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan)),
        area,
    );
}

fn render_tip(frame: &mut Frame, area: Rect, tip: &str) {
    frame.render_widget(
        Paragraph::new(tip.to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        area,
    );
}

fn render_start(frame: &mut Frame, area: Rect, selected: usize) {
    let [title, body, footer] = screen_chunks(area);
    render_title(frame, title, " HANGMAN - 2 PLAYER ");

    let items: Vec<ListItem> = START_MENU
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let marker = if i == selected { "▶" } else { " " };
            ListItem::new(format!(" {marker} {label}")).style(highlight(i == selected))
        })
        .collect();
    frame.render_widget(List::new(items).block(Block::bordered().title(" MENU ")), body);
    render_tip(frame, footer, "[↑/↓] Navigate  [Enter] Select  [Esc] Quit");
}

fn on_off(enabled: bool) -> Span<'static> {
    if enabled {
        Span::styled("ENABLED", Style::default().fg(Color::Green))
    } else {
        Span::styled("DISABLED", Style::default().fg(Color::Red))
    }
}

fn render_sound(frame: &mut Frame, area: Rect, game: &HangmanGame, selected: usize) {
    let [title, body, footer] = screen_chunks(area);
    render_title(frame, title, " SOUND SETTINGS ");

    let rows = [("GAME SOUNDS", game.sound_enabled()), ("BACKGROUND MUSIC", game.music_enabled())];
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .map(|(i, (label, enabled))| {
            Line::from(vec![
                Span::styled(format!("{label:<20}"), highlight(i == selected)),
                on_off(*enabled),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(Block::bordered()), body);
    render_tip(frame, footer, "[↑/↓] Select  [←/→/Enter] Toggle  [Esc] Back");
}

fn render_leaderboard(frame: &mut Frame, area: Rect, game: &HangmanGame) {
    let [title, body, footer] = screen_chunks(area);
    render_title(frame, title, " LEADERBOARD ");

    let board = game.leaderboard();
    let lines: Vec<Line> = if board.is_empty() {
        vec![Line::from("No scores yet. Finish a match to get on the board!")]
    } else {
        board
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| Line::from(format!("{}. {:<16} {} pts", i + 1, entry.name, entry.score)))
            .collect()
    };
    frame.render_widget(Paragraph::new(lines).block(Block::bordered().title(" TOP 3 ")), body);
    render_tip(frame, footer, "[Enter/Esc] Back");
}

fn setup_value(form: &SetupForm, field: SetupField) -> (&'static str, String) {
    match field {
        SetupField::Player1 => ("Player 1 name", form.player1_name.clone()),
        SetupField::Player2 => ("Player 2 name", form.player2_name.clone()),
        SetupField::Starter => {
            let who = if form.starter_is_player1 { "Player 1" } else { "Player 2" };
            ("Sets the first word", format!("◀ {who} ▶"))
        }
        SetupField::Rounds => ("Rounds", format!("◀ {} ▶", form.total_rounds)),
        SetupField::WrongGuesses => ("Wrong guesses allowed", format!("◀ {} ▶", form.max_wrong_guesses)),
        SetupField::TimeLimit => ("Time per round", format!("◀ {} seconds ▶", form.round_time_limit_secs)),
    }
}

fn render_setup(frame: &mut Frame, area: Rect, form: &SetupForm) {
    let [title, body, footer] = screen_chunks(area);
    render_title(frame, title, " GAME SETTINGS ");

    let mut lines: Vec<Line> = SETUP_FIELDS
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let (label, value) = setup_value(form, *field);
            Line::from(vec![
                Span::styled(format!("{label:<24}"), highlight(i == form.selected)),
                Span::raw(value),
            ])
        })
        .collect();
    if let Some(err) = &form.error {
        lines.push(Line::default());
        lines.push(Line::styled(err.clone(), Style::default().fg(Color::Red)));
    }
    frame.render_widget(Paragraph::new(lines).block(Block::bordered()), body);
    render_tip(frame, footer, "[↑/↓] Field  [←/→] Change  Type names  [Enter] Start  [Esc] Back");
}

fn render_word_entry(frame: &mut Frame, area: Rect, state: &MatchState, entry: &WordEntryForm) {
    let [title, body, footer] = screen_chunks(area);
    render_title(frame, title, &format!(" WORD ENTRY - {} ", state.setter_name()));

    let field = |label: &str, value: &str, active: bool| {
        let cursor = if active { "▏" } else { "" };
        Line::from(vec![
            Span::styled(format!("{label:<14}"), highlight(active)),
            Span::raw(format!("{value}{cursor}")),
        ])
    };
    let mut lines = vec![
        Line::from(format!("ROUND {} OF {}", state.current_round(), state.total_rounds())),
        Line::from(format!("{}, look away while {} types!", state.guesser_name(), state.setter_name())),
        Line::default(),
        field("Secret word:", &entry.word, entry.step == EntryStep::Word),
        field("Hint:", &entry.hint, entry.step == EntryStep::Hint),
    ];
    if let Some(err) = &entry.error {
        lines.push(Line::default());
        lines.push(Line::styled(err.clone(), Style::default().fg(Color::Red)));
    }
    frame.render_widget(Paragraph::new(lines).block(Block::bordered()), body);
    render_tip(frame, footer, "[Enter] Next  [Tab] Switch field  [Esc] Back to settings");
}

/// "C _ _" style: every character followed by a space
fn spaced(masked: &str) -> String {
    masked.chars().flat_map(|c| [c, ' ']).collect()
}

fn render_sidebar(frame: &mut Frame, area: Rect, state: &MatchState) {
    let score_line = |player: Player| {
        let marker = if state.guesser() == player { " (guessing)" } else { "" };
        Line::from(format!("{}: {} pts{marker}", state.name(player), state.score(player)))
    };
    let lines = vec![
        Line::styled(
            format!("ROUND {} OF {}", state.current_round(), state.total_rounds()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        score_line(Player::One),
        score_line(Player::Two),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" SCORES ")).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_keyboard(frame: &mut Frame, area: Rect, round: &Round) {
    frame.render_widget(Block::bordered().title(" KEYBOARD "), area);
    for (letter, rect) in keyboard_keys(area) {
        let style = if round.has_tried(letter) {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(letter.to_string())
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::bordered()),
            rect,
        );
    }
}

fn render_guessing(frame: &mut Frame, area: Rect, state: &MatchState) {
    let Some(round) = state.round() else {
        return;
    };
    let layout = guessing_layout(area);
    render_sidebar(frame, layout.sidebar, state);

    frame.render_widget(
        Paragraph::new(format!("HINT: {}", round.hint()))
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" HANGMAN ")),
        layout.header,
    );
    frame.render_widget(
        Paragraph::new(spaced(&round.masked_word()))
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD)),
        layout.word,
    );

    let [lives, clock] = Layout::vertical([Constraint::Length(1), Constraint::Length(3)]).areas(layout.status);
    let tried: String = round.tried_letters().collect();
    frame.render_widget(
        Paragraph::new(format!(
            "Wrong guesses: {}/{}    Tried: {}",
            round.wrong_guesses(),
            round.max_wrong_guesses(),
            tried
        )),
        lives,
    );
    let limit = state.config().round_time_limit_secs.max(1) as f64;
    let remaining = round.time_remaining();
    frame.render_widget(
        Gauge::default()
            .block(Block::bordered())
            .gauge_style(Style::default().fg(Color::Yellow))
            .ratio((remaining as f64 / limit).clamp(0.0, 1.0))
            .label(format!("Time left: {} s", remaining as u32)),
        clock,
    );

    render_keyboard(frame, layout.keyboard, round);

    let step = usize::from(round.wrong_guesses()) * (GALLOWS.len() - 1) / usize::from(round.max_wrong_guesses());
    frame.render_widget(Paragraph::new(GALLOWS[step.min(GALLOWS.len() - 1)]), layout.gallows);

    let footer = match round.outcome() {
        RoundOutcome::InProgress => {
            Line::styled("Type A-Z or click a key to guess  [Esc] Abandon round", Style::default().fg(Color::Gray))
        }
        RoundOutcome::Won => Line::from(vec![
            Span::styled(format!("YOU WIN, {}! ", state.guesser_name()), Style::default().fg(Color::Green)),
            Span::raw(format!("Word was: {}  [Enter] Next", round.secret_word())),
        ]),
        outcome => {
            let reason = if outcome == RoundOutcome::LostByTimeout { "Time's up" } else { "Hanged" };
            Line::from(vec![
                Span::styled(
                    format!("YOU LOSE, {}! ({reason}) ", state.guesser_name()),
                    Style::default().fg(Color::Red),
                ),
                Span::raw(format!("Word was: {}  [Enter] Next", round.secret_word())),
            ])
        }
    };
    frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), layout.footer);
}

fn render_summary(frame: &mut Frame, area: Rect, state: &MatchState) {
    let [title, body, footer] = screen_chunks(area);
    render_title(frame, title, " GAME OVER ");

    let winner = match state.leader() {
        Some(player) => Line::styled(
            format!("WINNER: {}", state.name(player)),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        None => Line::styled("IT'S A TIE!", Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
    };
    let mut lines = vec![
        Line::from(format!("Rounds played: {}", state.total_rounds())),
        Line::default(),
        Line::from(format!("{}  -  {} pts", state.name(Player::One), state.score(Player::One))),
        Line::from(format!("{}  -  {} pts", state.name(Player::Two), state.score(Player::Two))),
        Line::default(),
        winner,
        Line::default(),
    ];
    lines.extend(GALLOWS[6].lines().map(Line::from));
    frame.render_widget(Paragraph::new(lines).block(Block::bordered()), body);
    render_tip(frame, footer, "[Enter] Main menu  [Esc] Quit game");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_has_all_letters_when_roomy() {
        let layout = guessing_layout(Rect::new(0, 0, 120, 40));
        let keys = keyboard_keys(layout.keyboard);
        assert_eq!(keys.len(), 26);
        assert_eq!(keys[0].0, 'A');
        assert_eq!(keys[7].1.y, keys[0].1.y + KEY_HEIGHT);
    }

    #[test]
    fn spaced_word() {
        assert_eq!(spaced("C_ T"), "C _   T ");
    }
}
