use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use tracing::{info, Level};

use crate::core::audio::TerminalBell;
use crate::core::engine::Engine;
use crate::games::hangman::{ConfigError, HangmanGame, MatchConfig};

#[derive(Parser)]
#[command(name = "hangterm")]
#[command(about = "🎩 Two-player hangman for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Write logs to this file (the terminal is busy with the game)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// More log detail: -v debug, -vv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the game (default)
    Play(PlayArgs),
    /// Print the default match settings as JSON
    Defaults,
}

/// Match settings. Flags override the config file, which overrides the defaults.
#[derive(Args, Default, Debug, Clone)]
pub struct PlayArgs {
    /// JSON file with match settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub player1: Option<String>,

    #[arg(long)]
    pub player2: Option<String>,

    /// Number of rounds
    #[arg(short, long)]
    pub rounds: Option<u32>,

    /// Wrong guesses allowed per round (1-7)
    #[arg(short, long)]
    pub lives: Option<u8>,

    /// Seconds per round
    #[arg(short, long)]
    pub time: Option<u32>,

    /// Player 2 sets the first word
    #[arg(long)]
    pub player2_starts: bool,

    /// Disable sound cues
    #[arg(long)]
    pub mute: bool,

    /// Enable background music
    #[arg(long)]
    pub music: bool,
}

impl PlayArgs {
    pub fn resolve(&self) -> Result<MatchConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::load(path)?,
            None => MatchConfig::default(),
        };
        if let Some(name) = &self.player1 {
            config.player1_name = name.clone();
        }
        if let Some(name) = &self.player2 {
            config.player2_name = name.clone();
        }
        if let Some(rounds) = self.rounds {
            config.total_rounds = rounds;
        }
        if let Some(lives) = self.lives {
            config.max_wrong_guesses = lives;
        }
        if let Some(time) = self.time {
            config.round_time_limit_secs = time;
        }
        if self.player2_starts {
            config.starter_is_player1 = false;
        }
        if self.mute {
            config.sound_enabled = false;
        }
        if self.music {
            config.music_enabled = true;
        }
        config.validate()?;
        Ok(config)
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.verbose)?;

    match cli.command {
        Some(Commands::Defaults) => {
            println!("{}", serde_json::to_string_pretty(&MatchConfig::default())?);
        }
        Some(Commands::Play(args)) => play(args.resolve()?).await?,
        None => play(PlayArgs::default().resolve()?).await?,
    }

    Ok(())
}

fn init_logging(path: Option<&Path>, verbose: u8) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

async fn play(config: MatchConfig) -> Result<()> {
    info!(?config, "starting hangterm");
    let terminal = ratatui::init();
    if let Err(err) = crossterm::execute!(std::io::stdout(), EnableMouseCapture) {
        ratatui::restore();
        return Err(err.into());
    }

    let engine = Engine::new(HangmanGame::new(config), TerminalBell::new());
    let result = engine.run(terminal).await;

    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    let game = result?;
    let board = game.leaderboard();
    if !board.is_empty() {
        println!("🏆 Session leaderboard:");
        for (i, entry) in board.entries().iter().enumerate() {
            println!("  {}. {} - {} pts", i + 1, entry.name, entry.score);
        }
    }
    println!("👋 Goodbye!");
    Ok(())
}
