/// Two-player hangman: round engine, match controller, leaderboard and the
/// terminal front-end that drives them.
pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod renderer;
pub mod round;

pub use config::MatchConfig;
pub use controller::{Advance, MatchPhase, MatchState, Player};
pub use error::{ConfigError, MatchError, ValidationError};
pub use game::HangmanGame;
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use round::{Guess, Round, RoundOutcome};
