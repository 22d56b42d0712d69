use thiserror::Error;

/// Reasons a round cannot start. Word and hint problems are shown to the
/// setter, who keeps the typed input and corrects it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Word must contain at least one letter!")]
    NoLetters,
    #[error("Word may only contain letters and spaces (found '{0}')")]
    InvalidCharacter(char),
    #[error("Hint cannot be empty!")]
    EmptyHint,
    #[error("wrong-guess limit must be between {min} and {max}, got {got}")]
    WrongGuessLimit { got: u8, min: u8, max: u8 },
    #[error("round time limit must be positive")]
    NoTime,
}

/// Calls the match controller refuses because they break its sequencing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("round {0} already has a word")]
    RoundAlreadyStarted(u32),
    #[error("round {0} has not finished yet")]
    RoundNotFinished(u32),
    #[error("no word has been submitted for round {0}")]
    NoActiveRound(u32),
    #[error("the match is already complete")]
    MatchComplete,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("total rounds must be at least 1")]
    NoRounds,
    #[error("wrong-guess limit must be between {min} and {max}, got {got}")]
    WrongGuessLimit { got: u8, min: u8, max: u8 },
    #[error("round time limit must be positive")]
    NoTime,
    #[error("player names must not be blank")]
    BlankName,
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
