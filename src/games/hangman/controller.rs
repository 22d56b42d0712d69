//! Match controller: roles, round counter, scores and the hand-off between
//! rounds. Owns at most one [`Round`] at a time.

use tracing::{debug, info, warn};

use super::config::MatchConfig;
use super::error::{ConfigError, MatchError};
use super::leaderboard::Leaderboard;
use super::round::{Guess, Round, RoundOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Where a match currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Waiting for the setter's word and hint
    WordEntry,
    Guessing,
    RoundResolved(RoundOutcome),
    Summary,
}

/// Result of closing a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextRound(u32),
    MatchComplete,
}

#[derive(Debug, Clone)]
pub struct MatchState {
    config: MatchConfig,
    current_round: u32,
    setter: Player,
    player1_score: u32,
    player2_score: u32,
    round: Option<Round>,
    complete: bool,
}

impl MatchState {
    /// Opens round 1. The config is checked here so every round the match
    /// starts stays within its limits.
    pub fn begin(config: MatchConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            warn!(%err, "match refused");
            return Err(err);
        }
        let setter = if config.starter_is_player1 { Player::One } else { Player::Two };
        info!(
            player1 = %config.player1_name,
            player2 = %config.player2_name,
            rounds = config.total_rounds,
            "match started"
        );
        Ok(Self {
            config,
            current_round: 1,
            setter,
            player1_score: 0,
            player2_score: 0,
            round: None,
            complete: false,
        })
    }

    /// Starts the current round with the setter's word. On a validation
    /// error nothing changes and the same setter tries again.
    pub fn submit_word(&mut self, secret_word: &str, hint: &str) -> Result<(), MatchError> {
        if self.complete {
            return Err(MatchError::MatchComplete);
        }
        if self.round.is_some() {
            return Err(MatchError::RoundAlreadyStarted(self.current_round));
        }
        let round = Round::start(
            secret_word,
            hint,
            self.config.max_wrong_guesses,
            self.config.round_time_limit_secs,
        )?;
        info!(round = self.current_round, setter = %self.setter_name(), "word submitted");
        self.round = Some(round);
        Ok(())
    }

    pub fn apply_guess(&mut self, letter: char) -> Guess {
        let Some(round) = self.round.as_mut() else {
            return Guess::Ignored;
        };
        let before = round.outcome();
        let result = round.guess(letter);
        debug!(%letter, ?result, "guess");
        self.settle(before);
        result
    }

    /// Returns the outcome if this tick ended the round.
    pub fn apply_tick(&mut self, elapsed_secs: f32) -> Option<RoundOutcome> {
        let round = self.round.as_mut()?;
        let before = round.outcome();
        round.tick(elapsed_secs);
        self.settle(before)
    }

    /// Scores the round the moment it leaves InProgress. Later calls see a
    /// terminal `before` and award nothing.
    fn settle(&mut self, before: RoundOutcome) -> Option<RoundOutcome> {
        let after = self.round.as_ref()?.outcome();
        if before.is_over() || !after.is_over() {
            return None;
        }
        let scorer = match after {
            RoundOutcome::Won => self.guesser(),
            _ => self.setter,
        };
        match scorer {
            Player::One => self.player1_score += 1,
            Player::Two => self.player2_score += 1,
        }
        info!(
            round = self.current_round,
            outcome = ?after,
            scorer = %self.name(scorer),
            player1_score = self.player1_score,
            player2_score = self.player2_score,
            "round finished"
        );
        Some(after)
    }

    /// Closes a finished round: either swaps roles for the next one or
    /// reports that the match is over. Scores are untouched.
    pub fn advance_round(&mut self) -> Result<Advance, MatchError> {
        if self.complete {
            return Err(MatchError::MatchComplete);
        }
        match &self.round {
            None => {
                warn!(round = self.current_round, "advance without a round");
                return Err(MatchError::NoActiveRound(self.current_round));
            }
            Some(round) if !round.is_over() => {
                warn!(round = self.current_round, "advance before round finished");
                return Err(MatchError::RoundNotFinished(self.current_round));
            }
            Some(_) => {}
        }

        if self.current_round < self.config.total_rounds {
            self.current_round += 1;
            self.setter = self.setter.other();
            self.round = None;
            info!(round = self.current_round, setter = %self.setter_name(), "next round");
            Ok(Advance::NextRound(self.current_round))
        } else {
            self.complete = true;
            info!(
                player1_score = self.player1_score,
                player2_score = self.player2_score,
                "match complete"
            );
            Ok(Advance::MatchComplete)
        }
    }

    /// Drops the current round without scoring anyone.
    pub fn abandon_round(&mut self) -> Option<Round> {
        let dropped = self.round.take();
        if dropped.is_some() {
            info!(round = self.current_round, "round abandoned");
        }
        dropped
    }

    /// Adds both final scores to the leaderboard. The match itself is left as is.
    pub fn record_final_scores(&self, leaderboard: Leaderboard) -> Leaderboard {
        leaderboard.record([
            (self.config.player1_name.as_str(), self.player1_score),
            (self.config.player2_name.as_str(), self.player2_score),
        ])
    }

    pub fn phase(&self) -> MatchPhase {
        if self.complete {
            return MatchPhase::Summary;
        }
        match &self.round {
            None => MatchPhase::WordEntry,
            Some(round) if round.is_over() => MatchPhase::RoundResolved(round.outcome()),
            Some(_) => MatchPhase::Guessing,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.config.total_rounds
    }

    pub fn setter(&self) -> Player {
        self.setter
    }

    pub fn guesser(&self) -> Player {
        self.setter.other()
    }

    pub fn setter_is_player1(&self) -> bool {
        self.setter == Player::One
    }

    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1_score,
            Player::Two => self.player2_score,
        }
    }

    pub fn name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.config.player1_name,
            Player::Two => &self.config.player2_name,
        }
    }

    pub fn setter_name(&self) -> &str {
        self.name(self.setter)
    }

    pub fn guesser_name(&self) -> &str {
        self.name(self.guesser())
    }

    /// Higher score wins; `None` on a tie
    pub fn leader(&self) -> Option<Player> {
        match self.player1_score.cmp(&self.player2_score) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config(rounds: u32) -> MatchConfig {
        MatchConfig { total_rounds: rounds, max_wrong_guesses: 2, ..Default::default() }
    }

    #[test]
    fn rejected_word_leaves_match_untouched() {
        let mut game = MatchState::begin(quick_config(1)).unwrap();
        let err = game.submit_word("42", "numbers").unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
        assert_eq!(game.phase(), MatchPhase::WordEntry);
        assert!(game.round().is_none());
    }

    #[test]
    fn second_word_for_same_round_is_refused() {
        let mut game = MatchState::begin(quick_config(1)).unwrap();
        game.submit_word("cat", "pet").unwrap();
        assert_eq!(game.submit_word("dog", "pet"), Err(MatchError::RoundAlreadyStarted(1)));
        assert_eq!(game.round().unwrap().secret_word(), "cat");
    }

    #[test]
    fn timeout_scores_setter_once() {
        let mut game = MatchState::begin(quick_config(1)).unwrap();
        game.submit_word("cat", "pet").unwrap();
        assert_eq!(game.apply_tick(61.0), Some(RoundOutcome::LostByTimeout));
        assert_eq!(game.apply_tick(5.0), None);
        assert_eq!(game.apply_guess('c'), Guess::Ignored);
        assert_eq!(game.score(Player::One), 1);
        assert_eq!(game.score(Player::Two), 0);
    }

    #[test]
    fn abandon_discards_without_scoring() {
        let mut game = MatchState::begin(quick_config(2)).unwrap();
        game.submit_word("cat", "pet").unwrap();
        game.apply_guess('z');
        assert!(game.abandon_round().is_some());
        assert_eq!(game.phase(), MatchPhase::WordEntry);
        assert_eq!(game.score(Player::One) + game.score(Player::Two), 0);
    }

    #[test]
    fn advance_requires_finished_round() {
        let mut game = MatchState::begin(quick_config(2)).unwrap();
        assert_eq!(game.advance_round(), Err(MatchError::NoActiveRound(1)));
        game.submit_word("cat", "pet").unwrap();
        assert_eq!(game.advance_round(), Err(MatchError::RoundNotFinished(1)));
        assert!(game.setter_is_player1());
    }

    #[test]
    fn begin_refuses_limits_out_of_range() {
        let lives = MatchConfig { max_wrong_guesses: 9, ..Default::default() };
        assert!(matches!(
            MatchState::begin(lives),
            Err(ConfigError::WrongGuessLimit { got: 9, .. })
        ));
        let no_time = MatchConfig { round_time_limit_secs: 0, ..Default::default() };
        assert!(matches!(MatchState::begin(no_time), Err(ConfigError::NoTime)));
    }

    #[test]
    fn leader_reports_tie() {
        let game = MatchState::begin(quick_config(1)).unwrap();
        assert_eq!(game.leader(), None);
    }
}
