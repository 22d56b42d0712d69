use tracing::info;

/// Number of entries kept
pub const LEADERBOARD_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

/// Top scores for the running process. Starts empty, never written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given scores (zero scores are skipped), keeps the best three.
    /// Equal scores keep their arrival order, so older entries win ties.
    pub fn record<'a>(mut self, scores: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        for (name, score) in scores {
            if score > 0 {
                self.entries.push(LeaderboardEntry { name: name.to_string(), score });
            }
        }
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_SIZE);
        info!(entries = ?self.entries, "leaderboard updated");
        self
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(board: &Leaderboard) -> Vec<u32> {
        board.entries().iter().map(|e| e.score).collect()
    }

    #[test]
    fn skips_zero_scores() {
        let board = Leaderboard::new().record([("Ada", 0), ("Bob", 0)]);
        assert!(board.is_empty());
    }

    #[test]
    fn keeps_best_three_descending() {
        let board = Leaderboard::new()
            .record([("Ada", 2), ("Bob", 4)])
            .record([("Cy", 1), ("Di", 3)]);
        assert_eq!(scores(&board), vec![4, 3, 2]);
        assert_eq!(board.entries()[0].name, "Bob");
    }

    #[test]
    fn ties_keep_older_entry_first() {
        let board = Leaderboard::new()
            .record([("Ada", 2)])
            .record([("Bob", 2)]);
        let names: Vec<_> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Bob"]);
    }
}
