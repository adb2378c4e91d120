use std::fmt;

use chrono::{DateTime, Utc};

use super::scoring::ScoredTurn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistoryEntry {
    pub player: String,
    pub words: Vec<String>,
    pub score: u32,
    pub played_at: DateTime<Utc>,
}

impl MoveHistoryEntry {
    pub fn new(player: impl Into<String>, turn: &ScoredTurn) -> Self {
        Self {
            player: player.into(),
            words: turn.words.iter().map(|w| w.word.clone()).collect(),
            score: turn.total,
            played_at: Utc::now(),
        }
    }
}

impl fmt::Display for MoveHistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} played {} for a total of {} points.",
            self.player,
            self.words.join(" "),
            self.score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::scoring::ScoredWord;

    #[test]
    fn test_summary_line() {
        let turn = ScoredTurn {
            words: vec![
                ScoredWord { word: "SO".into(), value: 2 },
                ScoredWord { word: "CATS".into(), value: 6 },
            ],
            total: 8,
            blanks: vec![],
        };
        let entry = MoveHistoryEntry::new("Ann", &turn);
        assert_eq!(entry.to_string(), "Ann played SO CATS for a total of 8 points.");
    }
}
