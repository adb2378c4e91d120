pub mod blanks;
pub mod board;
pub mod conversion;
pub mod directions;
pub mod error;
pub mod history;
pub mod placement;
pub mod player;
pub mod scoring;
pub mod session;
pub mod trie;

pub use blanks::BlankResolution;
pub use board::{Board, BoardLayout, Bonus, Grid, Position, Tile, BOARD_SIZE};
pub use directions::Axis;
pub use error::{SessionError, TurnError};
pub use history::MoveHistoryEntry;
pub use placement::{Placement, PlayedWord};
pub use player::Player;
pub use scoring::{ScoredTurn, ScoredWord, Scorer};
pub use session::{GameSession, TurnOutcome, TurnState};
pub use trie::Trie;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

/// Read-only rules shared by every game: the dictionary and the scorer.
#[derive(Clone)]
pub struct GameEngine {
    word_trie: Arc<Trie>,
    scorer: Scorer,
}

impl GameEngine {
    pub fn new<P: AsRef<Path>>(wordlist_path: P, layout: BoardLayout) -> Result<Self> {
        let word_trie = Trie::from_file(wordlist_path)?;
        Ok(Self::with_trie(word_trie, layout))
    }

    pub fn with_trie(word_trie: Trie, layout: BoardLayout) -> Self {
        Self {
            word_trie: Arc::new(word_trie),
            scorer: Scorer::new(layout),
        }
    }

    pub fn dictionary(&self) -> &Trie {
        &self.word_trie
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn validate_word(&self, word: &str) -> bool {
        self.word_trie.search(word)
    }

    /// Extracts the words `proposed` forms on `board` and scores each of them.
    pub fn extract_placement(&self, board: &Board, proposed: &Grid) -> Result<Placement, TurnError> {
        let mut placement = placement::extract(board, proposed)?;
        for word in placement.words_mut() {
            self.scorer.apply(word);
        }
        Ok(placement)
    }

    pub fn resolve_blanks(&self, word: &PlayedWord) -> BlankResolution {
        blanks::resolve(&self.word_trie, word)
    }

    /// Fills in the blanks of `placement` from `chosen` (the resolved main
    /// word), then checks every word against the dictionary. One unknown
    /// word rejects the whole turn.
    pub fn finalize(
        &self,
        mut placement: Placement,
        chosen: Option<&str>,
    ) -> Result<ScoredTurn, TurnError> {
        let assignments = chosen
            .map(|word| blanks::assignments(&placement.main_word, word))
            .unwrap_or_default();
        for word in placement.words_mut() {
            for (position, letter) in &assignments {
                word.assign(*position, *letter);
            }
        }

        let mut words = Vec::new();
        for word in placement.words() {
            let text = word.text();
            if word.has_unresolved_blank() || !self.validate_word(&text) {
                return Err(TurnError::WordNotInDictionary {
                    word: text,
                    position: word.start(),
                });
            }
            words.push(ScoredWord {
                word: text,
                value: word.value,
            });
        }

        Ok(ScoredTurn {
            total: words.iter().map(|w| w.value).sum(),
            words,
            blanks: assignments,
        })
    }
}
