use thiserror::Error;

use super::board::Position;

/// Why a proposed turn was not committed. Every variant leaves the
/// confirmed board, the scores and the active player untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("the proposed board has no new tiles")]
    NoChange,
    #[error("new tiles span more than one row and more than one column")]
    MultiAxisChange,
    #[error("new tiles do not form one connected word of at least two letters")]
    DisconnectedOrTooShort,
    #[error("the confirmed tile at {position} was changed")]
    ConfirmedTileChanged { position: Position },
    #[error("no dictionary word matches {pattern}")]
    BlankUnresolvable { pattern: String },
    #[error("{word} is not in the dictionary")]
    WordNotInDictionary { word: String, position: Position },
    #[error("the blank tile choice was abandoned")]
    Abandoned,
}

impl TurnError {
    /// Stable reason code reported to the editing client.
    pub fn code(&self) -> &'static str {
        match self {
            TurnError::NoChange => "NO_CHANGE",
            TurnError::MultiAxisChange => "MULTI_AXIS_CHANGE",
            TurnError::DisconnectedOrTooShort => "DISCONNECTED_OR_TOO_SHORT",
            TurnError::ConfirmedTileChanged { .. } => "CONFIRMED_TILE_CHANGED",
            TurnError::BlankUnresolvable { .. } => "BLANK_UNRESOLVABLE",
            TurnError::WordNotInDictionary { .. } => "WORD_NOT_IN_DICTIONARY",
            TurnError::Abandoned => "ABANDONED",
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            TurnError::ConfirmedTileChanged { position }
            | TurnError::WordNotInDictionary { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// The offending word or blank pattern, if any.
    pub fn word(&self) -> Option<&str> {
        match self {
            TurnError::BlankUnresolvable { pattern } => Some(pattern),
            TurnError::WordNotInDictionary { word, .. } => Some(word),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Rejected(#[from] TurnError),
    #[error("a game needs between {min} and {max} players, got {count}")]
    PlayerCount { count: usize, min: usize, max: usize },
    #[error("player names must not be empty")]
    EmptyPlayerName,
    #[error("the cell at {0} holds a confirmed tile")]
    CellLocked(Position),
    #[error("a blank tile choice is pending")]
    ChoicePending,
    #[error("no blank tile choice is pending")]
    NoPendingChoice,
    #[error("{0} is not one of the offered words")]
    ChoiceNotOffered(String),
}
