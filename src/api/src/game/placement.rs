use std::collections::BTreeSet;

use tracing::debug;

use super::board::{Board, Grid, Position, Tile};
use super::directions::Axis;
use super::error::TurnError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCell {
    pub position: Position,
    pub tile: Tile,
    /// Placed this turn rather than confirmed earlier.
    pub is_new: bool,
    /// What the cell reads as. `None` for a blank placed this turn until it is resolved.
    pub letter: Option<char>,
}

/// One word formed by a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedWord {
    pub cells: Vec<WordCell>,
    pub value: u32,
    pub multiplier: u32,
}

impl PlayedWord {
    pub fn new(cells: Vec<WordCell>) -> Self {
        Self {
            cells,
            value: 0,
            multiplier: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Position {
        self.cells.first().map(|c| c.position).unwrap_or_default()
    }

    /// Letters of the word, unresolved blanks as wildcards.
    pub fn pattern(&self) -> Vec<Option<char>> {
        self.cells.iter().map(|c| c.letter).collect()
    }

    /// The word as text, unresolved blanks shown as `_`.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.letter.unwrap_or('_')).collect()
    }

    pub fn unresolved_blanks(&self) -> impl Iterator<Item = (usize, Position)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.letter.is_none())
            .map(|(i, c)| (i, c.position))
    }

    pub fn has_unresolved_blank(&self) -> bool {
        self.unresolved_blanks().next().is_some()
    }

    /// Index of the blank within the word when exactly one unresolved blank takes part.
    pub fn blank_index(&self) -> Option<usize> {
        let mut blanks = self.unresolved_blanks();
        match (blanks.next(), blanks.next()) {
            (Some((index, _)), None) => Some(index),
            _ => None,
        }
    }

    /// Resolves the new blank at `position`, if this word crosses it.
    pub fn assign(&mut self, position: Position, letter: char) -> bool {
        match self
            .cells
            .iter_mut()
            .find(|c| c.position == position && c.is_new && c.tile.is_blank())
        {
            Some(cell) => {
                cell.letter = Some(letter.to_ascii_uppercase());
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub axis: Axis,
    pub main_word: PlayedWord,
    pub side_words: Vec<PlayedWord>,
    /// Cells newly filled this turn, row-major.
    pub placed: Vec<Position>,
}

impl Placement {
    /// Main word first, then side words in placement order.
    pub fn words(&self) -> impl Iterator<Item = &PlayedWord> {
        std::iter::once(&self.main_word).chain(self.side_words.iter())
    }

    pub fn words_mut(&mut self) -> impl Iterator<Item = &mut PlayedWord> {
        std::iter::once(&mut self.main_word).chain(self.side_words.iter_mut())
    }
}

/// Works out which words `proposed` forms on top of the confirmed `board`.
/// Word values are left at zero; see [`super::scoring::Scorer::apply`].
pub fn extract(board: &Board, proposed: &Grid) -> Result<Placement, TurnError> {
    let confirmed = board.tiles();
    let placed = confirmed.diff(proposed);
    let Some(&first) = placed.first() else {
        return Err(TurnError::NoChange);
    };
    if let Some(&position) = placed.iter().find(|pos| confirmed.is_occupied(**pos)) {
        return Err(TurnError::ConfirmedTileChanged { position });
    }

    let rows: BTreeSet<usize> = placed.iter().map(|p| p.row).collect();
    let cols: BTreeSet<usize> = placed.iter().map(|p| p.col).collect();
    // A single tile spans one row and one column; it counts as horizontal.
    let axis = if rows.len() == 1 {
        Axis::Horizontal
    } else if cols.len() == 1 {
        Axis::Vertical
    } else {
        return Err(TurnError::MultiAxisChange);
    };

    let main_word = word_through(board, proposed, first, axis);
    let spanned = placed
        .iter()
        .all(|pos| main_word.cells.iter().any(|c| c.position == *pos));
    if !spanned {
        return Err(TurnError::DisconnectedOrTooShort);
    }

    let mut side_words: Vec<PlayedWord> = main_word
        .cells
        .iter()
        .filter(|c| c.is_new)
        .map(|c| word_through(board, proposed, c.position, axis.perpendicular()))
        .filter(|w| w.len() > 1)
        .collect();

    if main_word.len() > 1 {
        debug!(
            "Extracted {:?} word {} with {} side words",
            axis,
            main_word.text(),
            side_words.len()
        );
        return Ok(Placement {
            axis,
            main_word,
            side_words,
            placed,
        });
    }

    // A lone tile only scores through the word it forms across the axis.
    // One new tile has at most one perpendicular run, so this is the only
    // promotion case.
    match side_words.pop() {
        Some(promoted) if side_words.is_empty() => Ok(Placement {
            axis: axis.perpendicular(),
            main_word: promoted,
            side_words,
            placed,
        }),
        _ => Err(TurnError::DisconnectedOrTooShort),
    }
}

/// Maximal run of occupied cells through `start` along `axis`.
fn word_through(board: &Board, proposed: &Grid, start: Position, axis: Axis) -> PlayedWord {
    let mut first = start;
    while let Some(prev) = first.step(axis, false) {
        if !proposed.is_occupied(prev) {
            break;
        }
        first = prev;
    }

    let mut cells = Vec::new();
    let mut cursor = Some(first);
    while let Some(position) = cursor {
        let Some(tile) = proposed.get(position) else {
            break;
        };
        let is_new = !board.tiles().is_occupied(position);
        let letter = match tile {
            Tile::Letter(c) => Some(c),
            Tile::Blank if is_new => None,
            Tile::Blank => board.resolved_letter(position),
        };
        cells.push(WordCell {
            position,
            tile,
            is_new,
            letter,
        });
        cursor = position.step(axis, true);
    }
    PlayedWord::new(cells)
}
