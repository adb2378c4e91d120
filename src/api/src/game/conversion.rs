use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::{Board, Grid, Position, Tile, BOARD_SIZE};

/// Wire form of a grid: 15 rows of 15 cells, each `""` (empty), `" "`
/// (blank) or a single letter.
pub type SerializableGrid = Vec<Vec<String>>;

const BLANK_SYMBOL: &str = " ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("expected 15 rows, got {0}")]
    RowCount(usize),
    #[error("expected 15 cells in row {row}, got {len}")]
    ColumnCount { row: usize, len: usize },
    #[error("unrecognised cell {symbol:?} at {position}")]
    InvalidSymbol { position: Position, symbol: String },
    #[error("cell ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
}

/// Confirmed board as sent to clients. `blanks` maps the flattened index of
/// every resolved blank to its letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableBoard {
    pub rows: SerializableGrid,
    pub blanks: BTreeMap<usize, char>,
}

impl From<&Board> for SerializableBoard {
    fn from(board: &Board) -> Self {
        Self {
            rows: grid_to_rows(board.tiles()),
            blanks: board
                .blank_assignments()
                .map(|(pos, letter)| (pos.flat(), letter))
                .collect(),
        }
    }
}

pub fn grid_to_rows(grid: &Grid) -> SerializableGrid {
    (0..BOARD_SIZE)
        .map(|row| {
            (0..BOARD_SIZE)
                .map(|col| match grid.get(Position::new(row, col)) {
                    Some(Tile::Letter(c)) => c.to_string(),
                    Some(Tile::Blank) => BLANK_SYMBOL.to_string(),
                    None => String::new(),
                })
                .collect()
        })
        .collect()
}

pub fn grid_from_rows(rows: &[Vec<String>]) -> Result<Grid, GridError> {
    if rows.len() != BOARD_SIZE {
        return Err(GridError::RowCount(rows.len()));
    }
    let mut grid = Grid::new();
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != BOARD_SIZE {
            return Err(GridError::ColumnCount { row, len: cells.len() });
        }
        for (col, symbol) in cells.iter().enumerate() {
            let position = Position::new(row, col);
            grid.set(position, tile_from_symbol(position, symbol)?);
        }
    }
    Ok(grid)
}

/// A single edited cell, as sent by the board editor.
pub fn cell_from_symbol(row: usize, col: usize, symbol: &str) -> Result<(Position, Option<Tile>), GridError> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return Err(GridError::OutOfBounds { row, col });
    }
    let position = Position::new(row, col);
    Ok((position, tile_from_symbol(position, symbol)?))
}

fn tile_from_symbol(position: Position, symbol: &str) -> Result<Option<Tile>, GridError> {
    parse_cell(symbol).ok_or_else(|| GridError::InvalidSymbol {
        position,
        symbol: symbol.to_string(),
    })
}

/// `None` when the symbol is not a cell at all.
fn parse_cell(symbol: &str) -> Option<Option<Tile>> {
    if symbol.is_empty() {
        return Some(None);
    }
    if symbol == BLANK_SYMBOL {
        return Some(Some(Tile::Blank));
    }
    let mut chars = symbol.chars();
    match (chars.next().and_then(Tile::letter), chars.next()) {
        (Some(tile), None) => Some(Some(tile)),
        _ => None,
    }
}
