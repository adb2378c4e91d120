use core::fmt;
use serde::Serialize;

use crate::game::directions::Axis;

pub mod layout;

pub use layout::{BoardLayout, Bonus};

pub const BOARD_SIZE: usize = 15;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index into the flattened board.
    pub fn flat(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Neighbouring cell along `axis`, or `None` past the edge of the board.
    pub fn step(&self, axis: Axis, forward: bool) -> Option<Position> {
        let (dr, dc) = axis.delta();
        let (dr, dc) = if forward { (dr, dc) } else { (-dr, -dc) };
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Position { row, col })
    }

    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A physical tile. A blank keeps being a blank after it is resolved; the
/// letter it stands for lives on the confirmed [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Letter(char),
    Blank,
}

impl Tile {
    /// Letter tile for an ASCII letter, upper-cased.
    pub fn letter(c: char) -> Option<Tile> {
        c.is_ascii_alphabetic().then(|| Tile::Letter(c.to_ascii_uppercase()))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Tile::Blank)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.cells[pos.row][pos.col]
    }

    pub fn set(&mut self, pos: Position, tile: Option<Tile>) {
        self.cells[pos.row][pos.col] = tile;
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    pub fn is_empty(&self) -> bool {
        Position::all().all(|pos| !self.is_occupied(pos))
    }

    /// Cells whose contents differ between `self` and `other`, in row-major order.
    pub fn diff(&self, other: &Grid) -> Vec<Position> {
        Position::all()
            .filter(|pos| self.get(*pos) != other.get(*pos))
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                match cell {
                    Some(Tile::Letter(c)) => write!(f, " {} ", c)?,
                    Some(Tile::Blank) => write!(f, " _ ")?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The confirmed board: tiles committed by earlier turns, plus the letter
/// every committed blank was resolved to. Resolved letters are only ever
/// added, mirroring the physical tile staying where it was placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    tiles: Grid,
    blanks: [[Option<char>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tiles(&self) -> &Grid {
        &self.tiles
    }

    pub fn resolved_letter(&self, pos: Position) -> Option<char> {
        self.blanks[pos.row][pos.col]
    }

    /// The letter a cell reads as: the tile's own letter, or the letter a
    /// blank was resolved to.
    pub fn letter_at(&self, pos: Position) -> Option<char> {
        match self.tiles.get(pos)? {
            Tile::Letter(c) => Some(c),
            Tile::Blank => self.resolved_letter(pos),
        }
    }

    pub fn blank_assignments(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        Position::all().filter_map(|pos| self.resolved_letter(pos).map(|c| (pos, c)))
    }

    pub(crate) fn commit(&mut self, tiles: Grid, assignments: &[(Position, char)]) {
        self.tiles = tiles;
        for (pos, letter) in assignments {
            self.blanks[pos.row][pos.col] = Some(*letter);
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                match (self.tiles.get(pos), self.letter_at(pos)) {
                    (Some(Tile::Blank), Some(c)) => write!(f, " {} ", c.to_ascii_lowercase())?,
                    (Some(Tile::Blank), None) => write!(f, " _ ")?,
                    (Some(Tile::Letter(c)), _) => write!(f, " {} ", c)?,
                    (None, _) => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_index_is_row_major() {
        assert_eq!(Position::new(7, 10).flat(), 115);
        assert_eq!(Position::new(0, 0).flat(), 0);
        assert_eq!(Position::new(14, 14).flat(), BOARD_SIZE * BOARD_SIZE - 1);
    }

    #[test]
    fn test_step_stops_at_edges() {
        let corner = Position::new(0, 14);
        assert_eq!(corner.step(Axis::Horizontal, true), None);
        assert_eq!(corner.step(Axis::Vertical, false), None);
        assert_eq!(corner.step(Axis::Horizontal, false), Some(Position::new(0, 13)));
        assert_eq!(corner.step(Axis::Vertical, true), Some(Position::new(1, 14)));
    }

    #[test]
    fn test_tile_letter_uppercases() {
        assert_eq!(Tile::letter('q'), Some(Tile::Letter('Q')));
        assert_eq!(Tile::letter('7'), None);
        assert!(Tile::Blank.is_blank());
    }

    #[test]
    fn test_grid_diff_is_row_major() {
        let empty = Grid::new();
        let mut grid = Grid::new();
        grid.set(Position::new(3, 1), Some(Tile::Letter('B')));
        grid.set(Position::new(0, 9), Some(Tile::Blank));

        assert_eq!(
            empty.diff(&grid),
            vec![Position::new(0, 9), Position::new(3, 1)]
        );
        assert!(grid.diff(&grid.clone()).is_empty());
        assert!(empty.is_empty());
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_board_reads_resolved_blanks() {
        let mut tiles = Grid::new();
        let blank = Position::new(7, 8);
        tiles.set(Position::new(7, 7), Some(Tile::Letter('C')));
        tiles.set(blank, Some(Tile::Blank));

        let mut board = Board::new();
        board.commit(tiles.clone(), &[(blank, 'O')]);

        assert_eq!(board.tiles(), &tiles);
        assert_eq!(board.letter_at(blank), Some('O'));
        assert_eq!(board.letter_at(Position::new(7, 7)), Some('C'));
        assert_eq!(board.letter_at(Position::new(0, 0)), None);
        assert_eq!(board.blank_assignments().collect::<Vec<_>>(), vec![(blank, 'O')]);
    }

    #[test]
    fn test_board_commit_keeps_earlier_blanks() {
        let first = Position::new(1, 1);
        let second = Position::new(2, 2);
        let mut board = Board::new();
        board.commit(Grid::new(), &[(first, 'A')]);
        board.commit(Grid::new(), &[(second, 'B')]);

        assert_eq!(board.resolved_letter(first), Some('A'));
        assert_eq!(board.resolved_letter(second), Some('B'));
    }
}
