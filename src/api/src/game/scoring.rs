use std::collections::BTreeMap;

use phf::phf_map;

use super::board::{BoardLayout, Position, Tile};
use super::placement::PlayedWord;

static LETTER_POINTS: phf::Map<char, u32> = phf_map! {
    'A' => 1, 'B' => 3, 'C' => 3, 'D' => 2, 'E' => 1, 'F' => 4, 'G' => 2,
    'H' => 4, 'I' => 1, 'J' => 8, 'K' => 5, 'L' => 1, 'M' => 3, 'N' => 1,
    'O' => 1, 'P' => 3, 'Q' => 10, 'R' => 1, 'S' => 1, 'T' => 1, 'U' => 1,
    'V' => 4, 'W' => 4, 'X' => 8, 'Y' => 4, 'Z' => 10,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredWord {
    pub word: String,
    pub value: u32,
}

/// A validated turn, ready to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredTurn {
    pub words: Vec<ScoredWord>,
    pub total: u32,
    /// Blanks placed this turn and the letters they were resolved to.
    pub blanks: Vec<(Position, char)>,
}

#[derive(Debug, Clone)]
pub struct Scorer {
    layout: BoardLayout,
}

impl Scorer {
    pub fn new(layout: BoardLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn get_letter_points(&self, letter: char) -> u32 {
        LETTER_POINTS
            .get(&letter.to_ascii_uppercase())
            .copied()
            .unwrap_or(0)
    }

    /// Face value of every letter, shown on the tiles by the board editor.
    pub fn letter_points(&self) -> BTreeMap<char, u32> {
        ('A'..='Z').map(|c| (c, self.get_letter_points(c))).collect()
    }

    /// Face value of a tile. A blank is worth nothing whatever it stands for.
    pub fn tile_points(&self, tile: Tile) -> u32 {
        match tile {
            Tile::Letter(c) => self.get_letter_points(c),
            Tile::Blank => 0,
        }
    }

    /// Letter sum and word multiplier of `word`. Bonus squares only count
    /// under tiles placed this turn.
    pub fn score(&self, word: &PlayedWord) -> (u32, u32) {
        word.cells.iter().fold((0, 1), |(sum, multiplier), cell| {
            let points = self.tile_points(cell.tile);
            if cell.is_new {
                let bonus = self.layout.bonus_at(cell.position);
                (
                    sum + points * bonus.letter_multiplier(),
                    multiplier * bonus.word_multiplier(),
                )
            } else {
                (sum + points, multiplier)
            }
        })
    }

    pub fn apply(&self, word: &mut PlayedWord) {
        let (sum, multiplier) = self.score(word);
        word.multiplier = multiplier;
        word.value = sum * multiplier;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Bonus;
    use crate::game::placement::WordCell;

    fn cell(col: usize, tile: Tile, is_new: bool) -> WordCell {
        let letter = match tile {
            Tile::Letter(c) => Some(c),
            Tile::Blank => None,
        };
        WordCell {
            position: Position::new(7, col),
            tile,
            is_new,
            letter,
        }
    }

    fn cat(new: [bool; 3]) -> PlayedWord {
        PlayedWord::new(vec![
            cell(7, Tile::Letter('C'), new[0]),
            cell(8, Tile::Letter('A'), new[1]),
            cell(9, Tile::Letter('T'), new[2]),
        ])
    }

    #[test]
    fn test_letter_points() {
        let scorer = Scorer::new(BoardLayout::plain());
        assert_eq!(scorer.get_letter_points('Q'), 10);
        assert_eq!(scorer.get_letter_points('e'), 1);
        assert_eq!(scorer.get_letter_points('?'), 0);
        assert_eq!(scorer.tile_points(Tile::Blank), 0);
        assert_eq!(scorer.tile_points(Tile::Letter('Z')), 10);
    }

    #[test]
    fn test_letter_points_table() {
        let points = Scorer::new(BoardLayout::plain()).letter_points();
        assert_eq!(points.len(), 26);
        assert_eq!(points.get(&'A'), Some(&1));
        assert_eq!(points.get(&'K'), Some(&5));
        assert_eq!(points.get(&'Z'), Some(&10));
        assert_eq!(points.values().sum::<u32>(), 87);
    }

    #[test]
    fn test_triple_word_on_new_tile() {
        let layout = BoardLayout::plain().with_bonus(Position::new(7, 7), Bonus::TripleWord);
        let scorer = Scorer::new(layout);
        let mut word = cat([true; 3]);
        scorer.apply(&mut word);
        assert_eq!(word.multiplier, 3);
        assert_eq!(word.value, 15);
    }

    #[test]
    fn test_letter_bonus_applies_before_word_bonus() {
        let layout = BoardLayout::plain()
            .with_bonus(Position::new(7, 7), Bonus::TripleLetter)
            .with_bonus(Position::new(7, 9), Bonus::DoubleWord);
        let mut word = cat([true; 3]);
        Scorer::new(layout).apply(&mut word);
        // (3*3 + 1 + 1) * 2
        assert_eq!(word.value, 22);
    }

    #[test]
    fn test_word_bonuses_multiply_in_either_order() {
        let dw_then_tw = BoardLayout::plain()
            .with_bonus(Position::new(7, 7), Bonus::DoubleWord)
            .with_bonus(Position::new(7, 9), Bonus::TripleWord);
        let tw_then_dw = BoardLayout::plain()
            .with_bonus(Position::new(7, 7), Bonus::TripleWord)
            .with_bonus(Position::new(7, 9), Bonus::DoubleWord);

        let mut first = cat([true; 3]);
        let mut second = cat([true; 3]);
        Scorer::new(dw_then_tw).apply(&mut first);
        Scorer::new(tw_then_dw).apply(&mut second);

        assert_eq!(first.multiplier, 6);
        assert_eq!(first.value, 30);
        assert_eq!(first.value, second.value);
    }

    #[test]
    fn test_bonus_ignored_under_confirmed_tiles() {
        let layout = BoardLayout::plain()
            .with_bonus(Position::new(7, 7), Bonus::TripleWord)
            .with_bonus(Position::new(7, 8), Bonus::TripleLetter);
        let mut word = cat([false, false, true]);
        Scorer::new(layout).apply(&mut word);
        assert_eq!(word.multiplier, 1);
        assert_eq!(word.value, 5);
    }

    #[test]
    fn test_blank_scores_zero_even_on_bonus() {
        let layout = BoardLayout::plain().with_bonus(Position::new(7, 8), Bonus::TripleLetter);
        let mut word = PlayedWord::new(vec![
            cell(7, Tile::Letter('C'), true),
            cell(8, Tile::Blank, true),
            cell(9, Tile::Letter('T'), true),
        ]);
        word.assign(Position::new(7, 8), 'Q');
        Scorer::new(layout).apply(&mut word);
        assert_eq!(word.value, 4);
    }
}
