use super::{Position, BOARD_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bonus {
    #[default]
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl Bonus {
    pub fn letter_multiplier(self) -> u32 {
        match self {
            Bonus::DoubleLetter => 2,
            Bonus::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(self) -> u32 {
        match self {
            Bonus::DoubleWord => 2,
            Bonus::TripleWord => 3,
            _ => 1,
        }
    }

    /// Short label drawn on an empty bonus square.
    pub fn code(self) -> &'static str {
        match self {
            Bonus::None => "",
            Bonus::DoubleLetter => "DL",
            Bonus::TripleLetter => "TL",
            Bonus::DoubleWord => "DW",
            Bonus::TripleWord => "TW",
        }
    }

    fn from_symbol(symbol: u8) -> Bonus {
        match symbol {
            b'T' => Bonus::TripleWord,
            b'D' => Bonus::DoubleWord,
            b't' => Bonus::TripleLetter,
            b'd' => Bonus::DoubleLetter,
            _ => Bonus::None,
        }
    }
}

// T = triple word, D = double word, t = triple letter, d = double letter
const STANDARD_LAYOUT: [&str; BOARD_SIZE] = [
    "T..d...T...d..T",
    ".D...t...t...D.",
    "..D...d.d...D..",
    "d..D...d...D..d",
    "....D.....D....",
    ".t...t...t...t.",
    "..d...d.d...d..",
    "T..d...D...d..T",
    "..d...d.d...d..",
    ".t...t...t...t.",
    "....D.....D....",
    "d..D...d...D..d",
    "..D...d.d...D..",
    ".D...t...t...D.",
    "T..d...T...d..T",
];

/// Special-tile map. Fixed for the lifetime of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    bonuses: [[Bonus; BOARD_SIZE]; BOARD_SIZE],
}

impl BoardLayout {
    pub fn standard() -> Self {
        let mut layout = Self::plain();
        for (row, line) in STANDARD_LAYOUT.iter().enumerate() {
            for (col, symbol) in line.bytes().enumerate() {
                layout.bonuses[row][col] = Bonus::from_symbol(symbol);
            }
        }
        layout
    }

    /// A layout without any bonus squares.
    pub fn plain() -> Self {
        Self {
            bonuses: [[Bonus::None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn with_bonus(mut self, pos: Position, bonus: Bonus) -> Self {
        self.bonuses[pos.row][pos.col] = bonus;
        self
    }

    pub fn bonus_at(&self, pos: Position) -> Bonus {
        self.bonuses[pos.row][pos.col]
    }
}
