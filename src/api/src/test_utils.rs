use std::io::Write;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use tempfile::NamedTempFile;

use crate::config::ServerConfig;
use crate::game::board::{Board, BoardLayout, Grid, Position, Tile};
use crate::game::conversion::{grid_to_rows, SerializableGrid};
use crate::game::directions::Axis;
use crate::game::{GameEngine, Trie};
use crate::http_api::{create_router, ApiState};

const TEST_WORDS: &[&str] = &[
    "an", "as", "at", "bag", "bat", "cat", "cats", "cot", "dog", "dogs", "on", "so", "to",
];

/// Creates a temporary wordlist file for testing
pub fn create_test_wordlist() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for word in TEST_WORDS {
        writeln!(file, "{}", word).unwrap();
    }
    file
}

/// Creates a test trie with the same words as the test wordlist
pub fn create_test_trie() -> Trie {
    Trie::from(TEST_WORDS.to_vec())
}

/// Engine over the test words with the standard premium layout
pub fn create_test_engine() -> GameEngine {
    engine_with_layout(BoardLayout::standard())
}

pub fn engine_with_layout(layout: BoardLayout) -> GameEngine {
    GameEngine::with_trie(create_test_trie(), layout)
}

pub fn engine_with_words(words: &[&str], layout: BoardLayout) -> GameEngine {
    GameEngine::with_trie(Trie::from(words.to_vec()), layout)
}

/// Writes `word` into `grid` starting at (row, col). `_` places a blank.
pub fn place_word(grid: &mut Grid, row: usize, col: usize, axis: Axis, word: &str) {
    let mut position = Position::new(row, col);
    for (i, c) in word.chars().enumerate() {
        if i > 0 {
            position = position.step(axis, true).unwrap();
        }
        let tile = if c == '_' {
            Tile::Blank
        } else {
            Tile::letter(c).unwrap()
        };
        grid.set(position, Some(tile));
    }
}

pub fn grid_with(words: &[(usize, usize, Axis, &str)]) -> Grid {
    let mut grid = Grid::new();
    for (row, col, axis, word) in words {
        place_word(&mut grid, *row, *col, *axis, word);
    }
    grid
}

/// Confirmed board holding `words`, without any blanks
pub fn board_with(words: &[(usize, usize, Axis, &str)]) -> Board {
    let mut board = Board::new();
    board.commit(grid_with(words), &[]);
    board
}

/// Wire rows for a grid holding `words`
pub fn rows_with(words: &[(usize, usize, Axis, &str)]) -> SerializableGrid {
    grid_to_rows(&grid_with(words))
}

pub fn create_test_app() -> Router {
    let state = ApiState::new(engine_with_layout(BoardLayout::plain()));
    create_router(state, &ServerConfig::default())
}

/// Helper for creating test HTTP requests
pub fn create_test_request(
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    builder
        .body(Body::from(
            body.map(|value| value.to_string()).unwrap_or_default(),
        ))
        .unwrap()
}

pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
