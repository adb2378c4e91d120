use anyhow::Result;
use tracing::info;

use scorebble::game::{
    BoardLayout, GameEngine, GameSession, Position, SessionError, Tile, Trie, TurnOutcome,
};

const WORDS: &[&str] = &["cat", "cats", "cot", "dog", "so", "to"];

fn place(game: &mut GameSession, row: usize, col: usize, across: bool, word: &str) -> Result<()> {
    for (i, c) in word.chars().enumerate() {
        let position = if across {
            Position::new(row, col + i)
        } else {
            Position::new(row + i, col)
        };
        let tile = if c == '_' { Some(Tile::Blank) } else { Tile::letter(c) };
        game.place_tile(position, tile)?;
    }
    Ok(())
}

fn report(outcome: Result<TurnOutcome, SessionError>) {
    match outcome {
        Ok(TurnOutcome::Committed(entry)) => info!("{}", entry),
        Ok(TurnOutcome::NeedsChoice(candidates)) => info!("Blank could be {}", candidates.join(" or ")),
        Err(SessionError::Rejected(err)) => info!("Rejected [{}]: {}", err.code(), err),
        Err(err) => info!("Error: {}", err),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let engine = GameEngine::with_trie(Trie::from(WORDS.to_vec()), BoardLayout::standard());
    let mut game = GameSession::new(engine, ["Ann", "Bob"])?;

    // Opening word across the centre square
    place(&mut game, 7, 7, true, "CAT")?;
    report(game.confirm_turn());

    // Extension of a confirmed word
    place(&mut game, 7, 10, true, "S")?;
    report(game.confirm_turn());

    // A blank that fits two words
    place(&mut game, 3, 3, true, "C_T")?;
    report(game.confirm_turn());
    report(game.choose_word("COT"));

    // Not a word
    place(&mut game, 8, 7, false, "XQ")?;
    report(game.confirm_turn());

    println!("{}", game.board());
    for player in game.players() {
        println!("{}: {}", player.name, player.score);
    }
    for entry in game.history() {
        println!("{}", entry);
    }
    Ok(())
}
