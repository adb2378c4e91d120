use serde::Serialize;

use super::error::SessionError;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }
}

/// Builds the roster a game starts with. Membership is fixed from then on.
pub fn roster<I, S>(names: I) -> Result<Vec<Player>, SessionError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let players: Vec<Player> = names
        .into_iter()
        .map(|name| {
            let name: String = name.into();
            Player::new(name.trim())
        })
        .collect();

    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(SessionError::PlayerCount {
            count: players.len(),
            min: MIN_PLAYERS,
            max: MAX_PLAYERS,
        });
    }
    if players.iter().any(|p| p.name.is_empty()) {
        return Err(SessionError::EmptyPlayerName);
    }
    Ok(players)
}
