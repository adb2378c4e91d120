use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::game::conversion::{
    cell_from_symbol, grid_from_rows, grid_to_rows, GridError, SerializableBoard, SerializableGrid,
};
use crate::game::{
    GameEngine, GameSession, Player, Position, SessionError, TurnError, TurnOutcome, BOARD_SIZE,
};

// HTTP API types
#[derive(Serialize, Deserialize, Debug)]
pub struct NewGameRequest {
    pub players: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BoardRequest {
    pub board: SerializableGrid,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CellRequest {
    pub row: usize,
    pub col: usize,
    /// `""` clears the cell, `" "` is a blank, otherwise one letter.
    pub tile: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChooseRequest {
    pub word: String,
}

#[derive(Serialize, Debug)]
pub struct ApiRejection {
    pub code: &'static str,
    pub message: String,
    pub word: Option<String>,
    pub position: Option<Position>,
}

impl From<&TurnError> for ApiRejection {
    fn from(err: &TurnError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
            word: err.word().map(str::to_string),
            position: err.position(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ApiGame {
    pub board: SerializableBoard,
    pub proposed: SerializableGrid,
    pub players: Vec<Player>,
    pub active_player: usize,
    pub state: &'static str,
    pub candidates: Vec<String>,
    pub last_rejection: Option<ApiRejection>,
    pub history: Vec<String>,
}

impl From<&GameSession> for ApiGame {
    fn from(game: &GameSession) -> Self {
        Self {
            board: SerializableBoard::from(game.board()),
            proposed: grid_to_rows(game.proposed()),
            players: game.players().to_vec(),
            active_player: game.active_player(),
            state: game.state().name(),
            candidates: game.candidates().map(<[String]>::to_vec).unwrap_or_default(),
            last_rejection: game.last_rejection().map(ApiRejection::from),
            history: game.history().iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TurnResponse {
    Committed {
        summary: String,
        words: Vec<String>,
        score: u32,
        game: ApiGame,
    },
    NeedsChoice {
        candidates: Vec<String>,
    },
    Rejected(ApiRejection),
}

/// Static tables the board editor draws from: the label of every bonus
/// square (`""` for a plain one) and the point value of every letter.
#[derive(Serialize, Debug)]
pub struct LayoutResponse {
    pub bonuses: Vec<Vec<&'static str>>,
    pub letter_points: BTreeMap<char, u32>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DictionaryResponse {
    pub word: String,
    pub valid: bool,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no game has been started")]
    NoGame,
    #[error(transparent)]
    InvalidBoard(#[from] GridError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NoGame => StatusCode::NOT_FOUND,
            ApiError::InvalidBoard(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Session(err) => match err {
                SessionError::PlayerCount { .. } | SessionError::EmptyPlayerName => {
                    StatusCode::BAD_REQUEST
                }
                SessionError::ChoiceNotOffered(_) | SessionError::Rejected(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                SessionError::CellLocked(_)
                | SessionError::ChoicePending
                | SessionError::NoPendingChoice => StatusCode::CONFLICT,
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::NoGame => "NO_GAME",
            ApiError::InvalidBoard(_) => "INVALID_BOARD",
            ApiError::Session(err) => match err {
                SessionError::Rejected(turn) => turn.code(),
                SessionError::PlayerCount { .. } => "PLAYER_COUNT",
                SessionError::EmptyPlayerName => "EMPTY_PLAYER_NAME",
                SessionError::CellLocked(_) => "CELL_LOCKED",
                SessionError::ChoicePending => "CHOICE_PENDING",
                SessionError::NoPendingChoice => "NO_PENDING_CHOICE",
                SessionError::ChoiceNotOffered(_) => "CHOICE_NOT_OFFERED",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        (self.status(), Json(body)).into_response()
    }
}

/// One game per server. Every handler locks the session for the whole
/// request, so turns are applied one at a time.
#[derive(Clone)]
pub struct ApiState {
    pub game_engine: GameEngine,
    pub session: Arc<Mutex<Option<GameSession>>>,
}

impl ApiState {
    pub fn new(game_engine: GameEngine) -> Self {
        Self {
            game_engine,
            session: Arc::new(Mutex::new(None)),
        }
    }

    async fn with_game<T>(
        &self,
        f: impl FnOnce(&mut GameSession) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut session = self.session.lock().await;
        let game = session.as_mut().ok_or(ApiError::NoGame)?;
        f(game)
    }
}

pub fn create_router(state: ApiState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/game", post(start_game).get(get_game))
        .route("/api/game/board", put(set_board))
        .route("/api/game/cell", put(set_cell))
        .route("/api/game/recognized", post(apply_recognized))
        .route("/api/game/confirm", post(confirm_turn))
        .route("/api/game/choose", post(choose_word))
        .route("/api/game/abandon", post(abandon_choice))
        .route("/api/layout", get(get_layout))
        .route("/api/dictionary/:word", get(check_word))
        .layer(RequestBodyLimitLayer::new(config.max_request_size))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors_layer(config))
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    layer.allow_origin(origins)
}

// Route handlers
async fn start_game(
    State(state): State<ApiState>,
    Json(request): Json<NewGameRequest>,
) -> Result<Json<ApiGame>, ApiError> {
    let game = GameSession::new(state.game_engine.clone(), request.players)?;
    let view = ApiGame::from(&game);
    *state.session.lock().await = Some(game);
    Ok(Json(view))
}

async fn get_game(State(state): State<ApiState>) -> Result<Json<ApiGame>, ApiError> {
    state
        .with_game(|game| Ok(ApiGame::from(&*game)))
        .await
        .map(Json)
}

async fn set_board(
    State(state): State<ApiState>,
    Json(request): Json<BoardRequest>,
) -> Result<Json<ApiGame>, ApiError> {
    let proposed = grid_from_rows(&request.board)?;
    state
        .with_game(|game| {
            game.set_proposed(proposed)?;
            Ok(ApiGame::from(&*game))
        })
        .await
        .map(Json)
}

async fn set_cell(
    State(state): State<ApiState>,
    Json(request): Json<CellRequest>,
) -> Result<Json<ApiGame>, ApiError> {
    let (position, tile) = cell_from_symbol(request.row, request.col, &request.tile)?;
    state
        .with_game(|game| {
            game.place_tile(position, tile)?;
            Ok(ApiGame::from(&*game))
        })
        .await
        .map(Json)
}

async fn apply_recognized(
    State(state): State<ApiState>,
    Json(request): Json<BoardRequest>,
) -> Result<Json<ApiGame>, ApiError> {
    let recognized = grid_from_rows(&request.board)?;
    info!("Received recognised board");
    state
        .with_game(|game| {
            game.apply_recognition(recognized)?;
            Ok(ApiGame::from(&*game))
        })
        .await
        .map(Json)
}

async fn confirm_turn(State(state): State<ApiState>) -> Result<Json<TurnResponse>, ApiError> {
    state
        .with_game(|game| {
            let outcome = game.confirm_turn();
            turn_response(game, outcome)
        })
        .await
        .map(Json)
}

async fn choose_word(
    State(state): State<ApiState>,
    Json(request): Json<ChooseRequest>,
) -> Result<Json<TurnResponse>, ApiError> {
    state
        .with_game(|game| {
            let outcome = game.choose_word(&request.word);
            turn_response(game, outcome)
        })
        .await
        .map(Json)
}

async fn abandon_choice(State(state): State<ApiState>) -> Result<Json<ApiGame>, ApiError> {
    state
        .with_game(|game| {
            game.abandon_choice()?;
            Ok(ApiGame::from(&*game))
        })
        .await
        .map(Json)
}

async fn get_layout(State(state): State<ApiState>) -> Json<LayoutResponse> {
    let scorer = state.game_engine.scorer();
    let bonuses = (0..BOARD_SIZE)
        .map(|row| {
            (0..BOARD_SIZE)
                .map(|col| scorer.layout().bonus_at(Position::new(row, col)).code())
                .collect()
        })
        .collect();
    Json(LayoutResponse {
        bonuses,
        letter_points: scorer.letter_points(),
    })
}

async fn check_word(
    Path(word): Path<String>,
    State(state): State<ApiState>,
) -> Json<DictionaryResponse> {
    Json(DictionaryResponse {
        valid: state.game_engine.validate_word(&word),
        word: word.to_ascii_uppercase(),
    })
}

/// A rejected turn is a normal answer, not an HTTP error.
fn turn_response(
    game: &GameSession,
    outcome: Result<TurnOutcome, SessionError>,
) -> Result<TurnResponse, ApiError> {
    match outcome {
        Ok(TurnOutcome::Committed(entry)) => Ok(TurnResponse::Committed {
            summary: entry.to_string(),
            score: entry.score,
            words: entry.words,
            game: ApiGame::from(game),
        }),
        Ok(TurnOutcome::NeedsChoice(candidates)) => Ok(TurnResponse::NeedsChoice { candidates }),
        Err(SessionError::Rejected(err)) => Ok(TurnResponse::Rejected(ApiRejection::from(&err))),
        Err(err) => Err(err.into()),
    }
}
