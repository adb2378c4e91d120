use tracing::{info, warn};

use super::blanks::BlankResolution;
use super::board::{Board, Grid, Position, Tile};
use super::error::{SessionError, TurnError};
use super::history::MoveHistoryEntry;
use super::placement::Placement;
use super::player::{self, Player};
use super::scoring::ScoredTurn;
use super::GameEngine;

/// Where the current turn stands. `Rejected` keeps the proposed grid so the
/// player can correct it and confirm again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    Editing,
    AwaitingChoice,
    Committed,
    Rejected(TurnError),
}

impl TurnState {
    pub fn name(&self) -> &'static str {
        match self {
            TurnState::Idle => "idle",
            TurnState::Editing => "editing",
            TurnState::AwaitingChoice => "awaiting_choice",
            TurnState::Committed => "committed",
            TurnState::Rejected(_) => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Committed(MoveHistoryEntry),
    /// The blank fits several words. Resume with
    /// [`GameSession::choose_word`] or [`GameSession::abandon_choice`].
    NeedsChoice(Vec<String>),
}

#[derive(Debug, Clone)]
struct PendingChoice {
    placement: Placement,
    candidates: Vec<String>,
}

/// One game: the confirmed board, the turn being edited, and the players.
#[derive(Clone)]
pub struct GameSession {
    engine: GameEngine,
    board: Board,
    proposed: Grid,
    players: Vec<Player>,
    active_player: usize,
    history: Vec<MoveHistoryEntry>,
    state: TurnState,
    pending: Option<PendingChoice>,
}

impl GameSession {
    pub fn new<I, S>(engine: GameEngine, names: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players = player::roster(names)?;
        info!("Starting game with {} players", players.len());
        Ok(Self {
            engine,
            board: Board::new(),
            proposed: Grid::new(),
            players,
            active_player: 0,
            history: Vec::new(),
            state: TurnState::Idle,
            pending: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn proposed(&self) -> &Grid {
        &self.proposed
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn active_player(&self) -> usize {
        self.active_player
    }

    pub fn history(&self) -> &[MoveHistoryEntry] {
        &self.history
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn candidates(&self) -> Option<&[String]> {
        self.pending.as_ref().map(|p| p.candidates.as_slice())
    }

    pub fn last_rejection(&self) -> Option<&TurnError> {
        match &self.state {
            TurnState::Rejected(err) => Some(err),
            _ => None,
        }
    }

    /// Replaces the proposed grid with a manual edit.
    pub fn set_proposed(&mut self, proposed: Grid) -> Result<(), SessionError> {
        self.ensure_not_pending()?;
        self.proposed = proposed;
        self.refresh_editing_state();
        Ok(())
    }

    /// A grid read from a photo of the board. It is only a proposal and
    /// goes through the same confirmation as a manual edit.
    pub fn apply_recognition(&mut self, recognized: Grid) -> Result<(), SessionError> {
        self.ensure_not_pending()?;
        let changed = self.board.tiles().diff(&recognized).len();
        info!("Applying recognised board with {} changed cells", changed);
        self.proposed = recognized;
        self.refresh_editing_state();
        Ok(())
    }

    /// Sets or clears one cell of the proposed grid. Confirmed cells are locked.
    pub fn place_tile(&mut self, position: Position, tile: Option<Tile>) -> Result<(), SessionError> {
        self.ensure_not_pending()?;
        if self.board.tiles().is_occupied(position) {
            return Err(SessionError::CellLocked(position));
        }
        self.proposed.set(position, tile);
        self.refresh_editing_state();
        Ok(())
    }

    /// Validates the proposed grid and commits it if every word checks out.
    /// Stops at [`TurnOutcome::NeedsChoice`] when a blank fits more than one
    /// word.
    pub fn confirm_turn(&mut self) -> Result<TurnOutcome, SessionError> {
        self.ensure_not_pending()?;

        let placement = match self.engine.extract_placement(&self.board, &self.proposed) {
            Ok(placement) => placement,
            // Nothing to validate, so the turn state stays as it was.
            Err(TurnError::NoChange) => return Err(TurnError::NoChange.into()),
            Err(err) => return Err(self.reject(err)),
        };

        if !placement.main_word.has_unresolved_blank() {
            return self.finish(placement, None);
        }

        match self.engine.resolve_blanks(&placement.main_word) {
            BlankResolution::Unique(word) => {
                info!("Blank resolved to the only candidate {}", word);
                self.finish(placement, Some(&word))
            }
            BlankResolution::Multiple(candidates) => {
                info!("Blank fits {} words, waiting for a choice", candidates.len());
                self.pending = Some(PendingChoice {
                    placement,
                    candidates: candidates.clone(),
                });
                self.state = TurnState::AwaitingChoice;
                Ok(TurnOutcome::NeedsChoice(candidates))
            }
            BlankResolution::Unmatched => {
                let pattern = placement.main_word.text();
                Err(self.reject(TurnError::BlankUnresolvable { pattern }))
            }
        }
    }

    /// Resumes a turn waiting on a blank. `word` must be one of the offered
    /// candidates; any other word leaves the choice pending.
    pub fn choose_word(&mut self, word: &str) -> Result<TurnOutcome, SessionError> {
        let chosen = word.trim().to_ascii_uppercase();
        let pending = self.pending.as_ref().ok_or(SessionError::NoPendingChoice)?;
        if !pending.candidates.contains(&chosen) {
            return Err(SessionError::ChoiceNotOffered(chosen));
        }

        let Some(pending) = self.pending.take() else {
            return Err(SessionError::NoPendingChoice);
        };
        self.finish(pending.placement, Some(&chosen))
    }

    /// Drops a turn waiting on a blank. Nothing is committed; the proposed
    /// grid stays for another attempt.
    pub fn abandon_choice(&mut self) -> Result<(), SessionError> {
        if self.pending.take().is_none() {
            return Err(SessionError::NoPendingChoice);
        }
        self.reject(TurnError::Abandoned);
        Ok(())
    }

    fn finish(&mut self, placement: Placement, chosen: Option<&str>) -> Result<TurnOutcome, SessionError> {
        match self.engine.finalize(placement, chosen) {
            Ok(turn) => Ok(TurnOutcome::Committed(self.commit(turn))),
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Applies a validated turn. Board, score, active player and history
    /// change together here and nowhere else.
    fn commit(&mut self, turn: ScoredTurn) -> MoveHistoryEntry {
        let player = &mut self.players[self.active_player];
        player.score += turn.total;
        let entry = MoveHistoryEntry::new(player.name.clone(), &turn);

        self.board.commit(self.proposed.clone(), &turn.blanks);
        self.active_player = (self.active_player + 1) % self.players.len();
        self.history.push(entry.clone());
        self.state = TurnState::Committed;

        info!("{}", entry);
        entry
    }

    fn reject(&mut self, err: TurnError) -> SessionError {
        warn!("Turn rejected ({}): {}", err.code(), err);
        self.state = TurnState::Rejected(err.clone());
        SessionError::Rejected(err)
    }

    fn ensure_not_pending(&self) -> Result<(), SessionError> {
        match self.pending {
            Some(_) => Err(SessionError::ChoicePending),
            None => Ok(()),
        }
    }

    fn refresh_editing_state(&mut self) {
        self.state = if self.proposed == *self.board.tiles() {
            TurnState::Idle
        } else {
            TurnState::Editing
        };
    }
}
