use rand::Rng;
use tracing::{debug, info, warn};

use super::board::BoardError;
use super::rules::{self, Line};
use super::{Board, Cell, Player, StartingPlayer};

/// Turn controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingMove(Player),
    Won(Player),
    Tied,
}

/// Terminal signal handed to whoever keeps the score record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Won(Player),
    Tied,
}

/// Result of an accepted (or ignored) move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The column was full; nothing changed.
    Ignored,
    Placed {
        row: usize,
        column: usize,
        player: Player,
    },
    Won {
        row: usize,
        column: usize,
        player: Player,
    },
    Tied {
        row: usize,
        column: usize,
    },
}

impl MoveOutcome {
    /// The terminal event this move produced, if any.
    pub fn event(&self) -> Option<GameEvent> {
        match *self {
            MoveOutcome::Won { player, .. } => Some(GameEvent::Won(player)),
            MoveOutcome::Tied { .. } => Some(GameEvent::Tied),
            MoveOutcome::Ignored | MoveOutcome::Placed { .. } => None,
        }
    }

    /// Cell the piece landed in, `None` for an ignored move.
    pub fn position(&self) -> Option<(usize, usize)> {
        match *self {
            MoveOutcome::Ignored => None,
            MoveOutcome::Placed { row, column, .. }
            | MoveOutcome::Won { row, column, .. }
            | MoveOutcome::Tied { row, column } => Some((row, column)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is outside the board (valid: 0..{width})")]
    InvalidColumn { column: usize, width: usize },

    #[error("game is over; start a new session to keep playing")]
    GameOver,

    #[error("board rejected the move: {0}")]
    Board(BoardError),
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::InvalidColumn { column, width } => MoveError::InvalidColumn { column, width },
            other => MoveError::Board(other),
        }
    }
}

/// One game from first move to win or tie.
///
/// A finished session is frozen; play again by creating a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    board: Board,
    state: SessionState,
    starting_player: Player,
    moves_played: usize,
}

impl Session {
    /// Canonical 7x6 session using the thread-local RNG for a random start.
    pub fn new(starting: StartingPlayer) -> Self {
        Self::with_rng(starting, &mut rand::rng())
    }

    /// Canonical 7x6 session, drawing a random start from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(starting: StartingPlayer, rng: &mut R) -> Self {
        Self::from_board(Board::new(), starting.resolve(rng))
    }

    /// Session on a board of explicit size.
    pub fn with_dimensions<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        starting: StartingPlayer,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let board = Board::with_dimensions(width, height)?;
        Ok(Self::from_board(board, starting.resolve(rng)))
    }

    fn from_board(board: Board, starting_player: Player) -> Self {
        info!(
            width = board.width(),
            height = board.height(),
            starting = starting_player.number(),
            "new session"
        );
        Session {
            board,
            state: SessionState::AwaitingMove(starting_player),
            starting_player,
            moves_played: 0,
        }
    }

    /// Drop the active player's piece into `column`.
    ///
    /// A full column is not an error: the request is ignored. An out-of-range
    /// column or a finished session is rejected without touching the board.
    pub fn attempt_move(&mut self, column: usize) -> Result<MoveOutcome, MoveError> {
        let player = match self.state {
            SessionState::AwaitingMove(player) => player,
            SessionState::Won(_) | SessionState::Tied => {
                warn!(column, "move requested on finished session");
                return Err(MoveError::GameOver);
            }
        };

        let row = match self.board.lowest_empty_row(column) {
            Ok(Some(row)) => row,
            Ok(None) => {
                debug!(column, "column full, move ignored");
                return Ok(MoveOutcome::Ignored);
            }
            Err(err) => {
                warn!(column, %err, "rejected move");
                return Err(err.into());
            }
        };

        self.board.place(row, column, player)?;
        self.moves_played += 1;
        debug!(row, column, player = player.number(), "placed piece");

        // Win is checked before tie: a move that fills the board can still win.
        if rules::has_four_in_a_row(&self.board, player) {
            self.state = SessionState::Won(player);
            info!(player = player.number(), moves = self.moves_played, "game won");
            debug!("final board:\n{}", self.board);
            return Ok(MoveOutcome::Won { row, column, player });
        }

        if self.board.is_full() {
            self.state = SessionState::Tied;
            info!(moves = self.moves_played, "game tied");
            return Ok(MoveOutcome::Tied { row, column });
        }

        self.state = SessionState::AwaitingMove(player.other());
        Ok(MoveOutcome::Placed { row, column, player })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, row: usize, column: usize) -> Option<Cell> {
        self.board.get(row, column)
    }

    /// Player to move; once finished, the player who made the last move.
    pub fn active_player(&self) -> Player {
        match self.state {
            SessionState::AwaitingMove(player) | SessionState::Won(player) => player,
            // The tying move was made by whoever did not start when the move
            // count is even.
            SessionState::Tied => {
                if self.moves_played % 2 == 1 {
                    self.starting_player
                } else {
                    self.starting_player.other()
                }
            }
        }
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        !matches!(self.state, SessionState::AwaitingMove(_))
    }

    pub fn starting_player(&self) -> Player {
        self.starting_player
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Winner of a finished session.
    pub fn winner(&self) -> Option<Player> {
        match self.state {
            SessionState::Won(player) => Some(player),
            _ => None,
        }
    }

    /// The winning run of a won session.
    pub fn winning_line(&self) -> Option<Line> {
        self.winner()
            .and_then(|player| rules::winning_line(&self.board, player))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(StartingPlayer::Random)
    }
}
