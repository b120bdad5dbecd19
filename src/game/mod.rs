//! Core Connect Four rules: board, players, win/tie detection, and the turn
//! controller that ties them together.

mod board;
mod player;
pub mod rules;
mod session;

pub use board::{Board, BoardError, Cell, HEIGHT, WIDTH};
pub use player::{Player, StartingPlayer};
pub use rules::{has_four_in_a_row, is_tie, winning_line};
pub use session::{GameEvent, MoveError, MoveOutcome, Session, SessionState};
