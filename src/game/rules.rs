//! Win and tie detection.
//!
//! Detection is a brute-force scan: from every cell, in each of the four
//! directions, try to read a run of [`RUN_LENGTH`] cells. Runs that leave the
//! board fail the same check that tests ownership.

use super::{Board, Player};

/// Pieces in a row needed to win.
pub const RUN_LENGTH: usize = 4;

/// A run of winning cells as `(row, column)` pairs.
pub type Line = [(usize, usize); RUN_LENGTH];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Increasing column.
    Horizontal,
    /// Increasing row.
    Vertical,
    /// row + 1, column + 1 per step.
    DiagonalDownRight,
    /// row + 1, column - 1 per step.
    DiagonalDownLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDownRight,
        Direction::DiagonalDownLeft,
    ];

    /// `(row, column)` step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalDownLeft => (1, -1),
        }
    }
}

/// True iff `player` owns four contiguous cells along any direction.
pub fn has_four_in_a_row(board: &Board, player: Player) -> bool {
    winning_line(board, player).is_some()
}

/// First winning run found for `player`, scanning rows top-down, columns
/// left-right, directions in [`Direction::ALL`] order.
pub fn winning_line(board: &Board, player: Player) -> Option<Line> {
    for row in 0..board.height() {
        for column in 0..board.width() {
            for direction in Direction::ALL {
                if let Some(line) = run_from(board, player, row, column, direction) {
                    return Some(line);
                }
            }
        }
    }
    None
}

/// Full board and nobody has four in a row.
pub fn is_tie(board: &Board) -> bool {
    board.is_full()
        && !has_four_in_a_row(board, Player::One)
        && !has_four_in_a_row(board, Player::Two)
}

fn run_from(
    board: &Board,
    player: Player,
    row: usize,
    column: usize,
    direction: Direction,
) -> Option<Line> {
    let (dr, dc) = direction.delta();
    let target = player.to_cell();
    let mut line = [(0, 0); RUN_LENGTH];

    for (step, slot) in line.iter_mut().enumerate() {
        let r = row as isize + dr * step as isize;
        let c = column as isize + dc * step as isize;
        if board.get_signed(r, c) != Some(target) {
            return None;
        }
        *slot = (r as usize, c as usize);
    }

    Some(line)
}
