use std::fmt;

use super::Player;

/// Canonical number of columns.
pub const WIDTH: usize = 7;
/// Canonical number of rows.
pub const HEIGHT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    /// The player holding this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions {width}x{height} are invalid (each must be positive and their product addressable)")]
    InvalidDimensions { width: usize, height: usize },

    #[error("column {column} is outside the board (width {width})")]
    InvalidColumn { column: usize, width: usize },

    #[error("cell ({row}, {column}) is outside the board")]
    OutOfBounds { row: usize, column: usize },

    #[error("cell ({row}, {column}) is already occupied")]
    CellOccupied { row: usize, column: usize },
}

/// The grid. Row 0 is the top, row `height - 1` is the bottom; pieces fall
/// toward higher row indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    // row-major
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board of the canonical 7x6 size
    pub fn new() -> Self {
        Board {
            width: WIDTH,
            height: HEIGHT,
            cells: vec![Cell::Empty; WIDTH * HEIGHT],
        }
    }

    /// Create an empty board with explicit dimensions.
    pub fn with_dimensions(width: usize, height: usize) -> Result<Self, BoardError> {
        let cells = width
            .checked_mul(height)
            .filter(|&n| n > 0 && n <= isize::MAX as usize)
            .ok_or(BoardError::InvalidDimensions { width, height })?;
        Ok(Board {
            width,
            height,
            cells: vec![Cell::Empty; cells],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position, `None` when off the board
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        if row >= self.height || column >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + column])
    }

    /// Signed lookup used by line scans that may step off the left edge.
    pub(crate) fn get_signed(&self, row: isize, column: isize) -> Option<Cell> {
        if row < 0 || column < 0 {
            return None;
        }
        self.get(row as usize, column as usize)
    }

    /// Largest empty row index in `column`, scanning bottom-up.
    /// `Ok(None)` means the column is full.
    pub fn lowest_empty_row(&self, column: usize) -> Result<Option<usize>, BoardError> {
        self.check_column(column)?;
        Ok((0..self.height)
            .rev()
            .find(|&row| self.cells[row * self.width + column].is_empty()))
    }

    /// Write `player` into an empty cell.
    ///
    /// Callers are expected to pick the cell with [`Board::lowest_empty_row`];
    /// an occupied target is a logic error and is reported, never overwritten.
    pub fn place(&mut self, row: usize, column: usize, player: Player) -> Result<(), BoardError> {
        let cell = self
            .get(row, column)
            .ok_or(BoardError::OutOfBounds { row, column })?;
        if !cell.is_empty() {
            return Err(BoardError::CellOccupied { row, column });
        }
        self.cells[row * self.width + column] = player.to_cell();
        Ok(())
    }

    /// Drop a piece in a column, returns the row where it landed
    /// (`None` if the column is full).
    pub fn drop_piece(&mut self, column: usize, player: Player) -> Result<Option<usize>, BoardError> {
        match self.lowest_empty_row(column)? {
            Some(row) => {
                self.place(row, column, player)?;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    /// Check if a column is full
    pub fn is_column_full(&self, column: usize) -> Result<bool, BoardError> {
        Ok(self.lowest_empty_row(column)?.is_none())
    }

    /// Columns that can still take a piece, left to right.
    pub fn playable_columns(&self) -> Vec<usize> {
        (0..self.width)
            .filter(|&column| self.cells[column].is_empty())
            .collect()
    }

    /// Check if every cell on the board is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    fn check_column(&self, column: usize) -> Result<(), BoardError> {
        if column >= self.width {
            return Err(BoardError::InvalidColumn {
                column,
                width: self.width,
            });
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            let line: String = (0..self.width)
                .map(|column| match self.cells[row * self.width + column] {
                    Cell::Empty => '.',
                    Cell::One => '1',
                    Cell::Two => '2',
                })
                .collect();
            if row + 1 < self.height {
                writeln!(f, "{line}")?;
            } else {
                write!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.width(), WIDTH);
        assert_eq!(board.height(), HEIGHT);
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                assert_eq!(board.get(row, col), Some(Cell::Empty));
            }
        }
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Board::with_dimensions(0, 6),
            Err(BoardError::InvalidDimensions { width: 0, height: 6 })
        );
        assert!(Board::with_dimensions(7, 0).is_err());
        assert!(Board::with_dimensions(4, 4).is_ok());
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert_eq!(
            Board::with_dimensions(usize::MAX, 2),
            Err(BoardError::InvalidDimensions {
                width: usize::MAX,
                height: 2
            })
        );
        assert!(Board::with_dimensions(2, usize::MAX).is_err());
        assert!(Board::with_dimensions(usize::MAX / 2 + 1, 1).is_err());
    }

    #[test]
    fn test_lowest_empty_row() {
        let mut board = Board::new();
        assert_eq!(board.lowest_empty_row(3), Ok(Some(5)));

        board.place(5, 3, Player::One).unwrap();
        assert_eq!(board.lowest_empty_row(3), Ok(Some(4)));
        assert_eq!(board.lowest_empty_row(2), Ok(Some(5)));
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        // Drop first piece in column 3
        let row = board.drop_piece(3, Player::One).unwrap();
        assert_eq!(row, Some(5)); // Should land at bottom
        assert_eq!(board.get(5, 3), Some(Cell::One));

        // Drop second piece in same column
        let row = board.drop_piece(3, Player::Two).unwrap();
        assert_eq!(row, Some(4)); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Some(Cell::Two));
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();

        // Fill column 0
        for _ in 0..HEIGHT {
            board.drop_piece(0, Player::One).unwrap();
        }

        assert_eq!(board.is_column_full(0), Ok(true));
        assert_eq!(board.lowest_empty_row(0), Ok(None));
        assert_eq!(board.drop_piece(0, Player::Two), Ok(None));
        assert!(!board.playable_columns().contains(&0));
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        let err = BoardError::InvalidColumn { column: 7, width: 7 };
        assert_eq!(board.lowest_empty_row(7), Err(err.clone()));
        assert_eq!(board.drop_piece(7, Player::One), Err(err));
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_bounds() {
        let mut board = Board::new();
        board.place(5, 0, Player::One).unwrap();
        assert_eq!(
            board.place(5, 0, Player::Two),
            Err(BoardError::CellOccupied { row: 5, column: 0 })
        );
        assert_eq!(board.get(5, 0), Some(Cell::One));
        assert_eq!(
            board.place(6, 0, Player::Two),
            Err(BoardError::OutOfBounds { row: 6, column: 0 })
        );
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..WIDTH {
            for _ in 0..HEIGHT {
                assert!(!board.is_full());
                board.drop_piece(col, Player::One).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.piece_count(), WIDTH * HEIGHT);
        assert!(board.playable_columns().is_empty());
    }

    #[test]
    fn test_display() {
        let mut board = Board::with_dimensions(3, 2).unwrap();
        board.drop_piece(0, Player::One).unwrap();
        board.drop_piece(2, Player::Two).unwrap();
        board.drop_piece(2, Player::One).unwrap();
        assert_eq!(board.to_string(), "..1\n1.2");
    }
}
