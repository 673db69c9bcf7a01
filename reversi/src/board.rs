mod rays;

use std::fmt;

pub use rays::*;

use crate::{visualize_board, ParseStateCodeError};

/// Number of rows and columns of the board.
pub const BOARD_SIZE: usize = 8;
/// Number of cells on the board.
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// One of the two players sharing the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// Moves first.
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    fn not(self) -> Self {
        self.opponent()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player one"),
            Player::Two => write!(f, "player two"),
        }
    }
}

/// The content of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Piece(Player),
}

impl Cell {
    /// The numeric value used in position codes: 0 for empty, 1 and 2 for the players.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Piece(Player::One) => 1,
            Cell::Piece(Player::Two) => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Piece(Player::One)),
            2 => Some(Cell::Piece(Player::Two)),
            _ => None,
        }
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Piece(player) => Some(player),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        Cell::Piece(player)
    }
}

/// Whether the signed coordinate pair `(i, j)` lies on the board.
pub fn in_bounds(i: isize, j: isize) -> bool {
    (0..BOARD_SIZE as isize).contains(&i) && (0..BOARD_SIZE as isize).contains(&j)
}

/// The flat index of row `i`, column `j`.
///
/// Panics if the coordinates are off the board.
pub fn index(i: usize, j: usize) -> usize {
    assert!(
        i < BOARD_SIZE && j < BOARD_SIZE,
        "coordinates ({}, {}) are off the {}x{} board",
        i,
        j,
        BOARD_SIZE,
        BOARD_SIZE
    );
    i * BOARD_SIZE + j
}

/// The `(row, column)` pair of a flat index.
pub fn coords(idx: usize) -> (usize, usize) {
    debug_assert!(idx < NUM_CELLS);
    (idx / BOARD_SIZE, idx % BOARD_SIZE)
}

/// The cells of the board, stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; NUM_CELLS],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_CELLS],
        }
    }

    /// The standard opening: two pieces per player, crosswise in the center.
    pub fn opening() -> Self {
        let half = BOARD_SIZE / 2;
        let mut board = Self::empty();
        board.set(half, half, Cell::Piece(Player::One));
        board.set(half - 1, half - 1, Cell::Piece(Player::One));
        board.set(half - 1, half, Cell::Piece(Player::Two));
        board.set(half, half - 1, Cell::Piece(Player::Two));
        board
    }

    /// Panics if the coordinates are off the board.
    pub fn get(&self, i: usize, j: usize) -> Cell {
        self.cells[index(i, j)]
    }

    /// Panics if the coordinates are off the board.
    pub fn set(&mut self, i: usize, j: usize, cell: Cell) {
        self.cells[index(i, j)] = cell;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn at(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    pub(crate) fn set_at(&mut self, idx: usize, cell: Cell) {
        self.cells[idx] = cell;
    }

    /// How many pieces the player has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Piece(player))
            .count()
    }

    /// The piece counts of player one and player two.
    pub fn scores(&self) -> (usize, usize) {
        (self.count(Player::One), self.count(Player::Two))
    }

    pub fn num_pieces(&self) -> usize {
        self.cells.iter().filter(|cell| **cell != Cell::Empty).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }

    /// A compact hex encoding of the board.
    ///
    /// Every pair of consecutive cells `(a, b)` becomes the hex digit of
    /// `a << 2 | b`, with a `-` separating the two halves of the board.
    pub fn state_code(&self) -> String {
        let mut code = String::with_capacity(NUM_CELLS / 2 + 1);
        for (pair_idx, pair) in self.cells.chunks(2).enumerate() {
            if pair_idx == NUM_CELLS / 4 {
                code.push('-');
            }
            let value = pair[0].code() << 2 | pair[1].code();
            // The value is at most 0b1010, so it is always a hex digit
            code.push(char::from_digit(u32::from(value), 16).unwrap_or('?'));
        }
        code
    }

    /// Parses a code produced by [`Self::state_code()`].
    pub fn from_state_code(code: &str) -> Result<Self, ParseStateCodeError> {
        let chars: Vec<char> = code.chars().collect();
        let expected = NUM_CELLS / 2 + 1;
        if chars.len() != expected {
            return Err(ParseStateCodeError::WrongLength {
                expected,
                found: chars.len(),
            });
        }
        let separator = NUM_CELLS / 4;
        if chars[separator] != '-' {
            return Err(ParseStateCodeError::MissingSeparator);
        }

        let mut board = Self::empty();
        let digits = chars
            .iter()
            .enumerate()
            .filter(|&(position, _)| position != separator);
        for (pair_idx, (position, &digit)) in digits.enumerate() {
            let value = digit
                .to_digit(16)
                .ok_or(ParseStateCodeError::InvalidDigit { position, digit })?
                as u8;
            for (offset, cell_code) in [value >> 2, value & 0b11].into_iter().enumerate() {
                let cell_idx = 2 * pair_idx + offset;
                let cell = Cell::from_code(cell_code).ok_or(ParseStateCodeError::InvalidCell {
                    cell: cell_idx,
                    value: cell_code,
                })?;
                board.set_at(cell_idx, cell);
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::opening()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", visualize_board(self, &[]))
    }
}
