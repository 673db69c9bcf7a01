use crate::{Board, Cell, Player, BOARD_SIZE};

pub const PLAYER_ONE_SYMBOL: char = '●';
pub const PLAYER_TWO_SYMBOL: char = '○';
pub const HINT_SYMBOL: char = '+';
pub const EMPTY_SYMBOL: char = '·';

pub fn symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => EMPTY_SYMBOL,
        Cell::Piece(Player::One) => PLAYER_ONE_SYMBOL,
        Cell::Piece(Player::Two) => PLAYER_TWO_SYMBOL,
    }
}

/// Renders the board as text, with row numbers on the left and column numbers on top.
///
/// The cells in `hints` are drawn as `+` if they are empty.
pub fn visualize_board(board: &Board, hints: &[(usize, usize)]) -> String {
    let mut result = String::from("   ");
    for j in 0..BOARD_SIZE {
        result += &format!(" {}", j);
    }
    result += "\n   ╭";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "─╮\n";

    for i in 0..BOARD_SIZE {
        result += &format!("{:>2} │", i);
        for j in 0..BOARD_SIZE {
            let cell = board.get(i, j);
            let c = if cell == Cell::Empty && hints.contains(&(i, j)) {
                HINT_SYMBOL
            } else {
                symbol(cell)
            };
            result.push(' ');
            result.push(c);
        }
        result += " │\n";
    }

    result += "   ╰";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "─╯";
    result
}
