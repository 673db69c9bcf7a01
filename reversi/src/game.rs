use std::fmt;

use tracing::{debug, trace};

use crate::{coords, index, visualize_board, Board, Cell, Player, RayTable, NUM_CELLS};

/// A game of Reversi between two players.
///
/// The board only changes through [`Self::play()`] and [`Self::play_with_steps()`].
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    rays: RayTable,
    player: Player,
}

/// Summarizes the outcome of a call to [`Game::play()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The move was not legal for the player to move. Nothing changed.
    Illegal,
    Played {
        /// How many of the opponent's pieces changed owner.
        flipped: usize,
        /// The player to move now.
        next: Player,
        /// The opponent could not move, so the turn stayed with the mover.
        passed: bool,
    },
}

impl PlayOutcome {
    pub fn is_played(self) -> bool {
        matches!(self, PlayOutcome::Played { .. })
    }
}

impl Game {
    /// The standard opening position, with player one to move.
    pub fn new() -> Self {
        Self::from_board(Board::opening(), Player::One)
    }

    /// Starts a game from an arbitrary position.
    ///
    /// If `to_move` has no legal move but the opponent does, the turn passes right away.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let mut game = Self {
            board,
            rays: RayTable::build(),
            player: to_move,
        };
        if !game.any_moves(to_move) && game.any_moves(!to_move) {
            debug!(passing = ?to_move, "No legal move in the starting position, turn passes");
            game.player = !to_move;
        }
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.player
    }

    /// Panics if the coordinates are off the board.
    pub fn cell(&self, i: usize, j: usize) -> Cell {
        self.board.get(i, j)
    }

    /// The piece counts of player one and player two.
    pub fn scores(&self) -> (usize, usize) {
        self.board.scores()
    }

    /// Whether `player` may place a piece at row `i`, column `j`.
    ///
    /// Panics if the coordinates are off the board.
    pub fn can_move(&self, i: usize, j: usize, player: Player) -> bool {
        self.can_move_at(index(i, j), player)
    }

    /// Whether `player` has a legal move anywhere on the board.
    pub fn any_moves(&self, player: Player) -> bool {
        (0..NUM_CELLS).any(|idx| self.can_move_at(idx, player))
    }

    /// All cells where `player` may move, in row-major order.
    pub fn legal_moves(&self, player: Player) -> Vec<(usize, usize)> {
        (0..NUM_CELLS)
            .filter(|&idx| self.can_move_at(idx, player))
            .map(coords)
            .collect()
    }

    /// Places a piece for the player to move and flips every captured piece.
    ///
    /// An illegal move is ignored and reported as [`PlayOutcome::Illegal`].
    /// Panics if the coordinates are off the board.
    pub fn play(&mut self, i: usize, j: usize) -> PlayOutcome {
        self.play_with_steps(i, j, |_| {})
    }

    /// Like [`Self::play()`], but calls `on_step` between the waves of flips.
    ///
    /// All capture lines advance in lockstep: the first wave flips the piece next to the
    /// new one on every line, the second wave the piece after that, and so on. `on_step`
    /// runs once after every wave, so the last call sees the board with all flips done
    /// but before the turn has passed.
    pub fn play_with_steps<F>(&mut self, i: usize, j: usize, mut on_step: F) -> PlayOutcome
    where
        F: FnMut(&Board),
    {
        let origin = index(i, j);
        let player = self.player;
        if !self.can_move_at(origin, player) {
            trace!(i, j, ?player, "Ignoring illegal move");
            return PlayOutcome::Illegal;
        }

        let lines: Vec<&[usize]> = self
            .rays
            .rays_from(origin)
            .filter(|ray| can_move_line(&self.board, ray, player))
            .collect();
        let max_len = lines.iter().map(|line| line.len()).max().unwrap_or(0);

        let own = Cell::from(player);
        let board = &mut self.board;
        board.set_at(origin, own);

        let mut done = vec![false; lines.len()];
        let mut remaining = lines.len();
        let mut flipped = 0;
        for step in 1..max_len {
            for (k, line) in lines.iter().enumerate() {
                if done[k] || line.len() <= step {
                    continue;
                }
                let idx = line[step];
                if board.at(idx) == own {
                    done[k] = true;
                    remaining -= 1;
                    continue;
                }
                board.set_at(idx, own);
                flipped += 1;
            }
            if remaining == 0 {
                break;
            }
            on_step(board);
        }

        let mut next = !player;
        let passed = !self.any_moves(next);
        if passed {
            next = player;
        }
        self.player = next;

        debug!(i, j, ?player, flipped, lines = lines.len(), "Played");
        if passed {
            debug!(passing = ?(!player), "No legal move, turn passes back");
        }
        PlayOutcome::Played {
            flipped,
            next,
            passed,
        }
    }

    fn can_move_at(&self, idx: usize, player: Player) -> bool {
        self.rays
            .rays_from(idx)
            .any(|ray| can_move_line(&self.board, ray, player))
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let legal = self.legal_moves(self.player);
        writeln!(f, "{}", visualize_board(&self.board, &legal))?;
        let (one, two) = self.scores();
        write!(f, "{} to move, {} - {}", self.player, one, two)
    }
}

/// Whether placing a piece at the start of `ray` would capture along it.
///
/// The start must be empty, followed by at least one opponent piece, followed by
/// one of the player's own pieces.
fn can_move_line(board: &Board, ray: &[usize], player: Player) -> bool {
    if board.at(ray[0]) != Cell::Empty {
        return false;
    }

    let opponent = Cell::Piece(player.opponent());
    let mut seen_opponent = false;
    for &idx in &ray[1..] {
        match board.at(idx) {
            Cell::Empty => return false,
            cell if cell == opponent => seen_opponent = true,
            _ => return seen_opponent,
        }
    }
    false
}
