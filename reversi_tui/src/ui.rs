use ratatui::{prelude::*, widgets::*};
use reversi::{symbol, Board, Cell, Player, BOARD_SIZE, HINT_SYMBOL};

const N: u16 = BOARD_SIZE as u16;

/// Row numbers on both sides, two columns per cell.
pub const WIDTH: u16 = 2 * N + 3;
/// Header, column numbers, the board, status line and clock.
pub const HEIGHT: u16 = N + 7;

/// Everything needed to draw one frame.
pub struct GameView<'a> {
    pub board: &'a Board,
    pub to_move: Player,
    /// Where the player to move may play. Empty while flips are being animated.
    pub legal: &'a [(usize, usize)],
    pub show_hints: bool,
    pub cursor: (usize, usize),
    pub status: String,
    pub clock: String,
}

pub fn color(player: Player) -> Color {
    match player {
        Player::One => Color::Blue,
        Player::Two => Color::Red,
    }
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < WIDTH || area.height < HEIGHT {
            Paragraph::new("Terminal too small")
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        }
        let left = area.x + (area.width - WIDTH) / 2;
        let top = area.y + (area.height - HEIGHT) / 2;
        let plain = Style::new();

        // Header with the scores, the player to move is underlined
        let (score_one, score_two) = self.board.scores();
        buf.set_string(
            left + 4,
            top,
            format!("_ {:2} - {:<2} _", score_one, score_two),
            plain,
        );
        for (player, x) in [(Player::One, left + 4), (Player::Two, left + 14)] {
            let mut style = Style::new().fg(color(player));
            if player == self.to_move {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            buf.set_string(x, top, symbol(Cell::Piece(player)).to_string(), style);
        }

        // Row and column numbers
        let board_top = top + 3;
        for n in 0..N {
            let label = n.to_string();
            buf.set_string(left + 2 * n + 2, board_top - 1, &label, plain);
            buf.set_string(left + 2 * n + 2, board_top + N, &label, plain);
            buf.set_string(left, board_top + n, &label, plain);
            buf.set_string(left + 2 * N + 2, board_top + n, &label, plain);
        }

        for i in 0..BOARD_SIZE {
            for j in 0..BOARD_SIZE {
                let cell = self.board.get(i, j);
                let legal = self.legal.contains(&(i, j));
                let (c, style) = if legal && self.cursor == (i, j) {
                    (
                        symbol(Cell::Piece(self.to_move)),
                        Style::new().fg(color(self.to_move)),
                    )
                } else if legal && self.show_hints {
                    (HINT_SYMBOL, Style::new().fg(Color::Green))
                } else {
                    match cell.owner() {
                        Some(player) => (symbol(cell), Style::new().fg(color(player))),
                        None => (symbol(cell), Style::new().fg(Color::DarkGray)),
                    }
                };
                let x = left + 2 * j as u16 + 2;
                buf.set_string(x, board_top + i as u16, c.to_string(), style);
            }
        }

        // Cursor
        let (ci, cj) = self.cursor;
        let cursor_style = Style::new().fg(color(self.to_move));
        buf.set_string(left + 2 * cj as u16 + 1, board_top + ci as u16, "[", cursor_style);
        buf.set_string(left + 2 * cj as u16 + 3, board_top + ci as u16, "]", cursor_style);

        let status_style = Style::new().fg(Color::Blue);
        for (offset, text) in [(N + 2, self.status), (N + 3, self.clock)] {
            let line = Rect {
                x: area.x,
                y: board_top + offset,
                width: area.width,
                height: 1,
            };
            Paragraph::new(text)
                .style(status_style)
                .alignment(Alignment::Center)
                .render(line, buf);
        }
    }
}
