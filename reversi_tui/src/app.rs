use std::cmp::Ordering;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

use ratatui::backend::Backend;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Frame, Terminal};
use reversi::{Board, Game, PlayOutcome, Player};
use tracing::{debug, info};

use crate::config::Config;
use crate::input::{command_for, Command};
use crate::session::Session;
use crate::ui::GameView;

/// How long to wait for a key press before redrawing the clock.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// The game together with its presentation session.
pub struct App {
    game: Game,
    session: Session,
    config: Config,
}

impl App {
    pub fn new(game: Game, config: Config, now: Instant) -> Self {
        let session = Session::new(&config, now);
        Self {
            game,
            session,
            config,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame, Instant::now()))?;
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = command_for(key) {
                    if self.handle(command, terminal, Instant::now())? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Neither player can move, either because the board is full or both are stuck.
    pub fn is_over(&self) -> bool {
        self.game.board().is_full()
            || (!self.game.any_moves(Player::One) && !self.game.any_moves(Player::Two))
    }

    pub fn result(&self) -> String {
        let (one, two) = self.game.scores();
        let winner = match one.cmp(&two) {
            Ordering::Greater => format!("{} wins", Player::One),
            Ordering::Less => format!("{} wins", Player::Two),
            Ordering::Equal => String::from("draw"),
        };
        format!("game over: {} {}-{}", winner, one, two)
    }

    /// Applies one command. Returns `true` when the players want to quit.
    ///
    /// The terminal is only needed to draw the flip animation.
    pub fn handle<B: Backend>(
        &mut self,
        command: Command,
        terminal: &mut Terminal<B>,
        now: Instant,
    ) -> io::Result<bool> {
        debug!(?command, "Handling command");
        match command {
            Command::Quit => return Ok(true),
            Command::NewGame => {
                info!("Starting a new game");
                self.game = Game::new();
                self.session.restart_clock(now);
                self.session.clear_message();
            }
            Command::ToggleAnimation => {
                self.session.animation = !self.session.animation;
                let text = if self.session.animation {
                    "animation on"
                } else {
                    "animation off"
                };
                self.session.flash(text, now);
            }
            Command::ToggleHints => {
                self.session.hints = !self.session.hints;
                let text = if self.session.hints {
                    "hints on"
                } else {
                    "hints off"
                };
                self.session.flash(text, now);
            }
            Command::MoveCursor(direction) => {
                if !self.is_over() {
                    self.session.move_cursor(direction);
                }
            }
            Command::Play => {
                if !self.is_over() {
                    self.play_at_cursor(terminal)?;
                }
            }
        }
        Ok(false)
    }

    pub fn draw(&self, frame: &mut Frame, now: Instant) {
        let to_move = self.game.current_player();
        let (legal, result) = if self.is_over() {
            (Vec::new(), Some(self.result()))
        } else {
            (self.game.legal_moves(to_move), None)
        };
        render(
            frame,
            self.game.board(),
            to_move,
            &legal,
            &self.session,
            result,
            now,
        );
    }

    fn play_at_cursor<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let (i, j) = self.session.cursor;
        let outcome = if self.session.animation {
            let mover = self.game.current_player();
            let step = self.config.animation_step();
            let session = &self.session;
            let mut drawn: io::Result<()> = Ok(());
            let outcome = self.game.play_with_steps(i, j, |board| {
                if drawn.is_err() {
                    return;
                }
                drawn = terminal
                    .draw(|frame| render(frame, board, mover, &[], session, None, Instant::now()))
                    .map(|_| ());
                thread::sleep(step);
            });
            drawn?;
            outcome
        } else {
            self.game.play(i, j)
        };

        if let PlayOutcome::Played { next, passed, .. } = outcome {
            if self.is_over() {
                info!(result = %self.result(), "Game over");
                self.session.clear_message();
            } else if passed {
                self.session
                    .flash(format!("{} passes", next.opponent()), Instant::now());
            }
        }
        Ok(())
    }
}

/// Draws one frame. The status line shows the flashed message if there is one,
/// then the result of a finished game, and otherwise the position code.
fn render(
    frame: &mut Frame,
    board: &Board,
    to_move: Player,
    legal: &[(usize, usize)],
    session: &Session,
    result: Option<String>,
    now: Instant,
) {
    let status = session
        .message(now)
        .map(String::from)
        .or(result)
        .unwrap_or_else(|| board.state_code());
    let view = GameView {
        board,
        to_move,
        legal,
        show_hints: session.hints,
        cursor: session.cursor,
        status,
        clock: session.clock(now),
    };
    frame.render_widget(view, frame.size());
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use reversi::{Cell, Direction, BOARD_SIZE};

    use super::*;

    fn new_app(game: Game, animation: bool) -> (App, Terminal<TestBackend>) {
        let config = Config {
            animation,
            animation_step_ms: 0,
            ..Config::default()
        };
        let terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        (App::new(game, config, Instant::now()), terminal)
    }

    fn screen(app: &App, terminal: &mut Terminal<TestBackend>, now: Instant) -> String {
        terminal.draw(|frame| app.draw(frame, now)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn send(app: &mut App, terminal: &mut Terminal<TestBackend>, commands: &[Command]) {
        for &command in commands {
            assert!(!app.handle(command, terminal, Instant::now()).unwrap());
        }
    }

    fn move_cursor_to(app: &mut App, terminal: &mut Terminal<TestBackend>, i: usize, j: usize) {
        let (ci, cj) = app.session().cursor;
        let mut commands = Vec::new();
        commands.extend(std::iter::repeat(Command::MoveCursor(Direction::N)).take(ci));
        commands.extend(std::iter::repeat(Command::MoveCursor(Direction::W)).take(cj));
        commands.extend(std::iter::repeat(Command::MoveCursor(Direction::S)).take(i));
        commands.extend(std::iter::repeat(Command::MoveCursor(Direction::E)).take(j));
        send(app, terminal, &commands);
        assert_eq!(app.session().cursor, (i, j));
    }

    fn forced_pass_position() -> Game {
        // Row 0: 1 2 . 2 . . . .
        let mut board = Board::empty();
        board.set(0, 0, Cell::Piece(Player::One));
        board.set(0, 1, Cell::Piece(Player::Two));
        board.set(0, 3, Cell::Piece(Player::Two));
        Game::from_board(board, Player::One)
    }

    #[test]
    fn play_with_animation() {
        let (mut app, mut terminal) = new_app(Game::new(), true);
        move_cursor_to(&mut app, &mut terminal, 4, 2);
        send(&mut app, &mut terminal, &[Command::Play]);

        let mut expected = Game::new();
        expected.play(4, 2);
        assert_eq!(app.game().board(), expected.board());
        assert_eq!(app.game().current_player(), Player::Two);
        assert!(screen(&app, &mut terminal, Instant::now()).contains(&expected.board().state_code()));
    }

    #[test]
    fn play_without_animation() {
        let (mut app, mut terminal) = new_app(Game::new(), false);
        move_cursor_to(&mut app, &mut terminal, 2, 4);
        send(&mut app, &mut terminal, &[Command::Play]);
        assert_eq!(app.game().scores(), (4, 1));
        assert_eq!(app.game().current_player(), Player::Two);
    }

    #[test]
    fn illegal_play_is_ignored() {
        let (mut app, mut terminal) = new_app(Game::new(), true);
        send(&mut app, &mut terminal, &[Command::Play]);
        assert_eq!(app.game().board(), &Board::opening());
        assert_eq!(app.game().current_player(), Player::One);
        assert_eq!(app.session().message(Instant::now()), None);
    }

    #[test]
    fn pass_is_announced() {
        let (mut app, mut terminal) = new_app(forced_pass_position(), false);
        move_cursor_to(&mut app, &mut terminal, 0, 2);
        send(&mut app, &mut terminal, &[Command::Play]);
        assert_eq!(app.game().current_player(), Player::One);
        assert!(!app.is_over());
        let now = Instant::now();
        assert_eq!(app.session().message(now), Some("player two passes"));
        assert!(screen(&app, &mut terminal, now).contains("player two passes"));
    }

    #[test]
    fn game_over_shows_result() {
        let (mut app, mut terminal) = new_app(forced_pass_position(), true);
        move_cursor_to(&mut app, &mut terminal, 0, 2);
        send(&mut app, &mut terminal, &[Command::Play]);
        move_cursor_to(&mut app, &mut terminal, 0, 4);
        send(&mut app, &mut terminal, &[Command::Play]);

        assert!(app.is_over());
        assert_eq!(app.game().scores(), (5, 0));
        assert_eq!(app.result(), "game over: player one wins 5-0");
        assert!(screen(&app, &mut terminal, Instant::now()).contains("game over: player one wins 5-0"));

        // The cursor is frozen until a new game starts
        send(&mut app, &mut terminal, &[Command::MoveCursor(Direction::S)]);
        assert_eq!(app.session().cursor, (0, 4));
        send(&mut app, &mut terminal, &[Command::NewGame]);
        assert!(!app.is_over());
        assert_eq!(app.game().board(), &Board::opening());
    }

    #[test]
    fn stuck_starting_player_passes() {
        // Row 0: 1 2 . . . . . .
        let mut board = Board::empty();
        board.set(0, 0, Cell::Piece(Player::One));
        board.set(0, 1, Cell::Piece(Player::Two));
        let (mut app, mut terminal) = new_app(Game::from_board(board, Player::Two), false);
        assert!(!app.is_over());
        assert_eq!(app.game().current_player(), Player::One);

        move_cursor_to(&mut app, &mut terminal, 0, 2);
        send(&mut app, &mut terminal, &[Command::Play]);
        assert_eq!(app.game().scores(), (3, 0));
        assert!(app.is_over());
    }

    #[test]
    fn full_board_is_over() {
        let mut board = Board::empty();
        for i in 0..BOARD_SIZE {
            for j in 0..BOARD_SIZE {
                let player = if i < 3 { Player::Two } else { Player::One };
                board.set(i, j, Cell::from(player));
            }
        }
        let (app, mut terminal) = new_app(Game::from_board(board, Player::One), false);
        assert!(app.is_over());
        assert_eq!(app.result(), "game over: player one wins 40-24");
        assert!(screen(&app, &mut terminal, Instant::now()).contains("player one wins 40-24"));
    }

    #[test]
    fn new_game_keeps_settings() {
        let (mut app, mut terminal) = new_app(Game::new(), true);
        move_cursor_to(&mut app, &mut terminal, 4, 2);
        send(
            &mut app,
            &mut terminal,
            &[Command::Play, Command::ToggleAnimation, Command::NewGame],
        );
        assert_eq!(app.game().board(), &Board::opening());
        assert_eq!(app.game().current_player(), Player::One);
        assert!(!app.session().animation);
        assert_eq!(app.session().cursor, (4, 2));
        assert_eq!(app.session().message(Instant::now()), None);
    }

    #[test]
    fn toggles_flash_a_message() {
        let (mut app, mut terminal) = new_app(Game::new(), true);
        let now = Instant::now();
        app.handle(Command::ToggleAnimation, &mut terminal, now).unwrap();
        assert_eq!(app.session().message(now), Some("animation off"));
        app.handle(Command::ToggleAnimation, &mut terminal, now).unwrap();
        assert_eq!(app.session().message(now), Some("animation on"));
        app.handle(Command::ToggleHints, &mut terminal, now).unwrap();
        assert_eq!(app.session().message(now), Some("hints off"));
        assert!(!app.session().hints);

        // Once the message expires the status line goes back to the position code
        let later = now + Duration::from_secs(2);
        assert!(!screen(&app, &mut terminal, later).contains("hints off"));
        assert!(screen(&app, &mut terminal, later).contains(&Board::opening().state_code()));
    }

    #[test]
    fn quit() {
        let (mut app, mut terminal) = new_app(Game::new(), true);
        assert!(app.handle(Command::Quit, &mut terminal, Instant::now()).unwrap());
    }
}
