use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reversi::Direction;

/// What the players asked for with a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveCursor(Direction),
    Play,
    NewGame,
    ToggleAnimation,
    ToggleHints,
    Quit,
}

/// Maps a key press to a command. Unbound keys give `None`.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }
    let command = match key.code {
        KeyCode::Right => Command::MoveCursor(Direction::E),
        KeyCode::Left => Command::MoveCursor(Direction::W),
        KeyCode::Up => Command::MoveCursor(Direction::N),
        KeyCode::Down => Command::MoveCursor(Direction::S),
        KeyCode::Enter | KeyCode::Char(' ') => Command::Play,
        KeyCode::Char('n') => Command::NewGame,
        KeyCode::Char('a') => Command::ToggleAnimation,
        KeyCode::Char('h') => Command::ToggleHints,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}
