use std::time::{Duration, Instant};

use reversi::Direction;

use crate::config::Config;

/// Presentation state that lives next to a [`reversi::Game`] but never inside it:
/// the cursor, the flashed message, the clock and the display toggles.
///
/// Methods that depend on time take `now` explicitly.
#[derive(Clone, Debug)]
pub struct Session {
    /// Row and column of the cursor.
    pub cursor: (usize, usize),
    pub animation: bool,
    pub hints: bool,
    message: Option<Message>,
    started: Instant,
    message_duration: Duration,
    tick: Duration,
}

#[derive(Clone, Debug)]
struct Message {
    text: String,
    expires: Instant,
}

impl Session {
    pub fn new(config: &Config, now: Instant) -> Self {
        Self {
            cursor: (0, 0),
            animation: config.animation,
            hints: config.hints,
            message: None,
            started: now,
            message_duration: config.message_duration(),
            tick: config.tick(),
        }
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        let (i, j) = self.cursor;
        self.cursor = direction.step_bounded(i, j);
    }

    /// Shows `text` until the message duration has passed, replacing any earlier message.
    pub fn flash(&mut self, text: impl Into<String>, now: Instant) {
        self.message = Some(Message {
            text: text.into(),
            expires: now + self.message_duration,
        });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// The flashed message, unless it has expired.
    pub fn message(&self, now: Instant) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|message| now < message.expires)
            .map(|message| message.text.as_str())
    }

    pub fn restart_clock(&mut self, now: Instant) {
        self.started = now;
    }

    /// Elapsed time as `mm:ss`. The colon is blanked out on every other tick.
    pub fn clock(&self, now: Instant) -> String {
        let elapsed = now.saturating_duration_since(self.started);
        let secs = elapsed.as_secs();
        let ticks = elapsed.as_millis() / self.tick.as_millis().max(1);
        let delimiter = if ticks % 2 == 0 { ':' } else { ' ' };
        format!("{:02}{}{:02}", secs / 60, delimiter, secs % 60)
    }
}
