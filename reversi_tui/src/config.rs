use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Presentation settings, loaded from an optional JSON file.
///
/// Every field may be omitted, in which case the default is used.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Redraw the board between the waves of flips.
    pub animation: bool,
    /// How long each wave of flips stays on screen.
    pub animation_step_ms: u64,
    /// How long a flashed message stays visible.
    pub message_ms: u64,
    /// The clock's colon blinks with this period.
    pub tick_ms: u64,
    /// Mark the cells where the player to move may play.
    pub hints: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animation: true,
            animation_step_ms: 100,
            message_ms: 1000,
            tick_ms: 500,
            hints: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open config file '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse config file '{}'", path.display()))
    }

    pub fn animation_step(&self) -> Duration {
        Duration::from_millis(self.animation_step_ms)
    }

    pub fn message_duration(&self) -> Duration {
        Duration::from_millis(self.message_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
