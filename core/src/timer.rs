use serde::{Deserialize, Serialize};

use crate::*;

/// Seconds counter driven by a once-per-second tick from the host.
///
/// The timer never touches the board, it only follows the game's [`ClockPhase`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTimer {
    elapsed: u32,
}

impl GameTimer {
    /// Largest value a three digit counter can show.
    pub const MAX_DISPLAY: u32 = 999;

    pub const fn new() -> Self {
        Self { elapsed: 0 }
    }

    pub fn tick(&mut self, phase: ClockPhase) {
        match phase {
            ClockPhase::Reset => self.elapsed = 0,
            ClockPhase::Playing => self.elapsed = self.elapsed.saturating_add(1),
            ClockPhase::Stopped => {}
        }
    }

    pub const fn elapsed_secs(&self) -> u32 {
        self.elapsed
    }

    pub fn display(&self) -> u32 {
        self.elapsed.min(Self::MAX_DISPLAY)
    }
}
