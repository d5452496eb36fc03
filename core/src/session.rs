use serde::{Deserialize, Serialize};

use crate::*;

/// Input commands coming from pointer and keyboard handlers. Positional commands carry
/// the targeted cell explicitly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Primary(Coord2),
    Secondary(Coord2),
    /// Space bar over whatever cell is hovered, `None` when the pointer is off the grid.
    Space(Option<Coord2>),
    Reset,
    ChangeDifficulty(Difficulty),
    SetCellSize(u16),
}

/// Composition root tying a game, its timer, and persisted preferences together.
#[derive(Debug)]
pub struct Session<S, G = RandomMines> {
    store: S,
    preferences: Preferences,
    game: Game<G>,
    timer: GameTimer,
}

impl<S: SettingsStore> Session<S> {
    pub fn new(store: S, seed: u64) -> Self {
        Self::with_generator(store, RandomMines::new(seed))
    }
}

impl<S: SettingsStore, G: MineGenerator> Session<S, G> {
    pub fn with_generator(store: S, generator: G) -> Self {
        let preferences = store.load().unwrap_or_default();
        log::debug!("Loaded preferences: {:?}", preferences);

        Self {
            game: Game::with_generator(preferences.difficulty.settings(), generator),
            store,
            preferences,
            timer: GameTimer::new(),
        }
    }

    pub fn game(&self) -> &Game<G> {
        &self.game
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies one input command, returning whether anything visible changed. Moves
    /// the game rejects (off-grid, game over) count as no change.
    pub fn dispatch(&mut self, action: Action) -> bool {
        use Action::*;

        let result = match action {
            Primary(coords) => self.game.click(coords).map(RevealOutcome::has_update),
            Secondary(coords) => self.game.secondary(coords).map(MoveOutcome::has_update),
            Space(Some(coords)) => self.game.chord_expand(coords).map(MoveOutcome::has_update),
            Space(None) => Ok(false),
            Reset => {
                self.reset();
                Ok(true)
            }
            ChangeDifficulty(difficulty) => {
                self.change_difficulty(difficulty);
                Ok(true)
            }
            SetCellSize(cell_size) => {
                let changed = self.preferences.cell_size != cell_size;
                self.preferences.cell_size = cell_size;
                self.persist();
                Ok(changed)
            }
        };

        result.unwrap_or_else(|err| {
            log::debug!("Ignored {:?}: {}", action, err);
            false
        })
    }

    /// Advances the timer by one second according to the game's phase.
    pub fn tick(&mut self) {
        self.timer.tick(self.game.clock_phase());
    }

    fn reset(&mut self) {
        self.game.reset();
        self.timer = GameTimer::new();
    }

    fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.game.change_difficulty(difficulty);
        self.timer = GameTimer::new();
        self.preferences.difficulty = difficulty;
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.preferences) {
            log::warn!("Could not save preferences: {}", err);
        }
    }
}
