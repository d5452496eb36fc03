use core::ops::BitOr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Initial -> Active (first open, mines are laid)
/// - Active -> Won / Lost (derived from the board)
/// - any -> Initial (reset or difficulty change)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Initial,
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Initial)
    }

    /// Won or lost, no moves are accepted anymore.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What a ticking clock should do with the current board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockPhase {
    Reset,
    Playing,
    Stopped,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    Initial,
    Active,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Result of a context-sensitive move that either marks or reveals.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    Mark(MarkOutcome),
    Reveal(RevealOutcome),
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Mark(outcome) => outcome.has_update(),
            Self::Reveal(outcome) => outcome.has_update(),
        }
    }
}

/// One game from empty board to win or loss. Mines are laid by `G` on the first open.
#[derive(Clone, Debug)]
pub struct Game<G = RandomMines> {
    settings: Settings,
    board: Board,
    stage: Stage,
    generator: G,
}

impl Game<RandomMines> {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_generator(settings, RandomMines::new(seed))
    }
}

impl<G: MineGenerator> Game<G> {
    pub fn with_generator(settings: Settings, generator: G) -> Self {
        Self {
            board: Board::new(&settings),
            settings,
            stage: Stage::Initial,
            generator,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.board[coords])
    }

    pub fn mine_count_at(&self, coords: Coord2) -> Result<u8> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.board.mine_count(coords))
    }

    pub fn status(&self) -> GameStatus {
        match self.stage {
            Stage::Initial => GameStatus::Initial,
            Stage::Active if self.board.is_lost() => GameStatus::Lost,
            Stage::Active if self.board.is_won() => GameStatus::Won,
            Stage::Active => GameStatus::Active,
        }
    }

    pub fn is_won(&self) -> bool {
        self.board.is_won()
    }

    pub fn is_lost(&self) -> bool {
        self.board.is_lost()
    }

    pub fn is_empty(&self) -> bool {
        self.board.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    pub fn clock_phase(&self) -> ClockPhase {
        if self.board.is_empty() {
            ClockPhase::Reset
        } else if self.is_finished() {
            ClockPhase::Stopped
        } else {
            ClockPhase::Playing
        }
    }

    /// Mine counter as shown to the player, negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        if self.board.is_won() {
            0
        } else if self.board.is_empty() {
            i32::from(self.settings.number_of_mines())
        } else {
            i32::from(self.board.mine_total()) - i32::from(self.board.flag_total())
        }
    }

    /// The opened mine that ended the game, if any.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.board
            .cells()
            .find(|cell| cell.is_mine && cell.is_open)
            .map(Cell::coords)
    }

    /// Primary action. The first open of a game lays the mines around it.
    pub fn click(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        if self.board[coords].is_flagged {
            return Ok(RevealOutcome::NoChange);
        }

        if matches!(self.stage, Stage::Initial) {
            let placed = self
                .generator
                .place_mines(&mut self.board, &self.settings, coords)?;
            self.stage = Stage::Active;
            log::debug!("Game started at {:?} with {} mines", coords, placed);
        }

        let outcome = self.reveal_single_cell(coords);
        Ok(self.settle(outcome))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        Ok(if self.board.toggle_flag(coords) {
            MarkOutcome::Changed
        } else {
            MarkOutcome::NoChange
        })
    }

    /// Space action: flags a closed cell, or opens every unflagged neighbor of an open
    /// cell whose flag count matches its mine count.
    pub fn chord_expand(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        if self.board[coords].is_closed() {
            return self.toggle_flag(coords).map(MoveOutcome::Mark);
        }

        if self.board.flag_count(coords) != self.board.mine_count(coords) {
            return Ok(MoveOutcome::Reveal(RevealOutcome::NoChange));
        }

        let outcome = self
            .board
            .iter_neighbors(coords)
            .map(|pos| self.reveal_single_cell(pos))
            .fold(RevealOutcome::NoChange, BitOr::bitor);
        log::debug!("Chord at {:?}: {:?}", coords, outcome);
        Ok(MoveOutcome::Reveal(self.settle(outcome)))
    }

    /// Secondary action, routed the same way as the space action.
    pub fn secondary(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        self.chord_expand(coords)
    }

    /// Discards the board and starts over with the current settings.
    pub fn reset(&mut self) {
        self.board = Board::new(&self.settings);
        self.stage = Stage::Initial;
        log::debug!("Game reset to {:?}", self.settings.size());
    }

    pub fn change_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.reset();
    }

    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        log::debug!("Difficulty changed to {}", difficulty);
        self.change_settings(difficulty.settings());
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.board[coords];
        if cell.is_flagged || cell.is_open {
            return RevealOutcome::NoChange;
        }

        self.board.open(coords);
        if cell.is_mine {
            log::trace!("Open mine at {:?}", coords);
            return RevealOutcome::HitMine;
        }

        let adjacent_mines = self.board.mine_count(coords);
        log::trace!("Open cell at {:?}, mine count: {}", coords, adjacent_mines);
        if adjacent_mines == 0 {
            self.board.expand(coords);
        }
        RevealOutcome::Revealed
    }

    /// Upgrades a merged reveal to `Won` once every cell is settled.
    fn settle(&self, outcome: RevealOutcome) -> RevealOutcome {
        match outcome {
            RevealOutcome::HitMine => {
                log::debug!("Game lost");
                RevealOutcome::HitMine
            }
            RevealOutcome::Revealed if self.board.is_won() => {
                log::debug!("Game won");
                RevealOutcome::Won
            }
            other => other,
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
