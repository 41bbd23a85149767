use alloc::vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Running -> Running
/// - Running -> Won
/// - Running -> Lost
/// - any -> Running, only through a new game
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single-player session: the live grid, its phase, and the difficulty it was built from.
///
/// Reveal and flag requests made after the game finished are ignored and report
/// [`RevealOutcome::NoChange`] / [`FlagOutcome::NoChange`]; only [`Game::new_game`] leaves a
/// finished phase.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    difficulty: Difficulty,
    phase: GamePhase,
    explosion_origin: Option<Coord2>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    rng: SmallRng,
}

impl Game {
    /// Starts a game on a freshly generated board for `difficulty`.
    pub fn new(difficulty: Difficulty, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = RandomGridGenerator::new(rng.random()).generate(difficulty.config())?;
        Ok(Self::from_parts(difficulty, grid, rng))
    }

    /// Starts a game on a prepared board. The board does not have to match the difficulty's size;
    /// the difficulty only decides what [`Game::restart`] generates.
    pub fn with_grid(difficulty: Difficulty, grid: Grid, seed: u64) -> Self {
        Self::from_parts(difficulty, grid, SmallRng::seed_from_u64(seed))
    }

    fn from_parts(difficulty: Difficulty, grid: Grid, rng: SmallRng) -> Self {
        let revealed_count = grid.count_with(Visibility::Revealed);
        let flagged_count = grid.count_with(Visibility::Flagged);
        Self {
            grid,
            difficulty,
            phase: GamePhase::Running,
            explosion_origin: None,
            revealed_count,
            flagged_count,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The mine that ended the game. Only set while the phase is [`GamePhase::Lost`].
    pub fn explosion_origin(&self) -> Option<Coord2> {
        self.explosion_origin
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.grid.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        (self.grid.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.grid.get(coords).copied().ok_or(GameError::OutOfBounds)
    }

    /// Squared distance from the explosion origin, what a renderer staggers its blast effect by.
    pub fn blast_distance_sq(&self, coords: Coord2) -> Option<u32> {
        self.explosion_origin.map(|origin| distance_sq(origin, coords))
    }

    /// Replaces the board with a new one for `difficulty` and resets the phase to running.
    pub fn new_game(&mut self, difficulty: Difficulty) -> Result<()> {
        let grid = RandomGridGenerator::new(self.rng.random()).generate(difficulty.config())?;
        let previous = self.phase;
        *self = Self::from_parts(difficulty, grid, self.rng.clone());
        log::debug!("New {} game, previous phase {:?}", difficulty, previous);
        Ok(())
    }

    /// Starts over with the current difficulty.
    pub fn restart(&mut self) -> Result<()> {
        self.new_game(self.difficulty)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;
        use Visibility::*;

        let coords = self.grid.validate_coords(coords)?;
        if !self.check_running("flag", coords) {
            return Ok(NoChange);
        }

        let cell = self.grid.cell_mut(coords);
        Ok(match cell.visibility {
            Hidden => {
                cell.visibility = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                cell.visibility = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Revealed => NoChange,
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.grid.validate_coords(coords)?;
        if !self.check_running("reveal", coords) {
            return Ok(NoChange);
        }

        let cell = self.grid[coords];
        if !cell.is_hidden() {
            return Ok(NoChange);
        }

        if cell.has_mine {
            self.grid.cell_mut(coords).visibility = Visibility::Revealed;
            self.explosion_origin = Some(coords);
            self.phase = GamePhase::Lost;
            log::debug!("Hit mine at {:?}", coords);
            return Ok(HitMine);
        }

        self.flood_reveal(coords);

        if self.revealed_count == self.grid.safe_cell_count() {
            debug_assert!(self.grid.all_safe_cells_revealed());
            self.phase = GamePhase::Won;
            self.explosion_origin = None;
            log::debug!("All {} safe cells revealed, game won", self.revealed_count);
            Ok(Won)
        } else {
            Ok(Revealed)
        }
    }

    /// Reveals a safe hidden cell and cascades over its zero region with an explicit stack.
    ///
    /// Cells flip to revealed when pushed, so each one enters the stack at most once. Neighbors
    /// are scanned row-major and flagged cells are never opened.
    fn flood_reveal(&mut self, start: Coord2) {
        self.mark_revealed(start);
        log::debug!(
            "Reveal at {:?}, adjacent mines: {}",
            start,
            self.grid[start].adjacent_mines
        );

        let mut to_visit = vec![start];
        while let Some(coords) = to_visit.pop() {
            if self.grid[coords].adjacent_mines != 0 {
                continue;
            }

            for neighbor in self.grid.iter_neighbors(coords) {
                if self.grid[neighbor].is_hidden() {
                    self.mark_revealed(neighbor);
                    log::trace!(
                        "Flood revealed {:?}, adjacent mines: {}",
                        neighbor,
                        self.grid[neighbor].adjacent_mines
                    );
                    to_visit.push(neighbor);
                }
            }
        }
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        self.grid.cell_mut(coords).visibility = Visibility::Revealed;
        self.revealed_count += 1;
    }

    fn check_running(&self, action: &str, coords: Coord2) -> bool {
        if self.phase.is_running() {
            true
        } else {
            log::warn!(
                "Ignoring {} at {:?}, game already {:?}",
                action,
                coords,
                self.phase
            );
            false
        }
    }
}
