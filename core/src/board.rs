use std::collections::VecDeque;

use chrono::prelude::*;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Configured -> Active (first move)
/// - Active -> Won
/// - Active -> Lost
/// - any -> Configured (reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Grid allocated, no mines placed yet
    Configured,
    /// Mines placed and timer running
    Active,
    /// Every safe cell has been opened
    Won,
    /// A mine was opened
    Lost,
}

impl GameState {
    pub const fn is_configured(self) -> bool {
        matches!(self, Self::Configured)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Configured
    }
}

/// A game from the first move until it is won or lost.
#[derive(Clone, Debug)]
pub struct Board {
    difficulty: Difficulty,
    grid: Array2<CellState>,
    mines: Vec<Coord2>,
    flagged_count: CellCount,
    opened_count: CellCount,
    state: GameState,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    generator: PocketGenerator,
}

impl Board {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_generator(difficulty, PocketGenerator::from_entropy())
    }

    /// Board whose mine layouts are reproducible for a given seed and sequence of moves.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_generator(difficulty, PocketGenerator::new(seed))
    }

    fn with_generator(difficulty: Difficulty, generator: PocketGenerator) -> Self {
        let grid = Array2::default(ix(difficulty.size()));
        Self {
            difficulty,
            grid,
            mines: Vec::new(),
            flagged_count: 0,
            opened_count: 0,
            state: GameState::default(),
            started_at: None,
            ended_at: None,
            generator,
        }
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn size(&self) -> Coord2 {
        self.difficulty.size()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, GameState::Lost)
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, GameState::Won)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn opened_count(&self) -> CellCount {
        self.opened_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn remaining_mines(&self) -> i64 {
        i64::from(self.difficulty.mines()) - i64::from(self.flagged_count)
    }

    /// Mine coordinates, empty until the game has started
    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }

    pub fn cell_at(&self, row: Coord, col: Coord) -> Result<&CellState> {
        let coords = self.validate_coords(row, col)?;
        Ok(&self.grid[ix(coords)])
    }

    /// How many seconds have passed since game started, 0 if it hasn't started
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs_at(Utc::now())
    }

    fn elapsed_secs_at(&self, now: DateTime<Utc>) -> u64 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u64
        } else {
            0
        }
    }

    /// Clears every cell, the mine list, counters and timers.
    pub fn reset(&mut self) {
        self.grid.fill(CellState::default());
        self.mines.clear();
        self.flagged_count = 0;
        self.opened_count = 0;
        self.state = GameState::Configured;
        self.started_at = None;
        self.ended_at = None;
    }

    /// Places mines around the first move and starts the timer. Does not open the start cell.
    pub fn start_game(&mut self, row: Coord, col: Coord) -> Result<()> {
        let mut generator = self.generator.clone();
        let result = self.start_game_with(row, col, &mut generator);
        self.generator = generator;
        result
    }

    /// Starts the game with mines from `generator`. A layout that does not match the difficulty, repeats a cell,
    /// leaves the board or mines the start cell is rejected and the current game is left untouched.
    pub fn start_game_with(
        &mut self,
        row: Coord,
        col: Coord,
        generator: &mut impl MineGenerator,
    ) -> Result<()> {
        let start = self.validate_coords(row, col)?;
        let mines = self.validate_layout(start, generator.generate(&self.difficulty, start))?;

        self.reset();
        self.place_mines(mines);

        let now = Utc::now();
        log::debug!(
            "{} game started at {} from {:?} with {} mines",
            self.difficulty.name(),
            now,
            start,
            self.mines.len()
        );
        self.started_at = Some(now);
        self.state = GameState::Active;
        Ok(())
    }

    fn validate_layout(&self, start: Coord2, mut mines: Vec<Coord2>) -> Result<Vec<Coord2>> {
        let expected = self.difficulty.mines();
        if mines.len() != expected as usize {
            return Err(GameError::MineCountMismatch {
                placed: mines.len(),
                expected,
            });
        }

        for &(row, col) in &mines {
            self.validate_coords(row, col)?;
            if (row, col) == start {
                return Err(GameError::MineOnStart { row, col });
            }
        }

        mines.sort_unstable();
        if let Some(pair) = mines.windows(2).find(|pair| pair[0] == pair[1]) {
            let (row, col) = pair[0];
            return Err(GameError::DuplicateMine { row, col });
        }
        Ok(mines)
    }

    fn place_mines(&mut self, mines: Vec<Coord2>) {
        for &coords in &mines {
            self.grid[ix(coords)].set_mine(true);
        }
        self.mines = mines;

        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                let count = self
                    .around(coords)
                    .filter(|&pos| self.grid[ix(pos)].is_mine())
                    .count();
                self.grid[ix(coords)].set_adjacent_mines(count as u8);
            }
        }
    }

    /// Opens a cell, flood-filling from it when it has no adjacent mines.
    ///
    /// A flagged cell can still be opened directly, its flag is removed. On a board that has not started yet this
    /// is the first move and starts the game there.
    pub fn open_cell(&mut self, row: Coord, col: Coord) -> Result<RevealOutcome> {
        let coords = self.validate_coords(row, col)?;
        if self.state.is_configured() {
            self.start_game(row, col)?;
        }
        if self.state.is_finished() || self.grid[ix(coords)].is_opened() {
            return Ok(RevealOutcome::NoChange);
        }
        Ok(self.open_single_cell(coords))
    }

    /// Flips the flag of an unopened cell. On a board that has not started yet this starts the game there first.
    pub fn toggle_flag(&mut self, row: Coord, col: Coord) -> Result<FlagOutcome> {
        let coords = self.validate_coords(row, col)?;
        if self.state.is_configured() {
            self.start_game(row, col)?;
        }
        if self.state.is_finished() {
            return Ok(FlagOutcome::Unchanged);
        }

        let cell = &mut self.grid[ix(coords)];
        if cell.is_opened() {
            return Ok(FlagOutcome::Unchanged);
        }

        let outcome = if cell.is_flagged() {
            cell.set_flagged(false);
            self.flagged_count -= 1;
            FlagOutcome::Removed
        } else {
            cell.set_flagged(true);
            self.flagged_count += 1;
            FlagOutcome::Placed
        };
        log::debug!(
            "Flag {:?} at {:?}, {} flags placed",
            outcome,
            coords,
            self.flagged_count
        );
        Ok(outcome)
    }

    pub fn is_chordable(&self, row: Coord, col: Coord) -> bool {
        let Ok(coords) = self.validate_coords(row, col) else {
            return false;
        };
        let cell = self.grid[ix(coords)];
        cell.is_opened()
            && !cell.is_mine()
            && cell.adjacent_mines() > 0
            && cell.adjacent_mines() == self.count_flagged_neighbors(coords)
    }

    /// Opens every unflagged neighbour of an opened number whose flags already account for all of its mines.
    /// Anything else is handled like [`Board::open_cell`].
    pub fn chord(&mut self, row: Coord, col: Coord) -> Result<RevealOutcome> {
        let coords = self.validate_coords(row, col)?;
        if !self.is_chordable(row, col) {
            return self.open_cell(row, col);
        }
        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        log::debug!("Chord at {:?}", coords);
        let targets: Vec<Coord2> = self.around(coords).collect();
        Ok(targets
            .into_iter()
            .map(|neighbor| {
                let cell = self.grid[ix(neighbor)];
                if self.state.is_finished() || cell.is_opened() || cell.is_flagged() {
                    RevealOutcome::NoChange
                } else {
                    self.open_single_cell(neighbor)
                }
            })
            .fold(RevealOutcome::NoChange, Ord::max))
    }

    /// Opens one unopened cell of an active game, flood-fills and checks for the end of the game.
    fn open_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = &mut self.grid[ix(coords)];

        if cell.is_flagged() {
            cell.set_flagged(false);
            self.flagged_count -= 1;
        }

        if cell.is_mine() {
            log::debug!("Mine opened at {:?}", coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        cell.set_opened(true);
        let count = cell.adjacent_mines();
        self.opened_count += 1;
        log::debug!("Open cell at {:?}, mine count: {}", coords, count);

        if count == 0 {
            self.flood_fill(coords);
        }

        if self.opened_count == self.difficulty.safe_cells() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Opens the region connected to a zero cell. Stops at flags, mines and opened cells, the opened check keeps
    /// any cell from being opened twice.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit: VecDeque<Coord2> = self
            .around(origin)
            .filter(|&pos| self.is_flood_candidate(pos))
            .collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            if !self.is_flood_candidate(visit_coords) {
                continue;
            }

            let cell = &mut self.grid[ix(visit_coords)];
            cell.set_opened(true);
            let visit_count = cell.adjacent_mines();
            self.opened_count += 1;
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                visit_coords,
                visit_count
            );

            // if this is also zero we visit the neighbors
            if visit_count == 0 {
                let next: Vec<Coord2> = self
                    .around(visit_coords)
                    .filter(|&pos| self.is_flood_candidate(pos))
                    .collect();
                to_visit.extend(next);
            }
        }
    }

    fn is_flood_candidate(&self, coords: Coord2) -> bool {
        let cell = &self.grid[ix(coords)];
        !cell.is_opened() && !cell.is_flagged() && !cell.is_mine()
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        let now = Utc::now();
        self.ended_at = Some(now);
        log::debug!("{:?} at {}", self.state, now);

        if !won {
            self.reveal_mines();
        }
    }

    fn reveal_mines(&mut self) {
        for &coords in &self.mines {
            let cell = &mut self.grid[ix(coords)];
            if !cell.is_opened() {
                cell.set_opened(true);
                self.opened_count += 1;
            }
        }
    }

    fn around(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        neighbors(coords, self.size())
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.around(coords)
            .filter(|&pos| self.grid[ix(pos)].is_flagged())
            .count() as u8
    }

    fn validate_coords(&self, row: Coord, col: Coord) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if row < rows && col < cols {
            Ok((row, col))
        } else {
            Err(GameError::OutOfRange {
                row,
                col,
                rows,
                cols,
            })
        }
    }

    /// Read-only snapshot for renderers.
    pub fn game_info(&self) -> GameInfo {
        GameInfo {
            difficulty_name: self.difficulty.name().to_string(),
            status: GameStatus {
                is_over: self.is_over(),
                is_won: self.is_won(),
            },
            stats: GameStats {
                flagged_count: self.flagged_count,
                opened_count: self.opened_count,
                remaining_mines: self.remaining_mines(),
                elapsed_seconds: self.elapsed_secs(),
            },
            board: self.grid.map(CellState::display_value),
        }
    }
}
