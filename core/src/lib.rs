//! Minesweeper board engine: mine placement, adjacency counts, flood-fill opening, flags and win/loss tracking.
//!
//! The engine never prints. Drivers call [`Board::start_game`] on the first move, then [`Board::open_cell`],
//! [`Board::toggle_flag`] or [`Board::chord`], and read [`Board::game_info`] to render and to check for the end of
//! the game.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use info::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod info;
mod types;

/// Board dimensions and mine count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DifficultyFields")]
pub struct Difficulty {
    name: Cow<'static, str>,
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl Difficulty {
    pub const BEGINNER: Self = Self::new_unchecked("Beginner", 8, 8, 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked("Intermediate", 16, 16, 40);
    pub const EXPERT: Self = Self::new_unchecked("Expert", 30, 16, 99);

    pub const PRESETS: [Self; 3] = [Self::BEGINNER, Self::INTERMEDIATE, Self::EXPERT];

    const fn new_unchecked(name: &'static str, rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self {
            name: Cow::Borrowed(name),
            rows,
            cols,
            mines,
        }
    }

    /// Checks `rows >= 1`, `cols >= 1` and that at least one cell stays free of mines.
    pub fn custom(
        name: impl Into<Cow<'static, str>>,
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions { rows, cols });
        }
        let difficulty = Self {
            name: name.into(),
            rows,
            cols,
            mines,
        };
        let cells = difficulty.total_cells();
        if mines >= cells {
            return Err(GameError::TooManyMines { mines, cells });
        }
        Ok(difficulty)
    }

    /// Looks a preset up by name, ignoring case.
    pub fn preset(name: &str) -> Option<Self> {
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    /// Never overflows, `Coord::MAX` squared fits a `CellCount`.
    pub const fn total_cells(&self) -> CellCount {
        self.rows as CellCount * self.cols as CellCount
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::BEGINNER
    }
}

fn default_name() -> String {
    "Custom".to_string()
}

/// Unvalidated shape of a [`Difficulty`], as found in configuration files.
#[derive(Deserialize)]
struct DifficultyFields {
    #[serde(default = "default_name")]
    name: String,
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl TryFrom<DifficultyFields> for Difficulty {
    type Error = GameError;

    fn try_from(fields: DifficultyFields) -> Result<Self> {
        Self::custom(fields.name, fields.rows, fields.cols, fields.mines)
    }
}

/// What [`Board::toggle_flag`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    /// The cell is opened or the game is over
    Unchanged,
    Placed,
    Removed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// What opening one or more cells did, from least to most severe. Openings done together report the `max`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Won,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_classic_boards() {
        assert_eq!(Difficulty::BEGINNER.size(), (8, 8));
        assert_eq!(Difficulty::BEGINNER.mines(), 10);
        assert_eq!(Difficulty::INTERMEDIATE.size(), (16, 16));
        assert_eq!(Difficulty::INTERMEDIATE.mines(), 40);
        assert_eq!(Difficulty::EXPERT.size(), (30, 16));
        assert_eq!(Difficulty::EXPERT.mines(), 99);
        assert_eq!(Difficulty::EXPERT.safe_cells(), 381);
    }

    #[test]
    fn preset_lookup_ignores_case() {
        assert_eq!(Difficulty::preset("expert"), Some(Difficulty::EXPERT));
        assert_eq!(Difficulty::preset("Beginner"), Some(Difficulty::BEGINNER));
        assert_eq!(Difficulty::preset("nightmare"), None);
    }

    #[test]
    fn custom_difficulty_validation() {
        assert!(Difficulty::custom("Tiny", 1, 1, 0).is_ok());
        assert_eq!(
            Difficulty::custom("Empty", 0, 4, 0),
            Err(GameError::InvalidDimensions { rows: 0, cols: 4 })
        );
        assert_eq!(
            Difficulty::custom("Full", 2, 2, 4),
            Err(GameError::TooManyMines { mines: 4, cells: 4 })
        );
    }

    #[test]
    fn difficulty_deserializes_through_validation() {
        let parsed: Difficulty =
            serde_json::from_str(r#"{"rows": 5, "cols": 6, "mines": 7}"#).unwrap();
        assert_eq!(parsed.name(), "Custom");
        assert_eq!(parsed.size(), (5, 6));

        let rejected = serde_json::from_str::<Difficulty>(r#"{"rows": 2, "cols": 2, "mines": 9}"#);
        assert!(rejected.is_err());
    }

    #[test]
    fn reveal_outcomes_order_by_severity() {
        use RevealOutcome::*;
        assert_eq!([Revealed, NoChange].into_iter().max(), Some(Revealed));
        assert_eq!(Revealed.max(Won), Won);
        assert_eq!(HitMine.max(Won), HitMine);
        assert!(!NoChange.has_update());
        assert!(HitMine.has_update());
    }

    #[test]
    fn huge_board_cell_count() {
        let difficulty = Difficulty::custom("Huge", Coord::MAX, Coord::MAX, 1).unwrap();
        assert_eq!(difficulty.total_cells(), 65535 * 65535);
    }
}
