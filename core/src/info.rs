use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub is_over: bool,
    pub is_won: bool,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        self.is_over || self.is_won
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub flagged_count: CellCount,
    pub opened_count: CellCount,
    /// Mines minus flags placed. Negative when the player over-flags.
    pub remaining_mines: i64,
    pub elapsed_seconds: u64,
}

/// Owned, read-only snapshot of a [`Board`] for renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    pub difficulty_name: String,
    pub status: GameStatus,
    pub stats: GameStats,
    pub board: Array2<DisplayValue>,
}

impl GameInfo {
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.board.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn display_at(&self, coords: Coord2) -> Option<DisplayValue> {
        self.board.get(ix(coords)).copied()
    }
}
