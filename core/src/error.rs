use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates ({row}, {col}) are outside the {rows}x{cols} board")]
    OutOfRange {
        row: Coord,
        col: Coord,
        rows: Coord,
        cols: Coord,
    },
    #[error("Board must have at least one row and one column, got {rows}x{cols}")]
    InvalidDimensions { rows: Coord, cols: Coord },
    #[error("Too many mines: {mines} requested but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Mine layout has {placed} mines but the board needs {expected}")]
    MineCountMismatch { placed: usize, expected: CellCount },
    #[error("Mine layout places ({row}, {col}) more than once")]
    DuplicateMine { row: Coord, col: Coord },
    #[error("Mine layout puts a mine on the start cell ({row}, {col})")]
    MineOnStart { row: Coord, col: Coord },
}

pub type Result<T> = core::result::Result<T, GameError>;
