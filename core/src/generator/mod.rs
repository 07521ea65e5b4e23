use crate::*;
pub use fixed::*;
pub use pocket::*;

mod fixed;
mod pocket;

/// Chooses where mines go once the first move is known.
pub trait MineGenerator {
    /// Returns `difficulty.mines()` distinct in-bounds mine coordinates, none of them `start`.
    fn generate(&mut self, difficulty: &Difficulty, start: Coord2) -> Vec<Coord2>;
}
