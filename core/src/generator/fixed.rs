use super::*;

/// Places mines exactly where told. The board rejects a layout that does not fit its difficulty or mines the start
/// cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedLayout {
    mines: Vec<Coord2>,
}

impl FixedLayout {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineGenerator for FixedLayout {
    fn generate(&mut self, _difficulty: &Difficulty, _start: Coord2) -> Vec<Coord2> {
        self.mines.clone()
    }
}
