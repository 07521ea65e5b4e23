use serde::{Deserialize, Serialize};

/// Highest adjacency count a cell with eight neighbours can have.
pub const MAX_ADJACENT_MINES: u8 = 8;

/// What a player is allowed to see of a cell. Carries no presentation detail, renderers pick the text and colours.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayValue {
    Unopened,
    Flag,
    Mine,
    Blank,
    Digit(u8),
}

impl Default for DisplayValue {
    fn default() -> Self {
        Self::Unopened
    }
}

/// State of one grid position.
///
/// Setters never fail. Input that would break the cell's invariants (re-counting a mine, flagging an opened cell,
/// an impossible neighbour count) is ignored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    mine: bool,
    opened: bool,
    flagged: bool,
    adjacent_mines: u8,
}

impl CellState {
    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn is_opened(&self) -> bool {
        self.opened
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// Re-initializes the cell as unopened, unflagged and with no adjacent mines.
    pub fn set_mine(&mut self, mine: bool) {
        *self = Self {
            mine,
            ..Self::default()
        };
    }

    pub fn set_flagged(&mut self, flagged: bool) {
        if self.opened {
            return;
        }
        self.flagged = flagged;
    }

    pub fn set_opened(&mut self, opened: bool) {
        self.opened = opened;
    }

    pub fn set_adjacent_mines(&mut self, count: u8) {
        if self.mine || count > MAX_ADJACENT_MINES {
            return;
        }
        self.adjacent_mines = count;
    }

    pub const fn display_value(&self) -> DisplayValue {
        match (self.opened, self.flagged, self.mine, self.adjacent_mines) {
            (false, true, _, _) => DisplayValue::Flag,
            (false, false, _, _) => DisplayValue::Unopened,
            (true, _, true, _) => DisplayValue::Mine,
            (true, _, false, 0) => DisplayValue::Blank,
            (true, _, false, count) => DisplayValue::Digit(count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_unopened() {
        let cell = CellState::default();
        assert_eq!(cell.display_value(), DisplayValue::Unopened);
        assert!(!cell.is_mine());
        assert_eq!(cell.adjacent_mines(), 0);
    }

    #[test]
    fn set_mine_resets_other_fields() {
        let mut cell = CellState::default();
        cell.set_adjacent_mines(3);
        cell.set_flagged(true);
        cell.set_mine(true);

        assert!(cell.is_mine());
        assert!(!cell.is_flagged());
        assert!(!cell.is_opened());
        assert_eq!(cell.adjacent_mines(), 0);
    }

    #[test]
    fn flag_is_frozen_once_opened() {
        let mut cell = CellState::default();
        cell.set_opened(true);
        cell.set_flagged(true);
        assert!(!cell.is_flagged());

        let mut cell = CellState::default();
        cell.set_flagged(true);
        cell.set_opened(true);
        cell.set_flagged(false);
        assert!(cell.is_flagged());
    }

    #[test]
    fn mine_ignores_adjacent_count() {
        let mut cell = CellState::default();
        cell.set_mine(true);
        cell.set_adjacent_mines(2);
        assert_eq!(cell.adjacent_mines(), 0);
    }

    #[test]
    fn impossible_count_is_ignored() {
        let mut cell = CellState::default();
        cell.set_adjacent_mines(4);
        cell.set_adjacent_mines(9);
        assert_eq!(cell.adjacent_mines(), 4);
    }

    #[test]
    fn display_values() {
        let mut cell = CellState::default();
        cell.set_flagged(true);
        assert_eq!(cell.display_value(), DisplayValue::Flag);
        cell.set_flagged(false);
        cell.set_opened(true);
        assert_eq!(cell.display_value(), DisplayValue::Blank);

        let mut cell = CellState::default();
        cell.set_adjacent_mines(5);
        assert_eq!(cell.display_value(), DisplayValue::Unopened);
        cell.set_opened(true);
        assert_eq!(cell.display_value(), DisplayValue::Digit(5));
        cell.set_opened(false);
        assert_eq!(cell.display_value(), DisplayValue::Unopened);

        let mut cell = CellState::default();
        cell.set_mine(true);
        cell.set_opened(true);
        assert_eq!(cell.display_value(), DisplayValue::Mine);
    }

    #[test]
    fn display_value_is_a_function_of_the_fields() {
        for mine in [false, true] {
            for opened in [false, true] {
                for flagged in [false, true] {
                    for count in 0..=MAX_ADJACENT_MINES {
                        let build = || {
                            let mut cell = CellState::default();
                            cell.set_mine(mine);
                            cell.set_adjacent_mines(count);
                            cell.set_flagged(flagged);
                            cell.set_opened(opened);
                            cell
                        };
                        assert_eq!(build(), build());
                        assert_eq!(build().display_value(), build().display_value());
                    }
                }
            }
        }
    }
}
