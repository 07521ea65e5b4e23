use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::*;

/// Random placement that keeps the start cell and a random, non-empty cluster of its neighbours free of mines.
///
/// The cluster size is uniform in `1..=neighbours`: the neighbour list is shuffled and cut at a random point. Mines
/// are then drawn from a shuffle of every other cell. The start cell is never guaranteed to be a zero, only to sit
/// in a pocket of lower risk.
#[derive(Clone, Debug)]
pub struct PocketGenerator {
    rng: SmallRng,
}

impl PocketGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl MineGenerator for PocketGenerator {
    fn generate(&mut self, difficulty: &Difficulty, start: Coord2) -> Vec<Coord2> {
        let (rows, cols) = difficulty.size();

        let mut pocket: Vec<Coord2> = neighbors(start, (rows, cols)).collect();
        pocket.shuffle(&mut self.rng);
        let cut = if pocket.is_empty() {
            0
        } else {
            self.rng.random_range(1..=pocket.len())
        };
        pocket.truncate(cut);
        log::trace!("Start {:?} keeps pocket {:?}", start, pocket);

        let mut candidates: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&coords| coords != start && !pocket.contains(&coords))
            .collect();
        candidates.shuffle(&mut self.rng);

        // release pocket cells last, only when the rest of the board cannot hold every mine
        let wanted = difficulty.mines() as usize;
        if candidates.len() < wanted {
            log::warn!(
                "Only {} cells outside the start pocket, releasing {} pocket cells",
                candidates.len(),
                wanted - candidates.len()
            );
            candidates.append(&mut pocket);
        }

        candidates.truncate(wanted);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_cell_is_never_mined() {
        for seed in 0..200 {
            let mut generator = PocketGenerator::new(seed);
            let mines = generator.generate(&Difficulty::BEGINNER, (0, 0));
            assert_eq!(mines.len(), 10);
            assert!(!mines.contains(&(0, 0)));
        }
    }

    #[test]
    fn mines_are_distinct_and_in_bounds() {
        let mut generator = PocketGenerator::new(7);
        let difficulty = Difficulty::EXPERT;
        let mut mines = generator.generate(&difficulty, (15, 8));
        assert!(mines.iter().all(|&(row, col)| row < 30 && col < 16));
        mines.sort();
        mines.dedup();
        assert_eq!(mines.len(), 99);
    }

    #[test]
    fn pocket_keeps_some_neighbor_free() {
        for seed in 0..200 {
            let mut generator = PocketGenerator::new(seed);
            let mines = generator.generate(&Difficulty::INTERMEDIATE, (5, 5));
            let free_neighbors = neighbors((5, 5), (16, 16))
                .filter(|coords| !mines.contains(coords))
                .count();
            assert!(free_neighbors >= 1, "seed {seed} mined the whole pocket");
        }
    }

    #[test]
    fn crowded_board_releases_pocket() {
        let difficulty = Difficulty::custom("Crowded", 3, 3, 8).unwrap();
        for seed in 0..50 {
            let mut generator = PocketGenerator::new(seed);
            let mines = generator.generate(&difficulty, (1, 1));
            assert_eq!(mines.len(), 8);
            assert!(!mines.contains(&(1, 1)));
        }
    }

    #[test]
    fn single_cell_board_gets_no_mines() {
        let difficulty = Difficulty::custom("Single", 1, 1, 0).unwrap();
        let mut generator = PocketGenerator::new(1);
        assert!(generator.generate(&difficulty, (0, 0)).is_empty());
    }

    #[test]
    fn same_seed_same_layout() {
        let first = PocketGenerator::new(42).generate(&Difficulty::BEGINNER, (3, 3));
        let second = PocketGenerator::new(42).generate(&Difficulty::BEGINNER, (3, 3));
        assert_eq!(first, second);
    }
}
