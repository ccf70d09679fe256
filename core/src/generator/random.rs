use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform rejection sampling: draw random cells and keep the ones that are not mines yet.
///
/// The opening move gets no special treatment, any cell may hold a mine.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed the generator started from; successive layouts continue the same stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;

        let (rows, columns) = config.size;
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut attempts: u32 = 0;

        while mines_placed < config.mines {
            attempts += 1;
            let coords: Coord2 = (
                self.rng.random_range(0..rows),
                self.rng.random_range(0..columns),
            );
            let cell = &mut mines[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {}x{} board in {} attempts (seed {})",
            mines_placed,
            rows,
            columns,
            attempts,
            self.seed
        );
        MineLayout::from_mine_mask(mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count() {
        let mut generator = RandomMinefieldGenerator::new(7);

        for (size, mines) in [((9, 9), 10), ((16, 16), 40), ((16, 30), 99), ((2, 2), 3)] {
            let config = GameConfig::new(size, mines).unwrap();
            for _ in 0..20 {
                let layout = generator.generate(config).unwrap();
                assert_eq!(layout.size(), size);
                assert_eq!(layout.mine_count(), mines);
                assert_eq!(layout.mine_coords().len(), usize::from(mines));
            }
        }
    }

    #[test]
    fn same_seed_same_layouts() {
        let config = GameConfig::new((9, 9), 10).unwrap();
        let mut a = RandomMinefieldGenerator::new(42);
        let mut b = RandomMinefieldGenerator::new(42);
        assert_eq!(a.seed(), 42);

        for _ in 0..5 {
            assert_eq!(a.generate(config).unwrap(), b.generate(config).unwrap());
        }
    }

    #[test]
    fn successive_layouts_differ() {
        let config = GameConfig::new((16, 16), 40).unwrap();
        let mut generator = RandomMinefieldGenerator::new(1);

        let first = generator.generate(config).unwrap();
        let second = generator.generate(config).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn rejects_invalid_config() {
        let mut generator = RandomMinefieldGenerator::new(3);

        assert_eq!(
            generator.generate(GameConfig::new_unchecked((3, 3), 9)),
            Err(GameError::InvalidConfiguration {
                rows: 3,
                columns: 3,
                mines: 9
            })
        );
        assert!(generator
            .generate(GameConfig::new_unchecked((0, 3), 1))
            .is_err());
    }
}
