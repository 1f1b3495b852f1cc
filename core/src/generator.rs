use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use crate::*;

pub trait MinefieldGenerator {
    /// Places `config.mines` mines among `candidates`, the cells still hidden.
    fn generate(self, config: GameConfig, candidates: &[Coord2]) -> MineLayout;
}

/// Purely random generation: every subset of the candidates of the requested
/// size is equally likely, and the same seed always yields the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig, candidates: &[Coord2]) -> MineLayout {
        let mut layout = MineLayout::empty(config.size);

        let requested = usize::from(config.mines);
        let amount = if requested > candidates.len() {
            log::warn!(
                "Minefield already full, generated anyway, requested {} but only fits {}",
                requested,
                candidates.len()
            );
            candidates.len()
        } else {
            requested
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for picked in index::sample(&mut rng, candidates.len(), amount).into_iter() {
            layout.place_mine(candidates[picked]);
        }

        log::debug!(
            "Placed {} mines among {} candidates (seed {})",
            layout.mine_count(),
            candidates.len(),
            self.seed
        );
        layout
    }
}
