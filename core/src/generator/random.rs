use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Picks faces uniformly out of the available ones, deals each twice and shuffles the whole deck.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, config: GameConfig) -> Deck {
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut faces: Vec<Face> = Face::all(config.max_rank).collect();
        let mut pair_count = usize::from(config.pair_count);
        if pair_count > faces.len() {
            log::warn!(
                "Not enough faces, generated anyway, requested {} pairs but only {} exist",
                pair_count,
                faces.len()
            );
            pair_count = faces.len();
        }

        faces.shuffle(&mut rng);
        faces.truncate(pair_count);

        let mut deck: Deck = faces
            .iter()
            .flat_map(|&face| [face, face])
            .zip(0..)
            .map(|(face, id)| Card::new(id, face))
            .collect();
        deck.shuffle(&mut rng);

        log::debug!("dealt {} cards from seed {}", deck.len(), self.seed);
        deck
    }
}
