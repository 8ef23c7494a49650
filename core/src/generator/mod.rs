use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, config: GameConfig) -> Deck;
}

/// Deals a shuffled deck of `pair_count` twins drawn from the lowest `max_rank` ranks.
pub fn generate_deck(pair_count: PairCount, max_rank: u8, seed: u64) -> Result<Deck> {
    let config = GameConfig::with_max_rank(pair_count, GameMode::default(), max_rank)?;
    Ok(RandomDeckGenerator::new(seed).generate(config))
}
