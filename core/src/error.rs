use thiserror::Error;

use crate::PairCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cannot build {pairs} pairs, only {available} distinct cards exist")]
    InvalidConfiguration { pairs: PairCount, available: u16 },
    #[error("Invalid card id")]
    InvalidCard,
}

pub type Result<T> = core::result::Result<T, GameError>;
