use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifier of a card within one deck, unique per deal.
pub type CardId = u16;

/// Count type used for the number of distinct pairs in a deck.
pub type PairCount = u8;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const fn symbol(self) -> &'static str {
        use Suit::*;
        match self {
            Spades => "♠",
            Hearts => "♥",
            Diamonds => "♦",
            Clubs => "♣",
        }
    }

    pub const fn name(self) -> &'static str {
        use Suit::*;
        match self {
            Spades => "spades",
            Hearts => "hearts",
            Diamonds => "diamonds",
            Clubs => "clubs",
        }
    }
}

/// Ranks of the 36 card deck, lowest first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 9] = [
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn label(self) -> &'static str {
        use Rank::*;
        match self {
            Six => "6",
            Seven => "7",
            Eight => "8",
            Nine => "9",
            Ten => "10",
            Jack => "J",
            Queen => "Q",
            King => "K",
            Ace => "A",
        }
    }
}

/// What is printed on a card. Two cards with an equal face are twins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Face {
    pub suit: Suit,
    pub rank: Rank,
}

impl Face {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Every face using the lowest `max_rank` ranks, rank-major.
    pub fn all(max_rank: u8) -> impl Iterator<Item = Face> {
        Rank::ALL
            .into_iter()
            .take(usize::from(max_rank))
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Face::new(suit, rank)))
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub face: Face,
    pub open: bool,
    pub guessed: bool,
    pub disabled: bool,
}

impl Card {
    pub const fn new(id: CardId, face: Face) -> Self {
        Self {
            id,
            face,
            open: false,
            guessed: false,
            disabled: false,
        }
    }

    pub const fn suit(&self) -> Suit {
        self.face.suit
    }

    pub const fn rank(&self) -> Rank {
        self.face.rank
    }

    /// Open but not yet part of a resolved pair.
    pub const fn is_pending(&self) -> bool {
        self.open && !self.guessed
    }

    pub fn is_twin_of(&self, other: &Card) -> bool {
        self.id != other.id && self.face == other.face
    }
}

/// Ordered cards of one game.
pub type Deck = alloc::vec::Vec<Card>;
