//! Player identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Opaque player identity supplied by the caller (the API collaborator has
//! already authenticated it). The engine only compares it for equality.
//!
//! ## Seat
//!
//! Which side of a battle a player occupies. Player one opens the battle,
//! player two joins it.
//!
//! ## SeatMap
//!
//! Fixed two-slot storage indexable by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Opaque player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Side of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// The player who opened the battle.
    PlayerOne,
    /// The player who joined it.
    PlayerTwo,
}

impl Seat {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Seat::PlayerOne => Seat::PlayerTwo,
            Seat::PlayerTwo => Seat::PlayerOne,
        }
    }

    /// Both seats, player one first.
    pub fn both() -> impl Iterator<Item = Seat> {
        [Seat::PlayerOne, Seat::PlayerTwo].into_iter()
    }
}

/// Per-seat data storage.
///
/// ```
/// use tcg_battle::core::{Seat, SeatMap};
///
/// let mut picks: SeatMap<Option<u32>> = SeatMap::default();
/// picks[Seat::PlayerTwo] = Some(3);
///
/// assert_eq!(picks[Seat::PlayerOne], None);
/// assert_eq!(picks[Seat::PlayerTwo], Some(3));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    player_one: T,
    player_two: T,
}

impl<T> SeatMap<T> {
    /// Create a map from explicit values.
    pub fn new(player_one: T, player_two: T) -> Self {
        Self {
            player_one,
            player_two,
        }
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        match seat {
            Seat::PlayerOne => &self.player_one,
            Seat::PlayerTwo => &self.player_two,
        }
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        match seat {
            Seat::PlayerOne => &mut self.player_one,
            Seat::PlayerTwo => &mut self.player_two,
        }
    }

    /// Iterate over (Seat, &T) pairs, player one first.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        [
            (Seat::PlayerOne, &self.player_one),
            (Seat::PlayerTwo, &self.player_two),
        ]
        .into_iter()
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}
