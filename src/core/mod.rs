//! Core engine types: identifiers, players and seats, token generation,
//! configuration, errors.
//!
//! Nothing here knows about battle rules; the `battle` module builds on it.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{BattleCardId, BattleId, ParseIdError};
pub use player::{PlayerId, Seat, SeatMap};
pub use rng::IdGenerator;
pub use config::{EngineConfig, DEFAULT_CREATURE_CATEGORY};
pub use error::{EngineError, ErrorKind, Result};
