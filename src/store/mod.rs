//! Persistence port for battles.
//!
//! The engine reads a battle, transitions a private copy, and writes it back
//! with the revision it read. Stores reject the write if the stored revision
//! moved in between, which serializes concurrent operations on the same
//! battle without holding a lock across the whole operation.
//!
//! ## Revision Semantics
//!
//! - A newly inserted battle carries revision 1.
//! - The engine calls `Battle::bump_revision` before `save`, passing the
//!   revision it read as `expected_revision`.
//! - `save` fails with `StoreError::Conflict` unless the stored revision
//!   equals `expected_revision`.

pub mod memory;

use thiserror::Error;

use crate::battle::Battle;
use crate::cards::{Card, CardCatalog, CardId};
use crate::core::entity::BattleId;
use crate::core::error::{self, EngineError};
use crate::core::player::PlayerId;

pub use memory::InMemoryBattleStore;

/// Errors raised by battle store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A writer panicked while holding the store lock.
    #[error("battle store lock was poisoned")]
    LockPoisoned,

    /// `insert` found a battle with the same id.
    #[error("battle {0} already exists")]
    AlreadyExists(BattleId),

    /// `save` targeted a battle that was never inserted.
    #[error("battle {0} does not exist")]
    Missing(BattleId),

    /// The stored revision moved since the battle was read.
    #[error("revision mismatch for battle {battle}: expected {expected}, found {actual}")]
    Conflict {
        battle: BattleId,
        expected: u64,
        actual: u64,
    },

    /// A battle document failed to encode or decode.
    #[error("codec error: {0}")]
    Codec(String),
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Codec(err.to_string())
    }
}

/// Storage for battle aggregates.
pub trait BattleStore: Send + Sync {
    /// Store a new battle.
    fn insert(&self, battle: &Battle) -> Result<(), StoreError>;

    /// Load a battle by id.
    ///
    /// The returned value is an independent copy.
    fn load(&self, id: BattleId) -> Result<Option<Battle>, StoreError>;

    /// Replace a battle if its stored revision is still `expected_revision`.
    fn save(&self, battle: &Battle, expected_revision: u64) -> Result<(), StoreError>;

    /// All battles a player takes part in, in no particular order.
    fn list_for_player(&self, player: &PlayerId) -> Result<Vec<Battle>, StoreError>;
}

/// Read access to normalized catalog cards.
pub trait CardSource: Send + Sync {
    /// Look up one card.
    fn card(&self, id: &CardId) -> Option<Card>;

    /// Look up several cards, all or nothing, in request order.
    fn cards(&self, ids: &[CardId]) -> error::Result<Vec<Card>> {
        ids.iter()
            .map(|id| {
                self.card(id)
                    .ok_or_else(|| EngineError::CardNotFound(id.clone()))
            })
            .collect()
    }
}

impl CardSource for CardCatalog {
    fn card(&self, id: &CardId) -> Option<Card> {
        self.get(id).cloned()
    }

    fn cards(&self, ids: &[CardId]) -> error::Result<Vec<Card>> {
        self.get_many(ids)
    }
}
