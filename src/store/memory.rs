//! In-memory BattleStore for tests and local runs.
//!
//! Battles are kept as bincode-encoded documents, so every load decodes a
//! fresh copy and nothing outside the store can alias stored state.

use std::sync::{PoisonError, RwLock};

use rustc_hash::FxHashMap;

use super::{BattleStore, StoreError};
use crate::battle::Battle;
use crate::core::entity::BattleId;
use crate::core::player::PlayerId;

struct Document {
    revision: u64,
    bytes: Vec<u8>,
}

/// In-memory implementation of BattleStore.
#[derive(Default)]
pub struct InMemoryBattleStore {
    battles: RwLock<FxHashMap<BattleId, Document>>,
}

impl InMemoryBattleStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored battles.
    ///
    /// Counts through a poisoned lock: a panicking writer never leaves a
    /// half-inserted entry, so the key count is still accurate.
    pub fn len(&self) -> usize {
        self.battles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn encode(battle: &Battle) -> Result<Document, StoreError> {
        Ok(Document {
            revision: battle.revision(),
            bytes: bincode::serialize(battle)?,
        })
    }

    fn decode(document: &Document) -> Result<Battle, StoreError> {
        Ok(bincode::deserialize(&document.bytes)?)
    }
}

impl BattleStore for InMemoryBattleStore {
    fn insert(&self, battle: &Battle) -> Result<(), StoreError> {
        let document = Self::encode(battle)?;
        let mut battles = self
            .battles
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        if battles.contains_key(&battle.id()) {
            return Err(StoreError::AlreadyExists(battle.id()));
        }
        battles.insert(battle.id(), document);
        Ok(())
    }

    fn load(&self, id: BattleId) -> Result<Option<Battle>, StoreError> {
        let battles = self
            .battles
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        battles.get(&id).map(Self::decode).transpose()
    }

    fn save(&self, battle: &Battle, expected_revision: u64) -> Result<(), StoreError> {
        let document = Self::encode(battle)?;
        let mut battles = self
            .battles
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let stored = battles
            .get_mut(&battle.id())
            .ok_or(StoreError::Missing(battle.id()))?;
        if stored.revision != expected_revision {
            return Err(StoreError::Conflict {
                battle: battle.id(),
                expected: expected_revision,
                actual: stored.revision,
            });
        }
        *stored = document;
        Ok(())
    }

    fn list_for_player(&self, player: &PlayerId) -> Result<Vec<Battle>, StoreError> {
        let battles = self
            .battles
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        let mut found = Vec::new();
        for document in battles.values() {
            let battle = Self::decode(document)?;
            if battle.involves(player) {
                found.push(battle);
            }
        }
        Ok(found)
    }
}
