//! Battle engine: the operations callers invoke.
//!
//! Every mutating operation follows the same cycle:
//!
//! 1. Load the battle from the `BattleStore` (an independent copy).
//! 2. Run the transition on that copy. A rejected transition returns
//!    its error and nothing is written.
//! 3. Bump the revision and save, passing the revision that was read.
//!
//! If another operation saved the same battle in between, step 3 fails with
//! a `Conflict` error and the caller decides whether to retry. The engine
//! never retries on its own, so a caller never sees a transition applied
//! on top of state it did not read.

use std::sync::{Mutex, PoisonError};

use crate::battle::{Battle, SubmitOutcome};
use crate::cards::{BattleCard, Card, CardCatalog, CardId, CardNormalizer};
use crate::core::config::EngineConfig;
use crate::core::entity::{BattleCardId, BattleId};
use crate::core::error::{EngineError, Result};
use crate::core::player::PlayerId;
use crate::core::rng::IdGenerator;
use crate::store::{BattleStore, CardSource, InMemoryBattleStore, StoreError};

/// Entry point for creating, joining and playing battles.
///
/// `BattleEngine` is `Sync` when its store and card source are, so one
/// instance can be shared across threads behind an `Arc`.
pub struct BattleEngine<S = InMemoryBattleStore, C = CardCatalog> {
    config: EngineConfig,
    store: S,
    cards: C,
    ids: Mutex<IdGenerator>,
}

impl BattleEngine {
    /// An engine over an in-memory store and an empty catalog that uses the
    /// configured creature category.
    #[must_use]
    pub fn in_memory(config: EngineConfig) -> Self {
        let catalog = CardCatalog::with_normalizer(CardNormalizer::new(
            config.creature_category.clone(),
        ));
        Self::new(config, InMemoryBattleStore::new(), catalog)
    }
}

impl<S: BattleStore, C: CardSource> BattleEngine<S, C> {
    pub fn new(config: EngineConfig, store: S, cards: C) -> Self {
        let ids = IdGenerator::from_seed_option(config.id_seed);
        Self {
            config,
            store,
            cards,
            ids: Mutex::new(ids),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn cards(&self) -> &C {
        &self.cards
    }

    /// Mutable access to the card source, e.g. to ingest more cards.
    pub fn cards_mut(&mut self) -> &mut C {
        &mut self.cards
    }

    /// Open a battle for `player_one` with the given catalog cards.
    ///
    /// Every card id must exist in the catalog. Each card becomes a fresh
    /// battle card at full hp, even if the same id is listed twice.
    pub fn create_battle(&self, player_one: &PlayerId, card_ids: &[CardId]) -> Result<Battle> {
        if card_ids.is_empty() {
            return Err(EngineError::EmptyRoster);
        }
        let cards = self.cards.cards(card_ids)?;

        let (id, roster) = {
            let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
            let id = ids.battle_id();
            (id, Self::instantiate(&mut ids, cards))
        };

        let mut battle = Battle::open(id, player_one.clone(), roster)?;
        battle.bump_revision();
        self.store.insert(&battle)?;

        tracing::info!(
            battle = %id,
            player = %player_one,
            cards = card_ids.len(),
            "battle requested"
        );
        Ok(battle)
    }

    /// `player_two` accepts a requested battle with their own cards.
    ///
    /// The battle's state is checked before the cards are looked up, so a
    /// missing or already joined battle is reported as such.
    pub fn join_battle(
        &self,
        battle_id: BattleId,
        player_two: &PlayerId,
        card_ids: &[CardId],
    ) -> Result<Battle> {
        let (battle, ()) = self.update(battle_id, |battle| {
            battle.check_joinable(player_two)?;
            let cards = self.cards.cards(card_ids)?;
            let roster = {
                let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
                Self::instantiate(&mut ids, cards)
            };
            battle.join(player_two.clone(), roster)
        })?;

        tracing::info!(battle = %battle_id, player = %player_two, "battle joined");
        Ok(battle)
    }

    /// `player` designates `card` for round `round`.
    ///
    /// Resubmitting the card already held for the current round is accepted
    /// and writes nothing.
    pub fn submit_round(
        &self,
        battle_id: BattleId,
        player: &PlayerId,
        round: u32,
        card: BattleCardId,
    ) -> Result<SubmitOutcome> {
        let (_, outcome) = self.update(battle_id, |battle| {
            battle.submit(player, round, card, &self.config)
        })?;
        Ok(outcome)
    }

    /// Current snapshot of a battle.
    pub fn battle(&self, battle_id: BattleId) -> Result<Battle> {
        self.load(battle_id)
    }

    /// A battle card with its current hp.
    pub fn battle_card(&self, battle_id: BattleId, card: BattleCardId) -> Result<BattleCard> {
        let battle = self.load(battle_id)?;
        let (_, found) = battle.battle_card(card)?;
        Ok(found.clone())
    }

    /// A catalog card by id.
    pub fn card(&self, id: &CardId) -> Result<Card> {
        self.cards
            .card(id)
            .ok_or_else(|| EngineError::CardNotFound(id.clone()))
    }

    /// All battles a player takes part in, ordered by id.
    pub fn battles_for_player(&self, player: &PlayerId) -> Result<Vec<Battle>> {
        let mut battles = self.store.list_for_player(player)?;
        battles.sort_by_key(Battle::id);
        Ok(battles)
    }

    fn load(&self, battle_id: BattleId) -> Result<Battle> {
        self.store
            .load(battle_id)?
            .ok_or(EngineError::BattleNotFound(battle_id))
    }

    /// Load, transition a copy, and save it back under the read revision.
    ///
    /// Skips the write when the transition left the battle unchanged.
    fn update<T>(
        &self,
        battle_id: BattleId,
        transition: impl FnOnce(&mut Battle) -> Result<T>,
    ) -> Result<(Battle, T)> {
        let loaded = self.load(battle_id)?;
        let mut battle = loaded.clone();
        let value = transition(&mut battle)?;
        if battle == loaded {
            return Ok((battle, value));
        }

        let expected = battle.bump_revision();
        if let Err(err) = self.store.save(&battle, expected) {
            if let StoreError::Conflict { actual, .. } = &err {
                tracing::warn!(
                    battle = %battle_id,
                    expected,
                    actual,
                    "concurrent update, transition discarded"
                );
            }
            return Err(err.into());
        }
        Ok((battle, value))
    }

    fn instantiate(ids: &mut IdGenerator, cards: Vec<Card>) -> Vec<BattleCard> {
        cards
            .into_iter()
            .map(|card| BattleCard::new(ids.battle_card_id(), card))
            .collect()
    }
}
