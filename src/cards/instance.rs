//! Battle cards - per-battle card state.
//!
//! `BattleCard` is a copy of a catalog `Card` owned by exactly one battle.
//! The only thing that changes over its life is `current_hp`, and it only
//! goes down.

use serde::{Deserialize, Serialize};

use super::definition::Card;
use crate::core::entity::BattleCardId;

/// A card committed to a battle roster.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleCard {
    /// Battle-scoped identity.
    pub id: BattleCardId,

    /// Snapshot of the catalog card.
    pub card: Card,

    /// Remaining hit points, `0..=card.hp`.
    current_hp: u32,
}

impl BattleCard {
    /// Commit a catalog card to a battle at full health.
    #[must_use]
    pub fn new(id: BattleCardId, card: Card) -> Self {
        let current_hp = card.hp;
        Self {
            id,
            card,
            current_hp,
        }
    }

    /// Remaining hit points.
    #[must_use]
    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    /// Printed hit points.
    #[must_use]
    pub fn max_hp(&self) -> u32 {
        self.card.hp
    }

    /// Attack damage this card deals.
    #[must_use]
    pub fn damage(&self) -> u32 {
        self.card.attack.damage
    }

    /// A card at zero hp can no longer be submitted.
    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.current_hp == 0
    }

    /// Remove up to `amount` hp, clamping at zero.
    ///
    /// Returns the hp actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Attack;

    fn sample() -> BattleCard {
        BattleCard::new(
            BattleCardId::new(1),
            Card::new("c", "Squirtle", 10, 50, Attack::new("Bubble", 10)),
        )
    }

    #[test]
    fn test_starts_at_full_hp() {
        let card = sample();
        assert_eq!(card.current_hp(), 50);
        assert_eq!(card.max_hp(), 50);
        assert_eq!(card.damage(), 10);
        assert!(!card.is_eliminated());
    }

    #[test]
    fn test_take_damage_clamps() {
        let mut card = sample();

        assert_eq!(card.take_damage(20), 20);
        assert_eq!(card.current_hp(), 30);

        assert_eq!(card.take_damage(100), 30);
        assert_eq!(card.current_hp(), 0);
        assert!(card.is_eliminated());

        assert_eq!(card.take_damage(5), 0);
        assert_eq!(card.current_hp(), 0);
    }

    #[test]
    fn test_copy_does_not_touch_catalog_card() {
        let catalog = Card::new("c", "Squirtle", 10, 50, Attack::new("Bubble", 10));
        let mut card = BattleCard::new(BattleCardId::new(1), catalog.clone());

        card.take_damage(10);
        assert_eq!(catalog.hp, 50);
        assert_eq!(card.card, catalog);
    }

    #[test]
    fn test_serialization() {
        let mut card = sample();
        card.take_damage(15);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: BattleCard = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
