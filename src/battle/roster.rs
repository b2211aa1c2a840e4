//! Roster resolution: battle-card reference to the card and its seat.

use super::state::Battle;
use crate::cards::BattleCard;
use crate::core::entity::BattleCardId;
use crate::core::error::{EngineError, Result};
use crate::core::player::{PlayerId, Seat};

/// Locate a battle card in either roster.
///
/// Player one's roster is searched first. Ids are unique within a battle,
/// so at most one card matches.
#[must_use]
pub fn find_battle_card(battle: &Battle, id: BattleCardId) -> Option<(Seat, &BattleCard)> {
    Seat::both().find_map(|seat| {
        battle
            .roster(seat)
            .iter()
            .find(|card| card.id == id)
            .map(|card| (seat, card))
    })
}

impl Battle {
    /// Point lookup of a battle card.
    pub fn battle_card(&self, id: BattleCardId) -> Result<(Seat, &BattleCard)> {
        find_battle_card(self, id).ok_or(EngineError::BattleCardNotFound {
            battle: self.id(),
            card: id,
        })
    }

    /// Look up a card a player wants to play and check it is playable.
    ///
    /// Rejects non-participants, cards from the other roster and eliminated
    /// cards.
    pub fn playable_card(
        &self,
        player: &PlayerId,
        id: BattleCardId,
    ) -> Result<(Seat, &BattleCard)> {
        let seat = self.seat_of(player).ok_or_else(|| EngineError::NotParticipant {
            battle: self.id(),
            player: player.clone(),
        })?;
        let (owner, card) = self.battle_card(id)?;
        if owner != seat {
            return Err(EngineError::ForeignCard {
                card: id,
                player: player.clone(),
            });
        }
        if card.is_eliminated() {
            return Err(EngineError::CardEliminated(id));
        }
        Ok((seat, card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::BattleUpdate;
    use crate::cards::{Attack, Card};
    use crate::core::entity::BattleId;
    use crate::core::error::ErrorKind;

    fn card(raw: u128, hp: u32) -> BattleCard {
        BattleCard::new(
            BattleCardId::new(raw),
            Card::new(format!("c{raw}"), "Card", 1, hp, Attack::new("Hit", 10)),
        )
    }

    fn active() -> Battle {
        let mut battle = Battle::requested(
            BattleId::new(9),
            PlayerId::new("p1"),
            vec![card(1, 50), card(2, 50)],
        );
        battle.apply(BattleUpdate::Join {
            player_two: PlayerId::new("p2"),
            roster: vec![card(3, 50)],
        });
        battle
    }

    #[test]
    fn test_finds_in_either_roster() {
        let battle = active();

        let (seat, found) = find_battle_card(&battle, BattleCardId::new(2)).unwrap();
        assert_eq!(seat, Seat::PlayerOne);
        assert_eq!(found.id, BattleCardId::new(2));

        let (seat, _) = find_battle_card(&battle, BattleCardId::new(3)).unwrap();
        assert_eq!(seat, Seat::PlayerTwo);

        assert!(find_battle_card(&battle, BattleCardId::new(99)).is_none());
    }

    #[test]
    fn test_battle_card_not_found() {
        let battle = active();
        let err = battle.battle_card(BattleCardId::new(99)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_playable_card_rejects_foreign() {
        let battle = active();
        let err = battle
            .playable_card(&PlayerId::new("p1"), BattleCardId::new(3))
            .unwrap_err();
        assert!(matches!(err, EngineError::ForeignCard { .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_playable_card_rejects_eliminated() {
        let mut battle = active();
        battle.roster_mut(Seat::PlayerTwo)[0].take_damage(50);

        let err = battle
            .playable_card(&PlayerId::new("p2"), BattleCardId::new(3))
            .unwrap_err();
        assert!(matches!(err, EngineError::CardEliminated(_)));
    }

    #[test]
    fn test_playable_card_rejects_outsider() {
        let battle = active();
        let err = battle
            .playable_card(&PlayerId::new("mallory"), BattleCardId::new(1))
            .unwrap_err();
        assert!(matches!(err, EngineError::NotParticipant { .. }));
    }

    #[test]
    fn test_playable_card_returns_seat() {
        let battle = active();
        let (seat, card) = battle
            .playable_card(&PlayerId::new("p1"), BattleCardId::new(1))
            .unwrap();
        assert_eq!(seat, Seat::PlayerOne);
        assert_eq!(card.current_hp(), 50);
    }
}
