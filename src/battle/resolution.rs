//! Round resolution.
//!
//! Both cards hit at the same time: each side's damage is computed from the
//! other side's hp *before* the round, then clamped at zero. There is no
//! priority between the two cards, so the result does not depend on
//! argument order beyond which side is reported first.

use serde::{Deserialize, Serialize};

use crate::cards::BattleCard;

/// What happened to one side's card in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exchange {
    /// Hp removed from this card (after clamping).
    pub damage_taken: u32,
    /// Hp left after the round.
    pub hp_after: u32,
}

impl Exchange {
    #[must_use]
    pub fn eliminated(&self) -> bool {
        self.hp_after == 0
    }
}

/// Which argument took the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    First,
    Second,
    Tie,
}

impl RoundOutcome {
    #[must_use]
    pub fn swapped(self) -> Self {
        match self {
            RoundOutcome::First => RoundOutcome::Second,
            RoundOutcome::Second => RoundOutcome::First,
            RoundOutcome::Tie => RoundOutcome::Tie,
        }
    }
}

/// Result of resolving one round between two cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundResult {
    pub first: Exchange,
    pub second: Exchange,
    pub outcome: RoundOutcome,
}

impl RoundResult {
    /// The same result seen from the other side.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            first: self.second,
            second: self.first,
            outcome: self.outcome.swapped(),
        }
    }
}

/// Resolve a round between two cards.
///
/// Pure: reads the cards' attack damage and current hp, mutates nothing.
/// A side wins when its card survives and the other does not; otherwise
/// the round is a tie.
///
/// ```
/// use tcg_battle::battle::{resolve_round, RoundOutcome};
/// use tcg_battle::cards::{Attack, BattleCard, Card};
/// use tcg_battle::core::BattleCardId;
///
/// let x = BattleCard::new(BattleCardId::new(1), Card::new("x", "X", 1, 60, Attack::new("a", 40)));
/// let y = BattleCard::new(BattleCardId::new(2), Card::new("y", "Y", 1, 50, Attack::new("b", 60)));
///
/// let result = resolve_round(&x, &y);
/// assert_eq!(result.first.hp_after, 0);
/// assert_eq!(result.second.hp_after, 10);
/// assert_eq!(result.outcome, RoundOutcome::Second);
/// ```
#[must_use]
pub fn resolve_round(first: &BattleCard, second: &BattleCard) -> RoundResult {
    let first_exchange = exchange(first, second.damage());
    let second_exchange = exchange(second, first.damage());

    let outcome = match (first_exchange.eliminated(), second_exchange.eliminated()) {
        (false, true) => RoundOutcome::First,
        (true, false) => RoundOutcome::Second,
        _ => RoundOutcome::Tie,
    };

    RoundResult {
        first: first_exchange,
        second: second_exchange,
        outcome,
    }
}

fn exchange(defender: &BattleCard, incoming: u32) -> Exchange {
    let damage_taken = incoming.min(defender.current_hp());
    Exchange {
        damage_taken,
        hp_after: defender.current_hp() - damage_taken,
    }
}
