//! Battle state machine.
//!
//! ```text
//!   open ──> Requested ──join──> Active ──submit──> Active
//!                                  │
//!                                  └─(roster wiped / round cap)──> Completed
//! ```
//!
//! Every transition validates the whole request against the current state
//! first and only then applies its `BattleUpdate`s. A rejected request
//! leaves the battle untouched.

use rustc_hash::FxHashSet;

use super::resolution::resolve_round;
use super::state::{Battle, BattleState, BattleUpdate, Round, RoundWinner};
use crate::cards::BattleCard;
use crate::core::config::EngineConfig;
use crate::core::entity::{BattleCardId, BattleId};
use crate::core::error::{EngineError, Result};
use crate::core::player::{PlayerId, Seat};

/// What a round submission did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Held until the other player submits for the same round.
    Pending { round: u32 },
    /// Both cards were in; the round resolved.
    Resolved {
        round: Round,
        /// Whether this round ended the battle.
        completed: bool,
    },
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, SubmitOutcome::Resolved { .. })
    }
}

impl Battle {
    /// Open a battle with player one's roster.
    ///
    /// The roster must be non-empty, with distinct ids and every card at
    /// full hp.
    pub fn open(id: BattleId, player_one: PlayerId, roster: Vec<BattleCard>) -> Result<Self> {
        check_roster(&roster, &[])?;
        Ok(Self::requested(id, player_one, roster))
    }

    /// Check that `player_two` may join, without looking at a roster.
    pub fn check_joinable(&self, player_two: &PlayerId) -> Result<()> {
        self.expect_state(BattleState::Requested, "join")?;
        if player_two == self.player_one() {
            return Err(EngineError::SelfBattle(player_two.clone()));
        }
        Ok(())
    }

    /// Player two joins with their roster: `Requested -> Active`.
    ///
    /// Roster ids must not repeat, within the roster or against player
    /// one's cards.
    pub fn join(&mut self, player_two: PlayerId, roster: Vec<BattleCard>) -> Result<()> {
        self.check_joinable(&player_two)?;
        check_roster(&roster, self.player_one_cards())?;

        tracing::debug!(
            battle = %self.id(),
            player = %player_two,
            cards = roster.len(),
            "joining battle"
        );
        self.apply(BattleUpdate::Join { player_two, roster });
        Ok(())
    }

    /// A player designates a card for round `round`.
    ///
    /// The first submission for a round is held; the second resolves it and
    /// may complete the battle. Submissions for a round that has already
    /// resolved are rejected as stale.
    pub fn submit(
        &mut self,
        player: &PlayerId,
        round: u32,
        card: BattleCardId,
        config: &EngineConfig,
    ) -> Result<SubmitOutcome> {
        self.expect_state(BattleState::Active, "submit to")?;
        let seat = self.seat_of(player).ok_or_else(|| EngineError::NotParticipant {
            battle: self.id(),
            player: player.clone(),
        })?;

        let current = self.current_round();
        if round < current {
            return Err(EngineError::StaleRound {
                requested: round,
                current,
            });
        }
        if round > current {
            return Err(EngineError::FutureRound {
                requested: round,
                current,
            });
        }

        if let Some(pending) = self.pending(seat) {
            if pending == card {
                return Ok(SubmitOutcome::Pending { round });
            }
            return Err(EngineError::AlreadySubmitted {
                player: player.clone(),
                pending,
                round,
            });
        }

        self.playable_card(player, card)?;

        let Some(other) = self.pending(seat.opponent()) else {
            tracing::debug!(battle = %self.id(), round, ?seat, card = %card, "holding submission");
            self.apply(BattleUpdate::Hold { seat, card });
            return Ok(SubmitOutcome::Pending { round });
        };

        let (player_one_card, player_two_card) = match seat {
            Seat::PlayerOne => (card, other),
            Seat::PlayerTwo => (other, card),
        };
        let round = self.resolve(player_one_card, player_two_card)?;
        let completed = self.complete_if_over(config);
        Ok(SubmitOutcome::Resolved { round, completed })
    }

    fn resolve(
        &mut self,
        player_one_card: BattleCardId,
        player_two_card: BattleCardId,
    ) -> Result<Round> {
        let (_, first) = self.battle_card(player_one_card)?;
        let (_, second) = self.battle_card(player_two_card)?;
        let result = resolve_round(first, second);

        let round = Round {
            index: self.current_round(),
            player_one_card,
            player_two_card,
            damage_to_player_one: result.first.damage_taken,
            damage_to_player_two: result.second.damage_taken,
            winner: RoundWinner::from(result.outcome),
        };

        tracing::debug!(
            battle = %self.id(),
            round = round.index,
            winner = ?round.winner,
            hp_one = result.first.hp_after,
            hp_two = result.second.hp_after,
            "round resolved"
        );
        self.apply(BattleUpdate::Resolve {
            round: round.clone(),
        });
        Ok(round)
    }

    /// Enter `Completed` if a roster is wiped out or the round cap is hit.
    fn complete_if_over(&mut self, config: &EngineConfig) -> bool {
        let one_out = self.is_wiped_out(Seat::PlayerOne);
        let two_out = self.is_wiped_out(Seat::PlayerTwo);

        let winner = match (one_out, two_out) {
            (true, true) => None,
            (true, false) => self.player(Seat::PlayerTwo).cloned(),
            (false, true) => Some(self.player_one().clone()),
            (false, false) if config.round_cap_reached(self.rounds().len()) => None,
            (false, false) => return false,
        };

        tracing::info!(
            battle = %self.id(),
            rounds = self.rounds().len(),
            winner = ?winner.as_ref().map(PlayerId::as_str),
            "battle completed"
        );
        self.apply(BattleUpdate::Complete { winner });
        true
    }

    fn expect_state(&self, expected: BattleState, action: &'static str) -> Result<()> {
        if self.state() != expected {
            return Err(EngineError::InvalidTransition {
                action,
                state: self.state(),
            });
        }
        Ok(())
    }
}

/// Validate a roster about to be committed next to `committed`.
fn check_roster(roster: &[BattleCard], committed: &[BattleCard]) -> Result<()> {
    if roster.is_empty() {
        return Err(EngineError::EmptyRoster);
    }
    let mut seen: FxHashSet<BattleCardId> = committed.iter().map(|card| card.id).collect();
    for card in roster {
        if !seen.insert(card.id) {
            return Err(EngineError::DuplicateBattleCard(card.id));
        }
        if card.current_hp() != card.max_hp() {
            return Err(EngineError::DamagedCard {
                card: card.id,
                current_hp: card.current_hp(),
                max_hp: card.max_hp(),
            });
        }
    }
    Ok(())
}
