//! Battle aggregate: lifecycle state, rosters, round history.
//!
//! ## Battle
//!
//! The aggregate root. Every change goes through a `BattleUpdate`, and only
//! the state machine (`machine.rs`) builds those after validating the
//! request, so a battle can never be observed half-joined or with a round
//! appended but hp not applied.
//!
//! ## Round history
//!
//! `rounds` is an `im::Vector`: append-only here, and cloning a battle for
//! an optimistic read-modify-write shares the history instead of copying it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::resolution::RoundOutcome;
use crate::cards::BattleCard;
use crate::core::entity::{BattleCardId, BattleId};
use crate::core::player::{PlayerId, Seat, SeatMap};

/// Lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleState {
    /// Player one's roster is fixed; waiting for an opponent.
    Requested,
    /// Both rosters fixed; rounds may be submitted.
    Active,
    /// Terminal.
    Completed,
}

impl BattleState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == BattleState::Completed
    }
}

/// Who took a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundWinner {
    PlayerOne,
    PlayerTwo,
    Tie,
}

impl From<RoundOutcome> for RoundWinner {
    /// Player one's card is always the first argument to `resolve_round`.
    fn from(outcome: RoundOutcome) -> Self {
        match outcome {
            RoundOutcome::First => RoundWinner::PlayerOne,
            RoundOutcome::Second => RoundWinner::PlayerTwo,
            RoundOutcome::Tie => RoundWinner::Tie,
        }
    }
}

/// One resolved exchange.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Round {
    /// Position in the battle's round history (0-based).
    pub index: u32,

    pub player_one_card: BattleCardId,
    pub player_two_card: BattleCardId,

    /// Hp actually removed from player one's card.
    pub damage_to_player_one: u32,

    /// Hp actually removed from player two's card.
    pub damage_to_player_two: u32,

    pub winner: RoundWinner,
}

impl Round {
    /// The card a seat played this round.
    #[must_use]
    pub fn card(&self, seat: Seat) -> BattleCardId {
        match seat {
            Seat::PlayerOne => self.player_one_card,
            Seat::PlayerTwo => self.player_two_card,
        }
    }

    /// Damage a seat's card received this round.
    #[must_use]
    pub fn damage_to(&self, seat: Seat) -> u32 {
        match seat {
            Seat::PlayerOne => self.damage_to_player_one,
            Seat::PlayerTwo => self.damage_to_player_two,
        }
    }
}

/// Final outcome of a completed battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleResult {
    Winner(PlayerId),
    Draw,
}

impl BattleResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        matches!(self, BattleResult::Winner(p) if p == player)
    }
}

/// A validated change to a battle.
///
/// Each variant names exactly the fields one transition may touch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleUpdate {
    /// Opponent joins: sets player two and their roster, activates.
    Join {
        player_two: PlayerId,
        roster: Vec<BattleCard>,
    },
    /// One seat's card is held until the other seat submits.
    Hold { seat: Seat, card: BattleCardId },
    /// Appends the round and applies the two hp decrements it records.
    Resolve { round: Round },
    /// Enters the terminal state. `None` is a draw.
    Complete { winner: Option<PlayerId> },
}

/// The battle aggregate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    id: BattleId,
    player_one: PlayerId,
    player_two: Option<PlayerId>,
    state: BattleState,
    player_one_cards: Vec<BattleCard>,
    player_two_cards: Vec<BattleCard>,
    rounds: Vector<Round>,
    pending: SeatMap<Option<BattleCardId>>,
    winner: Option<PlayerId>,
    revision: u64,
}

impl Battle {
    /// Build a requested battle. Validation lives in `Battle::open`.
    pub(crate) fn requested(id: BattleId, player_one: PlayerId, roster: Vec<BattleCard>) -> Self {
        Self {
            id,
            player_one,
            player_two: None,
            state: BattleState::Requested,
            player_one_cards: roster,
            player_two_cards: Vec::new(),
            rounds: Vector::new(),
            pending: SeatMap::default(),
            winner: None,
            revision: 0,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> BattleId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> BattleState {
        self.state
    }

    #[must_use]
    pub fn player_one(&self) -> &PlayerId {
        &self.player_one
    }

    #[must_use]
    pub fn player_two(&self) -> Option<&PlayerId> {
        self.player_two.as_ref()
    }

    /// The player sitting in a seat, if anyone is.
    #[must_use]
    pub fn player(&self, seat: Seat) -> Option<&PlayerId> {
        match seat {
            Seat::PlayerOne => Some(&self.player_one),
            Seat::PlayerTwo => self.player_two.as_ref(),
        }
    }

    /// The seat a player occupies, if they are a participant.
    #[must_use]
    pub fn seat_of(&self, player: &PlayerId) -> Option<Seat> {
        Seat::both().find(|&seat| self.player(seat) == Some(player))
    }

    /// Whether a player is one of the two participants.
    #[must_use]
    pub fn involves(&self, player: &PlayerId) -> bool {
        self.seat_of(player).is_some()
    }

    #[must_use]
    pub fn player_one_cards(&self) -> &[BattleCard] {
        &self.player_one_cards
    }

    #[must_use]
    pub fn player_two_cards(&self) -> &[BattleCard] {
        &self.player_two_cards
    }

    /// A seat's committed roster (empty for player two until they join).
    #[must_use]
    pub fn roster(&self, seat: Seat) -> &[BattleCard] {
        match seat {
            Seat::PlayerOne => &self.player_one_cards,
            Seat::PlayerTwo => &self.player_two_cards,
        }
    }

    pub(crate) fn roster_mut(&mut self, seat: Seat) -> &mut [BattleCard] {
        match seat {
            Seat::PlayerOne => &mut self.player_one_cards,
            Seat::PlayerTwo => &mut self.player_two_cards,
        }
    }

    /// True once every card in a committed roster is eliminated.
    #[must_use]
    pub fn is_wiped_out(&self, seat: Seat) -> bool {
        let roster = self.roster(seat);
        !roster.is_empty() && roster.iter().all(BattleCard::is_eliminated)
    }

    #[must_use]
    pub fn rounds(&self) -> &Vector<Round> {
        &self.rounds
    }

    /// Index of the round currently open for submissions.
    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.rounds.len() as u32
    }

    /// Card a seat has submitted for the current round, if any.
    #[must_use]
    pub fn pending(&self, seat: Seat) -> Option<BattleCardId> {
        self.pending[seat]
    }

    #[must_use]
    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }

    /// Outcome, once completed.
    #[must_use]
    pub fn result(&self) -> Option<BattleResult> {
        if !self.state.is_terminal() {
            return None;
        }
        Some(match &self.winner {
            Some(player) => BattleResult::Winner(player.clone()),
            None => BattleResult::Draw,
        })
    }

    // === Revision ===

    /// Optimistic-concurrency revision of the stored copy this was read from.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Advance the revision ahead of a conditional save.
    ///
    /// Returns the revision the save must expect to find.
    pub fn bump_revision(&mut self) -> u64 {
        let expected = self.revision;
        self.revision += 1;
        expected
    }

    // === Updates ===

    /// Apply a validated update.
    pub(crate) fn apply(&mut self, update: BattleUpdate) {
        match update {
            BattleUpdate::Join { player_two, roster } => {
                self.player_two = Some(player_two);
                self.player_two_cards = roster;
                self.state = BattleState::Active;
            }
            BattleUpdate::Hold { seat, card } => {
                self.pending[seat] = Some(card);
            }
            BattleUpdate::Resolve { round } => {
                for seat in Seat::both() {
                    let card_id = round.card(seat);
                    if let Some(card) = self
                        .roster_mut(seat)
                        .iter_mut()
                        .find(|card| card.id == card_id)
                    {
                        card.take_damage(round.damage_to(seat));
                    }
                }
                self.rounds.push_back(round);
                self.pending = SeatMap::default();
            }
            BattleUpdate::Complete { winner } => {
                self.state = BattleState::Completed;
                self.winner = winner;
            }
        }
    }
}
