//! Engine error taxonomy.
//!
//! Every failure the engine reports maps onto one of a small set of
//! [`ErrorKind`]s so the API collaborator can render it without matching on
//! individual variants.

use thiserror::Error;

use super::entity::{BattleCardId, BattleId};
use super::player::PlayerId;
use crate::battle::BattleState;
use crate::cards::CardId;
use crate::store::StoreError;

/// Coarse classification of an [`EngineError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or ineligible input.
    Validation,
    /// Operation not legal in the battle's current state.
    InvalidTransition,
    /// A concurrent writer won the race; the caller may retry.
    Conflict,
    /// A battle, card, or battle-card reference does not resolve.
    NotFound,
    /// Infrastructure failure in the persistence layer.
    Storage,
}

/// Errors surfaced by battle engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    // === Validation ===
    /// A roster was committed without any cards.
    #[error("roster must contain at least one card")]
    EmptyRoster,

    /// Player one tried to join their own battle.
    #[error("player {0} cannot battle against themselves")]
    SelfBattle(PlayerId),

    /// The acting player holds neither seat.
    #[error("player {player} is not a participant in battle {battle}")]
    NotParticipant { battle: BattleId, player: PlayerId },

    /// The card sits in the other seat's roster.
    #[error("battle card {card} does not belong to player {player}")]
    ForeignCard { card: BattleCardId, player: PlayerId },

    /// The card is at zero hp.
    #[error("battle card {0} has been eliminated")]
    CardEliminated(BattleCardId),

    /// A committed roster reuses a battle-card id already in the battle.
    #[error("battle card {0} appears more than once in the battle")]
    DuplicateBattleCard(BattleCardId),

    /// A committed card is not at full hp.
    #[error("battle card {card} must enter at full hp ({current_hp}/{max_hp})")]
    DamagedCard {
        card: BattleCardId,
        current_hp: u32,
        max_hp: u32,
    },

    /// Submission for a round after the current one.
    #[error("round {requested} is not open yet (current round is {current})")]
    FutureRound { requested: u32, current: u32 },

    /// A different card is already held for this player and round.
    #[error("player {player} already submitted {pending} for round {round}")]
    AlreadySubmitted {
        player: PlayerId,
        pending: BattleCardId,
        round: u32,
    },

    /// A catalog document that is not a JSON array of records.
    #[error("catalog batch is malformed: {0}")]
    MalformedBatch(String),

    // === Invalid transitions ===
    /// The operation is not legal in the battle's current state.
    #[error("cannot {action} a battle in state {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: BattleState,
    },

    /// Submission for a round that has already resolved.
    #[error("round {requested} has already been resolved (current round is {current})")]
    StaleRound { requested: u32, current: u32 },

    // === Conflicts ===
    /// Another writer saved the battle since it was read.
    #[error("battle {battle} changed concurrently: expected revision {expected}, found {actual}")]
    Conflict {
        battle: BattleId,
        expected: u64,
        actual: u64,
    },

    // === Not found ===
    /// No stored battle has this id.
    #[error("battle {0} not found")]
    BattleNotFound(BattleId),

    /// The catalog has no card with this id.
    #[error("card {0} not found")]
    CardNotFound(CardId),

    /// Neither roster holds this battle-card id.
    #[error("battle card {card} not found in battle {battle}")]
    BattleCardNotFound { battle: BattleId, card: BattleCardId },

    // === Storage ===
    /// Infrastructure failure other than a revision conflict.
    #[error("storage failure: {0}")]
    Store(StoreError),
}

impl EngineError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::EmptyRoster
            | EngineError::SelfBattle(_)
            | EngineError::NotParticipant { .. }
            | EngineError::ForeignCard { .. }
            | EngineError::CardEliminated(_)
            | EngineError::DuplicateBattleCard(_)
            | EngineError::DamagedCard { .. }
            | EngineError::FutureRound { .. }
            | EngineError::AlreadySubmitted { .. }
            | EngineError::MalformedBatch(_) => ErrorKind::Validation,
            EngineError::InvalidTransition { .. } | EngineError::StaleRound { .. } => {
                ErrorKind::InvalidTransition
            }
            EngineError::Conflict { .. } => ErrorKind::Conflict,
            EngineError::BattleNotFound(_)
            | EngineError::CardNotFound(_)
            | EngineError::BattleCardNotFound { .. } => ErrorKind::NotFound,
            EngineError::Store(_) => ErrorKind::Storage,
        }
    }

    /// Whether reissuing the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict {
                battle,
                expected,
                actual,
            } => EngineError::Conflict {
                battle,
                expected,
                actual,
            },
            StoreError::Missing(battle) => EngineError::BattleNotFound(battle),
            other => EngineError::Store(other),
        }
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
