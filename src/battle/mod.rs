//! Battles: aggregate, roster lookup, round resolution, state machine.
//!
//! ## Lifecycle
//!
//! A battle opens as `Requested` with player one's roster, becomes `Active`
//! when an opponent joins, resolves a round each time both players have
//! submitted a card for it, and ends `Completed` when a roster is wiped out
//! or the configured round cap is reached.
//!
//! ## Key Types
//!
//! - `Battle`: The aggregate root
//! - `BattleUpdate`: The only ways a battle can change
//! - `Round`, `RoundWinner`: Resolved exchanges
//! - `SubmitOutcome`: Pending or resolved submission
//! - `resolve_round`: The simultaneous-damage rule

pub mod state;
pub mod roster;
pub mod resolution;
pub mod machine;

pub use state::{Battle, BattleResult, BattleState, BattleUpdate, Round, RoundWinner};
pub use roster::find_battle_card;
pub use resolution::{resolve_round, Exchange, RoundOutcome, RoundResult};
pub use machine::SubmitOutcome;
