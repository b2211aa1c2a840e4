//! # tcg-battle
//!
//! A two-player battle engine for trading card game catalogs.
//!
//! ## Design Principles
//!
//! 1. **Validate, Then Apply**: Every transition checks the whole request
//!    against the current state before changing anything. A rejected
//!    request leaves the battle exactly as it was.
//!
//! 2. **Optimistic Concurrency**: Battles carry a revision. Writes are
//!    conditional on the revision that was read, and losers of a race get a
//!    `Conflict` error instead of a silently merged state.
//!
//! 3. **Per-Record Ingestion**: One malformed card never aborts a catalog
//!    batch. Problems are reported per record.
//!
//! ## Architecture
//!
//! - **Simultaneous Rounds**: Both players' cards deal damage computed from
//!   the state before the round. Damage is clamped at zero hp.
//!
//! - **Persistent Data Structures**: Round history uses `im-rs` so copying a
//!   battle for a transition is cheap.
//!
//! ## Modules
//!
//! - `core`: IDs, seats, ID generation, configuration, errors
//! - `cards`: Card definitions, battle cards, normalizer, catalog
//! - `battle`: Battle aggregate, roster lookup, round resolution, state machine
//! - `store`: Persistence ports and the in-memory store
//! - `engine`: The operations callers invoke

pub mod core;
pub mod cards;
pub mod battle;
pub mod store;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    BattleCardId, BattleId, PlayerId, Seat, SeatMap,
    IdGenerator, EngineConfig,
    EngineError, ErrorKind, Result,
};

pub use crate::cards::{
    Attack, Card, CardId, CardImages, BattleCard,
    CardNormalizer, NormalizeError, RawAttack, RawCard, RawValue,
    CardCatalog, IngestReport, RecordError, RecordErrorKind,
};

pub use crate::battle::{
    Battle, BattleResult, BattleState, Round, RoundWinner,
    SubmitOutcome, resolve_round,
};

pub use crate::store::{BattleStore, CardSource, InMemoryBattleStore, StoreError};

pub use crate::engine::BattleEngine;
