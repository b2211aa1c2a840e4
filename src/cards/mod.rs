//! Card system: definitions, battle instances, normalization, catalog.
//!
//! ## Key Types
//!
//! - `Card`: Immutable, normalized card with exactly one attack
//! - `BattleCard`: A card copy committed to one battle, with remaining hp
//! - `CardNormalizer`: Raw catalog record to `Card`, or ineligible
//! - `CardCatalog`: Batch ingestion and lookup

pub mod definition;
pub mod instance;
pub mod normalizer;
pub mod catalog;

pub use definition::{Attack, Card, CardId, CardImages};
pub use instance::BattleCard;
pub use normalizer::{CardNormalizer, NormalizeError, RawAttack, RawCard, RawValue};
pub use catalog::{CardCatalog, IngestReport, RecordError, RecordErrorKind};
