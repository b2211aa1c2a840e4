//! Card catalog: batch ingestion and lookup.
//!
//! The `CardCatalog` holds every battle-eligible card. Raw records go
//! through the `CardNormalizer`; one bad record never aborts the batch, it
//! just shows up in the `IngestReport`.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::definition::{Card, CardId};
use super::normalizer::{CardNormalizer, NormalizeError, RawCard};
use crate::core::error::{EngineError, Result};

/// Why a single record was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RecordErrorKind {
    #[error(transparent)]
    Invalid(#[from] NormalizeError),

    #[error("record could not be decoded: {0}")]
    Malformed(String),

    #[error("card id already present in the catalog")]
    Duplicate,
}

/// A per-record ingestion failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordError {
    /// Position of the record in the batch.
    pub position: usize,
    /// Record id, if it could be read.
    pub card_id: Option<String>,
    pub error: RecordErrorKind,
}

/// Outcome of ingesting one batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Cards added to the catalog.
    pub accepted: Vec<CardId>,
    /// Ineligible records (trainers, energies, damage-less creatures).
    pub skipped: usize,
    /// Records that were eligible but broken, or not decodable at all.
    pub errors: Vec<RecordError>,
}

impl IngestReport {
    /// Total records seen.
    #[must_use]
    pub fn total(&self) -> usize {
        self.accepted.len() + self.skipped + self.errors.len()
    }

    /// True when no record failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// In-memory catalog of normalized cards.
///
/// ## Example
///
/// ```
/// use tcg_battle::cards::{CardCatalog, CardId, RawAttack, RawCard};
///
/// let mut catalog = CardCatalog::new();
/// let report = catalog.ingest(vec![
///     RawCard {
///         id: "base1-7".into(),
///         name: "Hitmonchan".into(),
///         supertype: Some("Pokémon".into()),
///         level: Some("33".into()),
///         hp: Some("70".into()),
///         attacks: vec![RawAttack::new("Jab", "20")].into(),
///         ..Default::default()
///     },
///     RawCard {
///         id: "base1-91".into(),
///         name: "Bill".into(),
///         supertype: Some("Trainer".into()),
///         ..Default::default()
///     },
/// ]);
///
/// assert_eq!(report.accepted, vec![CardId::new("base1-7")]);
/// assert_eq!(report.skipped, 1);
/// assert_eq!(catalog.get(&CardId::new("base1-7")).unwrap().hp, 70);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    normalizer: CardNormalizer,
    cards: FxHashMap<CardId, Card>,
}

impl CardCatalog {
    /// Create an empty catalog using the default creature category.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty catalog with a specific normalizer.
    #[must_use]
    pub fn with_normalizer(normalizer: CardNormalizer) -> Self {
        Self {
            normalizer,
            cards: FxHashMap::default(),
        }
    }

    /// Insert an already-normalized card.
    ///
    /// Returns `false` (and leaves the catalog unchanged) if the id exists.
    pub fn insert(&mut self, card: Card) -> bool {
        if self.cards.contains_key(&card.id) {
            return false;
        }
        self.cards.insert(card.id.clone(), card);
        true
    }

    /// Normalize and store a batch of raw records.
    pub fn ingest(&mut self, records: impl IntoIterator<Item = RawCard>) -> IngestReport {
        let mut report = IngestReport::default();
        for (position, raw) in records.into_iter().enumerate() {
            self.ingest_one(position, &raw, &mut report);
        }
        self.log_report(&report);
        report
    }

    /// Ingest a JSON array of raw records.
    ///
    /// Each element is decoded on its own, so a malformed element is
    /// reported and the rest of the batch still loads. A document that is
    /// not a JSON array fails as a whole.
    pub fn ingest_json(&mut self, json: &str) -> Result<IngestReport> {
        let elements: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|e| EngineError::MalformedBatch(e.to_string()))?;

        let mut report = IngestReport::default();
        for (position, element) in elements.into_iter().enumerate() {
            let card_id = element
                .get("id")
                .and_then(|id| id.as_str())
                .map(str::to_string);
            match serde_json::from_value::<RawCard>(element) {
                Ok(raw) => self.ingest_one(position, &raw, &mut report),
                Err(e) => {
                    tracing::warn!(position, ?card_id, "undecodable catalog record: {}", e);
                    report.errors.push(RecordError {
                        position,
                        card_id,
                        error: RecordErrorKind::Malformed(e.to_string()),
                    });
                }
            }
        }
        self.log_report(&report);
        Ok(report)
    }

    fn ingest_one(&mut self, position: usize, raw: &RawCard, report: &mut IngestReport) {
        let rejected = |error: RecordErrorKind| RecordError {
            position,
            card_id: Some(raw.id.clone()),
            error,
        };

        match self.normalizer.normalize(raw) {
            Ok(Some(card)) => {
                let id = card.id.clone();
                if self.insert(card) {
                    report.accepted.push(id);
                } else {
                    tracing::warn!(position, card = %id, "duplicate catalog card");
                    report.errors.push(rejected(RecordErrorKind::Duplicate));
                }
            }
            Ok(None) => report.skipped += 1,
            Err(e) => {
                tracing::warn!(position, "rejected catalog record: {}", e);
                report.errors.push(rejected(e.into()));
            }
        }
    }

    fn log_report(&self, report: &IngestReport) {
        tracing::info!(
            accepted = report.accepted.len(),
            skipped = report.skipped,
            errors = report.errors.len(),
            catalog_size = self.cards.len(),
            "catalog batch ingested"
        );
    }

    #[must_use]
    pub fn normalizer(&self) -> &CardNormalizer {
        &self.normalizer
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Get several cards, all or nothing.
    ///
    /// Order and duplicates follow `ids`. Fails on the first unknown id.
    pub fn get_many(&self, ids: &[CardId]) -> Result<Vec<Card>> {
        ids.iter()
            .map(|id| {
                self.cards
                    .get(id)
                    .cloned()
                    .ok_or_else(|| EngineError::CardNotFound(id.clone()))
            })
            .collect()
    }

    /// Check if a card ID is present.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Attack, RawAttack};
    use crate::core::ErrorKind;

    fn creature(id: &str, hp: &str) -> RawCard {
        RawCard {
            id: id.to_string(),
            name: id.to_uppercase(),
            supertype: Some("Pokémon".to_string()),
            level: Some("10".into()),
            hp: Some(hp.into()),
            attacks: vec![RawAttack::new("Hit", "10")].into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_bad_record_does_not_abort_batch() {
        let mut catalog = CardCatalog::new();
        let report = catalog.ingest(vec![
            creature("a", "50"),
            creature("b", "many"),
            creature("c", "60"),
        ]);

        assert_eq!(report.accepted, vec![CardId::new("a"), CardId::new("c")]);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].position, 1);
        assert_eq!(report.errors[0].card_id.as_deref(), Some("b"));
        assert_eq!(report.total(), 3);
        assert!(!report.is_clean());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_duplicates_are_reported() {
        let mut catalog = CardCatalog::new();
        catalog.ingest(vec![creature("a", "50")]);
        let report = catalog.ingest(vec![creature("a", "90")]);

        assert_eq!(report.errors[0].error, RecordErrorKind::Duplicate);
        assert_eq!(catalog.get(&CardId::new("a")).unwrap().hp, 50);
    }

    #[test]
    fn test_ingest_json() {
        let mut catalog = CardCatalog::new();
        let report = catalog
            .ingest_json(
                r#"[
                    {"id": "a", "supertype": "Pokémon", "level": "5", "hp": "30",
                     "attacks": [{"name": "Peck", "damage": "10"}]},
                    {"id": "b", "supertype": "Energy"},
                    {"id": "c", "attacks": "not a list"},
                    42
                ]"#,
            )
            .unwrap();

        assert_eq!(report.accepted, vec![CardId::new("a")]);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].card_id.as_deref(), Some("c"));
        assert_eq!(report.errors[1].card_id, None);
        assert!(matches!(
            report.errors[1].error,
            RecordErrorKind::Malformed(_)
        ));
    }

    #[test]
    fn test_ingest_json_rejects_non_array() {
        let mut catalog = CardCatalog::new();
        let err = catalog.ingest_json(r#"{"id": "a"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_get_many() {
        let mut catalog = CardCatalog::new();
        catalog.insert(Card::new("a", "A", 1, 10, Attack::new("x", 1)));
        catalog.insert(Card::new("b", "B", 1, 20, Attack::new("y", 2)));

        let cards = catalog
            .get_many(&[CardId::new("b"), CardId::new("a"), CardId::new("b")])
            .unwrap();
        let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "B"]);

        let err = catalog
            .get_many(&[CardId::new("a"), CardId::new("zzz")])
            .unwrap_err();
        assert!(matches!(err, EngineError::CardNotFound(id) if id == CardId::new("zzz")));
    }

    #[test]
    fn test_custom_normalizer() {
        let mut catalog = CardCatalog::with_normalizer(CardNormalizer::new("Creature"));
        let report = catalog.ingest(vec![creature("a", "50")]);
        assert_eq!(report.skipped, 1);
        assert!(catalog.is_empty());
    }
}
