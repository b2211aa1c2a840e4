//! Card normalizer: raw catalog records to battle-ready cards.
//!
//! Catalogs contain plenty of records that can never fight (trainers,
//! energies, creatures whose attacks have no printed damage). Those are
//! *ineligible* and silently dropped. A record that is eligible but carries
//! broken stats is a *data error* and is reported.
//!
//! | Record | Result |
//! |--------|--------|
//! | wrong category | `Ok(None)` |
//! | no attack with non-blank damage | `Ok(None)` |
//! | missing / non-numeric level, hp, damage | `Err(NormalizeError)` |
//! | otherwise | `Ok(Some(card))` |

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::definition::{Attack, Card, CardId, CardImages};
use crate::core::config::DEFAULT_CREATURE_CATEGORY;

/// Catalog value that may arrive as a JSON number or as text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(i64),
    Text(String),
}

impl RawValue {
    fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(text) if text.trim().is_empty())
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n)
    }
}

/// One attack entry as it appears in the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttack {
    #[serde(default)]
    pub name: String,

    /// Printed damage, possibly with a modifier such as `"30+"` or `"20×"`.
    #[serde(default)]
    pub damage: Option<RawValue>,
}

impl RawAttack {
    #[must_use]
    pub fn new(name: impl Into<String>, damage: impl Into<RawValue>) -> Self {
        Self {
            name: name.into(),
            damage: Some(damage.into()),
        }
    }

    /// An attack qualifies when its damage is present and non-blank.
    #[must_use]
    pub fn has_damage(&self) -> bool {
        self.damage.as_ref().is_some_and(|d| !d.is_blank())
    }
}

/// A catalog record before normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCard {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Card category. Feeds call this `supertype` or `category`.
    #[serde(default, alias = "category")]
    pub supertype: Option<String>,

    #[serde(default)]
    pub level: Option<RawValue>,

    #[serde(default)]
    pub hp: Option<RawValue>,

    #[serde(default)]
    pub attacks: SmallVec<[RawAttack; 4]>,

    #[serde(default)]
    pub rarity: Option<String>,

    #[serde(default)]
    pub images: CardImages,
}

/// Data error in an otherwise eligible record.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("card {card}: missing {field}")]
    Missing { card: String, field: &'static str },

    #[error("card {card}: {field} `{value}` is not a non-negative integer")]
    NotNumeric {
        card: String,
        field: &'static str,
        value: String,
    },

    #[error("card {card}: hp must be positive")]
    ZeroHp { card: String },
}

/// Projects raw records onto canonical `Card`s.
///
/// Holds no state between calls besides the configured creature category.
///
/// ```
/// use tcg_battle::cards::{CardNormalizer, RawAttack, RawCard};
///
/// let raw = RawCard {
///     id: "base1-58".into(),
///     name: "Pikachu".into(),
///     supertype: Some("Pokémon".into()),
///     level: Some("12".into()),
///     hp: Some("40".into()),
///     attacks: vec![RawAttack::new("Gnaw", "10"), RawAttack::new("Thunder Jolt", "30")].into(),
///     ..Default::default()
/// };
///
/// let card = CardNormalizer::default().normalize(&raw).unwrap().unwrap();
/// assert_eq!(card.attack.name, "Gnaw");
/// assert_eq!(card.attack.damage, 10);
/// ```
#[derive(Clone, Debug)]
pub struct CardNormalizer {
    creature_category: String,
}

impl Default for CardNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_CREATURE_CATEGORY)
    }
}

impl CardNormalizer {
    /// Create a normalizer that accepts the given category.
    #[must_use]
    pub fn new(creature_category: impl Into<String>) -> Self {
        Self {
            creature_category: creature_category.into(),
        }
    }

    /// The category this normalizer accepts.
    #[must_use]
    pub fn creature_category(&self) -> &str {
        &self.creature_category
    }

    /// Check eligibility without parsing stats.
    #[must_use]
    pub fn is_eligible(&self, raw: &RawCard) -> bool {
        self.is_creature(raw) && raw.attacks.iter().any(RawAttack::has_damage)
    }

    /// Normalize a raw record.
    ///
    /// Returns `Ok(None)` for ineligible records.
    pub fn normalize(&self, raw: &RawCard) -> Result<Option<Card>, NormalizeError> {
        if !self.is_creature(raw) {
            return Ok(None);
        }
        let Some(attack) = raw.attacks.iter().find(|a| a.has_damage()) else {
            return Ok(None);
        };

        let damage = parse_stat(&raw.id, "damage", attack.damage.as_ref())?;
        let level = parse_stat(&raw.id, "level", raw.level.as_ref())?;
        let hp = parse_stat(&raw.id, "hp", raw.hp.as_ref())?;
        if hp == 0 {
            return Err(NormalizeError::ZeroHp {
                card: raw.id.clone(),
            });
        }

        Ok(Some(Card {
            id: CardId::new(raw.id.clone()),
            name: raw.name.clone(),
            level,
            hp,
            attack: Attack::new(attack.name.clone(), damage),
            rarity: raw.rarity.clone(),
            images: raw.images.clone(),
        }))
    }

    fn is_creature(&self, raw: &RawCard) -> bool {
        raw.supertype
            .as_deref()
            .is_some_and(|category| category.trim() == self.creature_category)
    }
}

/// Parse a stat into a non-negative integer.
///
/// Text may carry a trailing damage modifier (`+`, `-`, `×`, `x`), which is
/// stripped.
fn parse_stat(
    card: &str,
    field: &'static str,
    value: Option<&RawValue>,
) -> Result<u32, NormalizeError> {
    let not_numeric = |value: String| NormalizeError::NotNumeric {
        card: card.to_string(),
        field,
        value,
    };

    match value {
        None => Err(NormalizeError::Missing {
            card: card.to_string(),
            field,
        }),
        Some(RawValue::Text(text)) if text.trim().is_empty() => Err(NormalizeError::Missing {
            card: card.to_string(),
            field,
        }),
        Some(RawValue::Number(n)) => u32::try_from(*n).map_err(|_| not_numeric(n.to_string())),
        Some(RawValue::Text(text)) => {
            let digits = text
                .trim()
                .trim_end_matches(|c| matches!(c, '+' | '-' | '×' | 'x' | 'X'))
                .trim_end();
            digits
                .parse::<u32>()
                .map_err(|_| not_numeric(text.clone()))
        }
    }
}
