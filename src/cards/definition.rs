//! Card definitions - normalized catalog data.
//!
//! A `Card` is the canonical, battle-ready projection of a catalog record:
//! one attack, integer stats. It never changes once built. Battle-scoped
//! state (remaining hp) lives on `BattleCard`.

use serde::{Deserialize, Serialize};

/// Catalog identifier for a card.
///
/// Opaque to the engine; assigned by whatever produced the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The single attack a card fights with.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    pub damage: u32,
}

impl Attack {
    #[must_use]
    pub fn new(name: impl Into<String>, damage: u32) -> Self {
        Self {
            name: name.into(),
            damage,
        }
    }
}

/// Artwork references. Carried through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardImages {
    pub small: Option<String>,
    pub large: Option<String>,
}

/// Normalized, battle-eligible card.
///
/// ## Example
///
/// ```
/// use tcg_battle::cards::{Attack, Card};
///
/// let card = Card::new("base1-4", "Charizard", 76, 120, Attack::new("Fire Spin", 100))
///     .with_rarity("Rare Holo");
///
/// assert_eq!(card.attack.damage, 100);
/// assert_eq!(card.rarity.as_deref(), Some("Rare Holo"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Catalog identifier.
    pub id: CardId,

    /// Card name (for display).
    pub name: String,

    /// Printed level.
    pub level: u32,

    /// Printed hit points. Always positive.
    pub hp: u32,

    /// Canonical attack.
    pub attack: Attack,

    /// Rarity label, if the catalog had one.
    pub rarity: Option<String>,

    /// Artwork references.
    pub images: CardImages,
}

impl Card {
    /// Create a card with no rarity or artwork.
    #[must_use]
    pub fn new(
        id: impl Into<CardId>,
        name: impl Into<String>,
        level: u32,
        hp: u32,
        attack: Attack,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            hp,
            attack,
            rarity: None,
            images: CardImages::default(),
        }
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    /// Set the artwork references (builder pattern).
    #[must_use]
    pub fn with_images(mut self, images: CardImages) -> Self {
        self.images = images;
        self
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
