//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Catalog category that marks a card as battle-eligible by default.
pub const DEFAULT_CREATURE_CATEGORY: &str = "Pokémon";

/// Battle engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum resolved rounds before a battle is forced to end (0 = unlimited).
    /// A battle that hits the cap with both sides alive is a draw.
    pub max_rounds: u32,

    /// Catalog category a raw record must carry to be battle-eligible.
    pub creature_category: String,

    /// Seed for identifier generation.
    /// `None` seeds from OS entropy; `Some` gives reproducible IDs.
    pub id_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rounds: 100,
            creature_category: DEFAULT_CREATURE_CATEGORY.to_string(),
            id_seed: None,
        }
    }
}

impl EngineConfig {
    /// Set the round cap.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set the creature category.
    #[must_use]
    pub fn with_creature_category(mut self, category: impl Into<String>) -> Self {
        self.creature_category = category.into();
        self
    }

    /// Set a deterministic identifier seed.
    #[must_use]
    pub fn with_id_seed(mut self, seed: u64) -> Self {
        self.id_seed = Some(seed);
        self
    }

    /// Whether `resolved` rounds exhausts the cap.
    #[must_use]
    pub fn round_cap_reached(&self, resolved: usize) -> bool {
        self.max_rounds != 0 && resolved >= self.max_rounds as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_rounds, 100);
        assert_eq!(config.creature_category, "Pokémon");
        assert_eq!(config.id_seed, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_max_rounds(3)
            .with_creature_category("Creature")
            .with_id_seed(123);

        assert_eq!(config.max_rounds, 3);
        assert_eq!(config.creature_category, "Creature");
        assert_eq!(config.id_seed, Some(123));
    }

    #[test]
    fn test_round_cap() {
        let capped = EngineConfig::default().with_max_rounds(2);
        assert!(!capped.round_cap_reached(1));
        assert!(capped.round_cap_reached(2));

        let unlimited = EngineConfig::default().with_max_rounds(0);
        assert!(!unlimited.round_cap_reached(1_000_000));
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default().with_id_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
