//! Token generation for engine identifiers.
//!
//! ## Key Features
//!
//! - **Deterministic when seeded**: same seed, same token sequence (tests,
//!   replays)
//! - **Entropy-seeded by default**: production engines draw a fresh seed
//!   from the OS
//!
//! ```
//! use tcg_battle::core::IdGenerator;
//!
//! let mut a = IdGenerator::new(42);
//! let mut b = IdGenerator::new(42);
//! assert_eq!(a.battle_id(), b.battle_id());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::entity::{BattleCardId, BattleId};

/// ChaCha8-backed generator of opaque 128-bit tokens.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    inner: ChaCha8Rng,
    issued: u64,
}

impl IdGenerator {
    /// Create a deterministic generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            issued: 0,
        }
    }

    /// Create a generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
            issued: 0,
        }
    }

    /// Create from an optional seed, falling back to entropy.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }

    /// Draw the next raw token.
    pub fn next_token(&mut self) -> u128 {
        self.issued += 1;
        self.inner.gen::<u128>()
    }

    /// Generate a fresh battle ID.
    pub fn battle_id(&mut self) -> BattleId {
        BattleId::new(self.next_token())
    }

    /// Generate a fresh battle-card ID.
    pub fn battle_card_id(&mut self) -> BattleCardId {
        BattleCardId::new(self.next_token())
    }

    /// Number of tokens issued so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_determinism() {
        let mut gen1 = IdGenerator::new(42);
        let mut gen2 = IdGenerator::new(42);

        for _ in 0..100 {
            assert_eq!(gen1.next_token(), gen2.next_token());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut gen1 = IdGenerator::new(1);
        let mut gen2 = IdGenerator::new(2);
        assert_ne!(gen1.next_token(), gen2.next_token());
    }

    #[test]
    fn test_tokens_are_distinct() {
        let mut gen = IdGenerator::new(7);
        let tokens: HashSet<_> = (0..1000).map(|_| gen.battle_card_id()).collect();
        assert_eq!(tokens.len(), 1000);
        assert_eq!(gen.issued(), 1000);
    }

    #[test]
    fn test_seed_option() {
        let mut seeded = IdGenerator::from_seed_option(Some(9));
        let mut direct = IdGenerator::new(9);
        assert_eq!(seeded.battle_id(), direct.battle_id());

        let mut random = IdGenerator::from_seed_option(None);
        assert_eq!(random.issued(), 0);
        let _ = random.battle_id();
        assert_eq!(random.issued(), 1);
    }
}
