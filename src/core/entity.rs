//! Engine-generated identifiers.
//!
//! Battles and the cards committed to them are addressed by opaque 128-bit
//! tokens. They carry no meaning beyond identity and are compared by value,
//! so the engine never depends on a storage layer's native key type.
//!
//! ## Text Form
//!
//! Tokens render as 32 lowercase hex digits and parse back from the same form:
//!
//! ```
//! use tcg_battle::core::BattleCardId;
//!
//! let id = BattleCardId::new(0xabc);
//! let text = id.to_string();
//! assert_eq!(text, "00000000000000000000000000000abc");
//! assert_eq!(text.parse::<BattleCardId>().unwrap(), id);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of the hex text form of a token.
const TOKEN_HEX_LEN: usize = 32;

/// Error returned when parsing a token from text fails.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid identifier `{0}`: expected 32 hex digits")]
pub struct ParseIdError(pub String);

fn parse_token(s: &str) -> Result<u128, ParseIdError> {
    if s.len() != TOKEN_HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseIdError(s.to_string()));
    }
    u128::from_str_radix(s, 16).map_err(|_| ParseIdError(s.to_string()))
}

/// Unique identifier for a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BattleId(pub u128);

impl BattleId {
    /// Create a battle ID from a raw token.
    #[must_use]
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Get the raw token value.
    #[must_use]
    pub const fn raw(self) -> u128 {
        self.0
    }
}

impl std::fmt::Display for BattleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl FromStr for BattleId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token(s).map(Self)
    }
}

/// Identifier of one card instance committed to a battle.
///
/// Unique within a battle: the same catalog card committed twice gets two
/// distinct `BattleCardId`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BattleCardId(pub u128);

impl BattleCardId {
    /// Create a battle-card ID from a raw token.
    #[must_use]
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Get the raw token value.
    #[must_use]
    pub const fn raw(self) -> u128 {
        self.0
    }
}

impl std::fmt::Display for BattleCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl FromStr for BattleCardId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token(s).map(Self)
    }
}
