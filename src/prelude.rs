//! Commonly used types and utilities for ease of import.

pub use crate::{AttackOutcome, Cell, Match, MatchError, Phase, PlayerView, Ship, Side};

#[cfg(feature = "std")]
pub use crate::{wait_for_turn, GameId, MatchService, PlayerId, Registry, RegistryError, Turn};
