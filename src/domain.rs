//! Values handed across the engine boundary and their JSON shapes.

use alloc::vec::Vec;

use crate::common::{Phase, Side};
use crate::config::GridRows;
use crate::ship::{Cell, Ship};

/// Result of an accepted attack.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct AttackOutcome {
    pub is_hit: bool,
    /// Set only on the attack that sinks the ship.
    pub sunk_ship: Option<Ship>,
}

impl AttackOutcome {
    pub fn miss() -> Self {
        Self {
            is_hit: false,
            sunk_ship: None,
        }
    }

    pub fn hit(sunk_ship: Option<Ship>) -> Self {
        Self {
            is_hit: true,
            sunk_ship,
        }
    }
}

/// One entry of a guess log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Guess {
    #[cfg_attr(feature = "std", serde(flatten))]
    pub cell: Cell,
    pub hit: bool,
}

/// What one side is allowed to see of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct PlayerView {
    pub side: Side,
    pub phase: Phase,
    pub ships: Vec<Ship>,
    /// Occupancy grid; absent until the fleet is placed.
    pub board: Option<GridRows>,
    /// Shots this side fired.
    pub guesses: Vec<Guess>,
    /// Shots fired at this side.
    pub incoming: Vec<Guess>,
    pub ships_lost: Vec<Ship>,
    pub ships_sunk: Vec<Ship>,
}

#[cfg(feature = "std")]
pub use self::wire::*;

#[cfg(feature = "std")]
mod wire {
    use serde::{Deserialize, Serialize};

    use crate::common::Phase;
    use crate::registry::{GameId, PlayerId, RegistryError};
    use crate::ship::{Cell, Ship};

    /// Reply to "create game".
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct NewGame {
        pub game_id: GameId,
        pub player_id: PlayerId,
    }

    /// Reply to "join game".
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Joined {
        pub player_id: PlayerId,
    }

    /// Body of a fleet placement request.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PlaceFleetRequest {
        pub battleships: Vec<Ship>,
    }

    /// Body of an attack request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AttackRequest {
        pub target: Cell,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct StatusResponse {
        pub status: Phase,
    }

    /// Payload describing a rejected request.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ErrorBody {
        pub id: String,
        pub message: String,
    }

    impl From<&RegistryError> for ErrorBody {
        fn from(err: &RegistryError) -> Self {
            ErrorBody {
                id: err.id().to_string(),
                message: err.to_string(),
            }
        }
    }
}
