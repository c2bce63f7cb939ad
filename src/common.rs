//! Common types for a match: sides, phases and engine errors.

use core::fmt;

use crate::bitboard::BitBoardError;

/// One of the two participant slots of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    /// The phase in which this side may attack.
    pub fn turn(self) -> Phase {
        match self {
            Side::Player1 => Phase::Player1Turn,
            Side::Player2 => Phase::Player2Turn,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::Player1 => 0,
            Side::Player2 => 1,
        }
    }
}

/// State of the match automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Waiting for one or both fleets.
    #[default]
    #[cfg_attr(feature = "std", serde(rename = "pendingStart"))]
    Prestart,
    #[cfg_attr(feature = "std", serde(rename = "player1Turn"))]
    Player1Turn,
    #[cfg_attr(feature = "std", serde(rename = "player2Turn"))]
    Player2Turn,
    #[cfg_attr(feature = "std", serde(rename = "gameOver"))]
    GameOver,
}

impl Phase {
    /// The side allowed to attack, if any.
    pub fn current(self) -> Option<Side> {
        match self {
            Phase::Player1Turn => Some(Side::Player1),
            Phase::Player2Turn => Some(Side::Player2),
            Phase::Prestart | Phase::GameOver => None,
        }
    }
}

/// Reasons the engine rejects a placement or an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Not this side's turn, the game is not running, or the fleet is already placed.
    OutOfPhase,
    /// A coordinate lies outside the 10×10 grid.
    OutOfBounds,
    /// Ship count or length multiset does not match the template.
    InvalidFleetShape,
    /// Two ships of one fleet share a cell.
    PlacementConflict,
    /// The side already attacked this cell.
    DuplicateTarget,
}

impl MatchError {
    /// Stable machine-readable identifier.
    pub fn id(&self) -> &'static str {
        match self {
            MatchError::OutOfPhase => "outOfPhase",
            MatchError::OutOfBounds => "outOfBounds",
            MatchError::InvalidFleetShape => "invalidFleetShape",
            MatchError::PlacementConflict => "placementConflict",
            MatchError::DuplicateTarget => "duplicateTarget",
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::OutOfPhase => {
                write!(f, "Action cannot be performed at this time. No action was performed.")
            }
            MatchError::OutOfBounds => {
                write!(f, "Coordinate out of bounds. No action was performed.")
            }
            MatchError::InvalidFleetShape => {
                write!(f, "Battleships do not match the fleet template. No ships placed.")
            }
            MatchError::PlacementConflict => {
                write!(f, "Overlap between battleships. No ships placed.")
            }
            MatchError::DuplicateTarget => {
                write!(f, "Target already attacked. No action was performed.")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}

impl From<BitBoardError> for MatchError {
    fn from(_: BitBoardError) -> Self {
        MatchError::OutOfBounds
    }
}
