#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
pub mod api;
mod bitboard;
mod board;
mod common;
mod config;
pub mod domain;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
#[cfg(feature = "std")]
pub mod registry;
mod ship;
#[cfg(feature = "std")]
pub mod watch;

#[cfg(feature = "std")]
pub use api::MatchService;
pub use bitboard::{BitBoard, BitBoardError};
pub use board::{random_fleet, Fleet, GuessLog};
pub use common::{MatchError, Phase, Side};
pub use config::*;
pub use domain::{AttackOutcome, Guess, PlayerView};
pub use game::Match;
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level};
#[cfg(feature = "std")]
pub use registry::{GameId, MatchHandle, PlayerId, Registry, RegistryError, Seat};
pub use ship::{Cell, Orientation, Ship, ShipDef};
#[cfg(feature = "std")]
pub use watch::{wait_for_turn, Turn};
