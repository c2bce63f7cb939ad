#![cfg(feature = "std")]

use alloc::vec::Vec;

use crate::{
    common::Phase,
    domain::{AttackOutcome, Joined, NewGame, PlayerView},
    registry::{GameId, PlayerId, RegistryError},
    ship::{Cell, Ship},
};

/// Operations a transport layer drives. Identifiers are opaque; every call
/// that names a player also names the game it belongs to.
#[async_trait::async_trait]
pub trait MatchService: Send + Sync {
    /// Start a new game and seat the caller as Player1.
    async fn create_game(&self) -> NewGame;
    /// Seat a second player as Player2.
    async fn join_game(&self, game: &GameId) -> Result<Joined, RegistryError>;
    async fn place_fleet(
        &self,
        game: &GameId,
        player: &PlayerId,
        ships: Vec<Ship>,
    ) -> Result<(), RegistryError>;
    async fn attack(
        &self,
        game: &GameId,
        player: &PlayerId,
        target: Cell,
    ) -> Result<AttackOutcome, RegistryError>;
    async fn status(&self, game: &GameId) -> Result<Phase, RegistryError>;
    async fn view(&self, game: &GameId, player: &PlayerId) -> Result<PlayerView, RegistryError>;
}
