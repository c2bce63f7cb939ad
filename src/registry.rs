#![cfg(feature = "std")]

//! Session registry: opaque game and player identifiers mapped to matches.
//!
//! Each match sits behind its own mutex. The registry's maps are locked only
//! long enough to look up or insert an entry, so operations on different games
//! never wait on each other.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use crate::{
    api::MatchService,
    common::{MatchError, Phase, Side},
    domain::{AttackOutcome, Joined, NewGame, PlayerView},
    game::Match,
    ship::{Cell, Ship},
};

/// Shared, lockable handle to one match.
pub type MatchHandle = Arc<Mutex<Match>>;

/// Opaque identifier of a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

/// Opaque identifier of a seated player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

macro_rules! opaque_id {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(GameId);
opaque_id!(PlayerId);

/// Where a player sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub game: GameId,
    pub side: Side,
}

/// Failures surfaced by the registry, including wrapped engine rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// No game with that identifier.
    GameNotFound,
    /// No player with that identifier in the named game.
    PlayerNotFound,
    /// Both sides of the game are already taken.
    TooManyPlayers,
    /// The match rejected the operation.
    Match(MatchError),
}

impl RegistryError {
    /// Stable machine-readable identifier.
    pub fn id(&self) -> &'static str {
        match self {
            RegistryError::GameNotFound => "gameNotFound",
            RegistryError::PlayerNotFound => "playerNotFound",
            RegistryError::TooManyPlayers => "tooManyPlayers",
            RegistryError::Match(err) => err.id(),
        }
    }

    /// HTTP status a JSON façade should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            RegistryError::GameNotFound | RegistryError::PlayerNotFound => 404,
            RegistryError::TooManyPlayers => 403,
            RegistryError::Match(MatchError::OutOfPhase) => 403,
            RegistryError::Match(MatchError::InvalidFleetShape) => 400,
            RegistryError::Match(
                MatchError::OutOfBounds
                | MatchError::PlacementConflict
                | MatchError::DuplicateTarget,
            ) => 422,
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::GameNotFound => write!(f, "No game found with that ID"),
            RegistryError::PlayerNotFound => write!(f, "No player found with that ID"),
            RegistryError::TooManyPlayers => write!(f, "Game already has two players"),
            RegistryError::Match(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Match(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MatchError> for RegistryError {
    fn from(err: MatchError) -> Self {
        RegistryError::Match(err)
    }
}

struct Table {
    game: MatchHandle,
    guest_seated: AtomicBool,
}

/// Owns every live match and every seated player for the process lifetime.
pub struct Registry {
    games: RwLock<HashMap<GameId, Table>>,
    players: RwLock<HashMap<PlayerId, Seat>>,
    rng: Mutex<SmallRng>,
}

impl Registry {
    /// Create an empty registry with identifiers drawn from OS entropy.
    pub fn new() -> Self {
        let mut seed_rng = rand::rng();
        Self::from_rng(SmallRng::from_rng(&mut seed_rng))
    }

    /// Create an empty registry whose identifiers are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            players: RwLock::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    async fn next_id(&self) -> String {
        let value: u64 = self.rng.lock().await.random();
        base36(value)
    }

    /// Number of games created so far.
    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }

    /// Seat of `player`, if known.
    pub async fn seat(&self, player: &PlayerId) -> Option<Seat> {
        self.players.read().await.get(player).cloned()
    }

    async fn seat_player(&self, game: &GameId, side: Side) -> PlayerId {
        let mut players = self.players.write().await;
        let id = loop {
            let id = PlayerId(self.next_id().await);
            if !players.contains_key(&id) {
                break id;
            }
        };
        players.insert(
            id.clone(),
            Seat {
                game: game.clone(),
                side,
            },
        );
        id
    }

    async fn handle(&self, game: &GameId) -> Result<MatchHandle, RegistryError> {
        self.games
            .read()
            .await
            .get(game)
            .map(|table| table.game.clone())
            .ok_or(RegistryError::GameNotFound)
    }

    /// Find the match for `game` and the side `player` plays in it.
    pub async fn resolve(
        &self,
        game: &GameId,
        player: &PlayerId,
    ) -> Result<(MatchHandle, Side), RegistryError> {
        let handle = self.handle(game).await?;
        let seat = self
            .seat(player)
            .await
            .filter(|seat| &seat.game == game)
            .ok_or(RegistryError::PlayerNotFound)?;
        Ok((handle, seat.side))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MatchService for Registry {
    async fn create_game(&self) -> NewGame {
        let game_id = {
            let mut games = self.games.write().await;
            let id = loop {
                let id = GameId(self.next_id().await);
                if !games.contains_key(&id) {
                    break id;
                }
            };
            games.insert(
                id.clone(),
                Table {
                    game: Arc::new(Mutex::new(Match::new())),
                    guest_seated: AtomicBool::new(false),
                },
            );
            id
        };
        let player_id = self.seat_player(&game_id, Side::Player1).await;
        info!("created game {} with host {}", game_id, player_id);
        NewGame { game_id, player_id }
    }

    async fn join_game(&self, game: &GameId) -> Result<Joined, RegistryError> {
        {
            let games = self.games.read().await;
            let table = games.get(game).ok_or(RegistryError::GameNotFound)?;
            if table
                .guest_seated
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                warn!("rejected third player for game {}", game);
                return Err(RegistryError::TooManyPlayers);
            }
        }
        let player_id = self.seat_player(game, Side::Player2).await;
        info!("player {} joined game {}", player_id, game);
        Ok(Joined { player_id })
    }

    async fn place_fleet(
        &self,
        game: &GameId,
        player: &PlayerId,
        ships: Vec<Ship>,
    ) -> Result<(), RegistryError> {
        let (handle, side) = self.resolve(game, player).await?;
        let mut engine = handle.lock().await;
        engine.place_fleet(side, ships)?;
        Ok(())
    }

    async fn attack(
        &self,
        game: &GameId,
        player: &PlayerId,
        target: Cell,
    ) -> Result<AttackOutcome, RegistryError> {
        let (handle, side) = self.resolve(game, player).await?;
        let mut engine = handle.lock().await;
        Ok(engine.attack(side, target)?)
    }

    async fn status(&self, game: &GameId) -> Result<Phase, RegistryError> {
        let handle = self.handle(game).await?;
        let phase = handle.lock().await.phase();
        Ok(phase)
    }

    async fn view(&self, game: &GameId, player: &PlayerId) -> Result<PlayerView, RegistryError> {
        let (handle, side) = self.resolve(game, player).await?;
        let view = handle.lock().await.view(side);
        Ok(view)
    }
}

/// Lowercase base-36 rendering of `value`.
fn base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}
