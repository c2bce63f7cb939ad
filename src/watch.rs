#![cfg(feature = "std")]

//! Turn notification for clients that can only ask "whose turn is it?".

use log::trace;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::{
    api::MatchService,
    common::Phase,
    registry::{GameId, PlayerId, RegistryError},
};

/// Why [`wait_for_turn`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The player may attack now.
    Yours,
    /// The match ended; no further turns will come.
    GameOver,
}

/// Poll the match status every `period` until it is `player`'s turn or the
/// game is over.
///
/// There is no timeout of its own: drop the future (for example under
/// `tokio::time::timeout`) to stop waiting.
pub async fn wait_for_turn<S>(
    service: &S,
    game: &GameId,
    player: &PlayerId,
    period: Duration,
) -> Result<Turn, RegistryError>
where
    S: MatchService + ?Sized,
{
    // also rejects a player who is not seated in `game`
    let side = service.view(game, player).await?.side;

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        // first tick completes immediately
        ticker.tick().await;
        match service.status(game).await? {
            Phase::GameOver => return Ok(Turn::GameOver),
            phase if phase == side.turn() => return Ok(Turn::Yours),
            phase => trace!("{} waiting, phase is {:?}", player, phase),
        }
    }
}
