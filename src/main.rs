#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::sync::Arc;

#[cfg(feature = "std")]
use anyhow::anyhow;
#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use log::info;
#[cfg(feature = "std")]
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
#[cfg(feature = "std")]
use salvo::{
    empty_board, fleet_template, init_logging, random_fleet, wait_for_turn, Cell, GameId,
    MatchService, PlayerId, Registry, Turn, BOARD_SIZE, FLEET_SIZE,
};
#[cfg(feature = "std")]
use serde_json::json;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Seat two random-firing players in one game and play it to the end.
    Sim {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2, help = "Status polling period in milliseconds")]
        poll_ms: u64,
    },
    /// Print the fleet template and an empty board as JSON.
    Templates,
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sim { seed, poll_ms } => {
            let seed = seed.unwrap_or_else(rand::random);
            info!("simulating with seed {}", seed);
            let summary = simulate(seed, Duration::from_millis(poll_ms.max(1))).await?;
            println!("{}", serde_json::to_string(&summary)?);
        }
        Commands::Templates => {
            let templates = json!({
                "battleships": fleet_template(),
                "board": empty_board(),
            });
            println!("{}", serde_json::to_string(&templates)?);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn simulate(seed: u64, period: Duration) -> anyhow::Result<serde_json::Value> {
    let registry = Arc::new(Registry::with_seed(seed));
    let host = registry.create_game().await;
    let game = host.game_id.clone();
    let guest = registry.join_game(&game).await?;

    let mut rng = SmallRng::seed_from_u64(seed);
    for player in [&host.player_id, &guest.player_id] {
        let ships = random_fleet(&mut rng).ok_or_else(|| anyhow!("could not lay out a fleet"))?;
        registry.place_fleet(&game, player, ships).await?;
    }

    let first = tokio::spawn(fire_until_done(
        registry.clone(),
        game.clone(),
        host.player_id.clone(),
        SmallRng::seed_from_u64(seed.wrapping_add(1)),
        period,
    ));
    let second = tokio::spawn(fire_until_done(
        registry.clone(),
        game.clone(),
        guest.player_id.clone(),
        SmallRng::seed_from_u64(seed.wrapping_add(2)),
        period,
    ));
    let shots1 = first.await??;
    let shots2 = second.await??;

    let view1 = registry.view(&game, &host.player_id).await?;
    let view2 = registry.view(&game, &guest.player_id).await?;
    let winner = if view1.ships_sunk.len() == FLEET_SIZE {
        Some("player1")
    } else if view2.ships_sunk.len() == FLEET_SIZE {
        Some("player2")
    } else {
        None
    };

    Ok(json!({
        "gameId": game,
        "seed": seed,
        "status": registry.status(&game).await?,
        "winner": winner,
        "player1": {
            "shots": shots1,
            "hits": view1.guesses.iter().filter(|g| g.hit).count(),
            "shipsSunk": view1.ships_sunk.len(),
        },
        "player2": {
            "shots": shots2,
            "hits": view2.guesses.iter().filter(|g| g.hit).count(),
            "shipsSunk": view2.ships_sunk.len(),
        },
    }))
}

/// Wait for each turn and fire at a random cell not tried before. Returns the
/// number of shots fired.
#[cfg(feature = "std")]
async fn fire_until_done(
    registry: Arc<Registry>,
    game: GameId,
    player: PlayerId,
    mut rng: SmallRng,
    period: Duration,
) -> anyhow::Result<usize> {
    let size = BOARD_SIZE as usize;
    let mut targets: Vec<Cell> = (0..size * size)
        .map(|i| Cell::from((i / size, i % size)))
        .collect();
    targets.shuffle(&mut rng);

    let mut shots = 0;
    while let Turn::Yours = wait_for_turn(&*registry, &game, &player, period).await? {
        let target = targets
            .pop()
            .ok_or_else(|| anyhow!("{} ran out of targets", player))?;
        let outcome = registry.attack(&game, &player, target).await?;
        shots += 1;
        if let Some(ship) = outcome.sunk_ship {
            info!("{} sank a ship of length {} at {}", player, ship.len(), target);
        }
    }
    Ok(shots)
}
