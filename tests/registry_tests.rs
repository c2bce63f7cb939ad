use std::collections::HashSet;
use std::sync::Arc;

use salvo::domain::ErrorBody;
use salvo::prelude::*;
use salvo::Orientation;

fn row_ship(row: i32, len: i32) -> Ship {
    Ship::straight(Cell::new(row, 0), Orientation::Horizontal, len as usize)
}

fn standard_fleet() -> Vec<Ship> {
    vec![
        row_ship(0, 2),
        row_ship(2, 5),
        row_ship(4, 4),
        row_ship(6, 3),
        row_ship(8, 3),
    ]
}

async fn started(registry: &Registry) -> (GameId, PlayerId, PlayerId) {
    let host = registry.create_game().await;
    let guest = registry.join_game(&host.game_id).await.unwrap();
    registry
        .place_fleet(&host.game_id, &host.player_id, standard_fleet())
        .await
        .unwrap();
    registry
        .place_fleet(&host.game_id, &guest.player_id, standard_fleet())
        .await
        .unwrap();
    (host.game_id, host.player_id, guest.player_id)
}

#[tokio::test]
async fn test_create_seats_host_as_player1() {
    let registry = Registry::with_seed(1);
    let created = registry.create_game().await;

    assert_ne!(created.game_id.as_str(), created.player_id.as_str());
    assert_eq!(registry.game_count().await, 1);
    let seat = registry.seat(&created.player_id).await.unwrap();
    assert_eq!(seat.game, created.game_id);
    assert_eq!(seat.side, Side::Player1);
    assert_eq!(registry.status(&created.game_id).await, Ok(Phase::Prestart));
}

#[tokio::test]
async fn test_join_seats_guest_as_player2() {
    let registry = Registry::with_seed(2);
    let created = registry.create_game().await;
    let joined = registry.join_game(&created.game_id).await.unwrap();

    assert_ne!(joined.player_id, created.player_id);
    let seat = registry.seat(&joined.player_id).await.unwrap();
    assert_eq!(seat.side, Side::Player2);
    assert_eq!(seat.game, created.game_id);
}

#[tokio::test]
async fn test_third_join_rejected() {
    let registry = Registry::with_seed(3);
    let created = registry.create_game().await;
    registry.join_game(&created.game_id).await.unwrap();

    assert_eq!(
        registry.join_game(&created.game_id).await,
        Err(RegistryError::TooManyPlayers)
    );
}

#[tokio::test]
async fn test_concurrent_joins_seat_one_guest() {
    let registry = Arc::new(Registry::with_seed(4));
    let created = registry.create_game().await;

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let registry = registry.clone();
        let game = created.game_id.clone();
        tasks.push(tokio::spawn(async move { registry.join_game(&game).await }));
    }
    let mut accepted = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(err) => assert_eq!(err, RegistryError::TooManyPlayers),
        }
    }
    assert_eq!(accepted, 1);
}

#[tokio::test]
async fn test_unknown_identifiers() {
    let registry = Registry::with_seed(5);
    let created = registry.create_game().await;
    let missing_game = GameId::from("nope");
    let missing_player = PlayerId::from("nobody");

    assert_eq!(registry.join_game(&missing_game).await, Err(RegistryError::GameNotFound));
    assert_eq!(registry.status(&missing_game).await, Err(RegistryError::GameNotFound));
    assert_eq!(
        registry.view(&missing_game, &created.player_id).await,
        Err(RegistryError::GameNotFound)
    );
    assert_eq!(
        registry.view(&created.game_id, &missing_player).await,
        Err(RegistryError::PlayerNotFound)
    );
    assert_eq!(
        registry
            .attack(&created.game_id, &missing_player, Cell::new(0, 0))
            .await,
        Err(RegistryError::PlayerNotFound)
    );
    assert!(registry.seat(&missing_player).await.is_none());
}

#[tokio::test]
async fn test_player_from_other_game_not_found() {
    let registry = Registry::with_seed(6);
    let first = registry.create_game().await;
    let second = registry.create_game().await;

    assert_eq!(
        registry
            .place_fleet(&first.game_id, &second.player_id, standard_fleet())
            .await,
        Err(RegistryError::PlayerNotFound)
    );
    assert!(registry.resolve(&first.game_id, &first.player_id).await.is_ok());
}

#[tokio::test]
async fn test_engine_errors_pass_through() {
    let registry = Registry::with_seed(7);
    let created = registry.create_game().await;

    assert_eq!(
        registry
            .attack(&created.game_id, &created.player_id, Cell::new(0, 0))
            .await,
        Err(RegistryError::Match(MatchError::OutOfPhase))
    );
    assert_eq!(
        registry
            .place_fleet(&created.game_id, &created.player_id, standard_fleet()[..4].to_vec())
            .await,
        Err(RegistryError::Match(MatchError::InvalidFleetShape))
    );
}

#[tokio::test]
async fn test_full_exchange_through_service() {
    let registry = Registry::with_seed(8);
    let (game, host, guest) = started(&registry).await;
    assert_eq!(registry.status(&game).await, Ok(Phase::Player1Turn));

    let hit = registry.attack(&game, &host, Cell::new(0, 0)).await.unwrap();
    assert!(hit.is_hit);
    assert_eq!(registry.status(&game).await, Ok(Phase::Player2Turn));

    assert_eq!(
        registry.attack(&game, &host, Cell::new(0, 1)).await,
        Err(RegistryError::Match(MatchError::OutOfPhase))
    );
    let miss = registry.attack(&game, &guest, Cell::new(9, 9)).await.unwrap();
    assert!(!miss.is_hit);

    let sunk = registry.attack(&game, &host, Cell::new(0, 1)).await.unwrap();
    assert_eq!(sunk.sunk_ship, Some(row_ship(0, 2)));

    let host_view = registry.view(&game, &host).await.unwrap();
    assert_eq!(host_view.side, Side::Player1);
    assert_eq!(host_view.ships_sunk, vec![row_ship(0, 2)]);
    assert_eq!(host_view.guesses.len(), 2);
    assert_eq!(host_view.incoming.len(), 1);

    let guest_view = registry.view(&game, &guest).await.unwrap();
    assert_eq!(guest_view.ships_lost, vec![row_ship(0, 2)]);
}

#[tokio::test]
async fn test_games_are_independent() {
    let registry = Arc::new(Registry::with_seed(9));
    let mut tasks = Vec::new();
    for _ in 0..6 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move {
            let (game, host, _) = started(&registry).await;
            registry.attack(&game, &host, Cell::new(0, 0)).await.unwrap();
            game
        }));
    }
    let mut ids = HashSet::new();
    for task in tasks {
        let game = task.await.unwrap();
        assert_eq!(registry.status(&game).await, Ok(Phase::Player2Turn));
        ids.insert(game);
    }
    assert_eq!(ids.len(), 6);
    assert_eq!(registry.game_count().await, 6);
}

#[tokio::test]
async fn test_seeded_registries_repeat_identifiers() {
    let a = Registry::with_seed(42).create_game().await;
    let b = Registry::with_seed(42).create_game().await;
    assert_eq!(a, b);
    assert!(a
        .game_id
        .as_str()
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

#[test]
fn test_error_mapping() {
    let cases = [
        (RegistryError::GameNotFound, 404, "gameNotFound"),
        (RegistryError::PlayerNotFound, 404, "playerNotFound"),
        (RegistryError::TooManyPlayers, 403, "tooManyPlayers"),
        (RegistryError::Match(MatchError::OutOfPhase), 403, "outOfPhase"),
        (RegistryError::Match(MatchError::InvalidFleetShape), 400, "invalidFleetShape"),
        (RegistryError::Match(MatchError::OutOfBounds), 422, "outOfBounds"),
        (RegistryError::Match(MatchError::PlacementConflict), 422, "placementConflict"),
        (RegistryError::Match(MatchError::DuplicateTarget), 422, "duplicateTarget"),
    ];
    for (err, code, id) in cases {
        assert_eq!(err.status_code(), code, "{:?}", err);
        assert_eq!(err.id(), id);
    }
}

#[test]
fn test_error_body_and_source() {
    use std::error::Error;

    let err = RegistryError::from(MatchError::DuplicateTarget);
    let body = ErrorBody::from(&err);
    assert_eq!(body.id, "duplicateTarget");
    assert_eq!(body.message, MatchError::DuplicateTarget.to_string());
    assert!(err.source().is_some());
    assert!(RegistryError::GameNotFound.source().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_attacks_on_one_match_take_one_turn() {
    let registry = Arc::new(Registry::with_seed(20));
    let (game, host, _) = started(&registry).await;

    let mut tasks = Vec::new();
    for col in 0..10 {
        let registry = registry.clone();
        let game = game.clone();
        let host = host.clone();
        tasks.push(tokio::spawn(async move {
            registry.attack(&game, &host, Cell::new(5, col)).await
        }));
    }
    let mut accepted = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(outcome) => {
                assert!(!outcome.is_hit);
                accepted += 1;
            }
            Err(err) => assert_eq!(err, RegistryError::Match(MatchError::OutOfPhase)),
        }
    }
    assert_eq!(accepted, 1);
    assert_eq!(registry.status(&game).await, Ok(Phase::Player2Turn));
    assert_eq!(registry.view(&game, &host).await.unwrap().guesses.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_placements_start_the_match() {
    for _ in 0..16 {
        let registry = Arc::new(Registry::with_seed(21));
        let host = registry.create_game().await;
        let guest = registry.join_game(&host.game_id).await.unwrap();

        let tasks: Vec<_> = [host.player_id.clone(), guest.player_id.clone()]
            .into_iter()
            .map(|player| {
                let registry = registry.clone();
                let game = host.game_id.clone();
                tokio::spawn(async move {
                    registry.place_fleet(&game, &player, standard_fleet()).await
                })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap(), Ok(()));
        }
        assert_eq!(registry.status(&host.game_id).await, Ok(Phase::Player1Turn));
    }
}
