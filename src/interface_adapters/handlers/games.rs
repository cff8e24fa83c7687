use crate::interface_adapters::http::{ApiError, map_game_error};
use crate::interface_adapters::protocol::{
    CreateGameRequest, GameDto, GameListingDto, JoinGameRequest, JoinGameResponse,
};
use crate::interface_adapters::state::{AppState, ThreadRandom};
use crate::use_cases::GameSnapshot;
use crate::use_cases::create_game::CreateGameUseCase;
use crate::use_cases::game_snapshot::GetGameSnapshotUseCase;
use crate::use_cases::join_game::JoinGameUseCase;
use crate::use_cases::queries::ListGamesUseCase;
use crate::use_cases::tick_game::TickGameUseCase;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

// Create a new game with a clamped board size.
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameDto>), ApiError> {
    let use_case = CreateGameUseCase {
        repo: state.store.clone(),
        rules: state.rules,
    };
    let game = use_case
        .execute(request.name, request.size)
        .await
        .map_err(map_game_error)?;

    let snapshot = GameSnapshot::build(&game, &[]);
    Ok((StatusCode::CREATED, Json(snapshot.into())))
}

pub async fn list_games(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GameListingDto>>, ApiError> {
    let use_case = ListGamesUseCase {
        repo: state.store.clone(),
    };
    let listings = use_case.execute().await.map_err(map_game_error)?;
    Ok(Json(listings.into_iter().map(Into::into).collect()))
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<u64>,
) -> Result<Json<GameDto>, ApiError> {
    let use_case = GetGameSnapshotUseCase {
        repo: state.store.clone(),
    };
    let snapshot = use_case.execute(game_id).await.map_err(map_game_error)?;
    Ok(Json(snapshot.into()))
}

// Seat a new player on a random free cell.
pub async fn join_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<u64>,
    Json(request): Json<JoinGameRequest>,
) -> Result<Json<JoinGameResponse>, ApiError> {
    let use_case = JoinGameUseCase {
        repo: state.store.clone(),
        random: ThreadRandom,
        rules: state.rules,
    };
    let joined = use_case
        .execute(game_id, request.name)
        .await
        .map_err(map_game_error)?;

    Ok(Json(JoinGameResponse {
        game: joined.game.into(),
        player: joined.player.into(),
    }))
}

// Retry turn resolution without submitting orders; returns the current view.
pub async fn tick_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<u64>,
) -> Result<Json<GameDto>, ApiError> {
    let use_case = TickGameUseCase {
        repo: state.store.clone(),
        engine: state.engine(),
    };
    let ticked = use_case.execute(game_id).await.map_err(map_game_error)?;
    Ok(Json(ticked.game.into()))
}
