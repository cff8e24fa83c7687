use crate::interface_adapters::http::{ApiError, map_game_error};
use crate::interface_adapters::protocol::{PlayerDto, SubmitOrdersRequest};
use crate::interface_adapters::state::AppState;
use crate::use_cases::leave_game::LeaveGameUseCase;
use crate::use_cases::queries::GetPlayerUseCase;
use crate::use_cases::submit_orders::SubmitOrdersUseCase;
use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<u64>,
) -> Result<Json<PlayerDto>, ApiError> {
    let use_case = GetPlayerUseCase {
        repo: state.store.clone(),
    };
    let player = use_case.execute(player_id).await.map_err(map_game_error)?;
    Ok(Json(player.into()))
}

// Record a player's orders and resolve the turn once everyone is in.
pub async fn submit_orders(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<u64>,
    Json(request): Json<SubmitOrdersRequest>,
) -> Result<Json<PlayerDto>, ApiError> {
    let use_case = SubmitOrdersUseCase {
        repo: state.store.clone(),
        engine: state.engine(),
    };
    let submitted = use_case
        .execute(player_id, &request.orders)
        .await
        .map_err(map_game_error)?;
    Ok(Json(submitted.player.into()))
}

pub async fn leave_game(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<u64>,
) -> Result<Json<PlayerDto>, ApiError> {
    let use_case = LeaveGameUseCase {
        repo: state.store.clone(),
        engine: state.engine(),
    };
    let player = use_case.execute(player_id).await.map_err(map_game_error)?;
    Ok(Json(player.into()))
}
