use crate::interface_adapters::handlers::{
    create_game, get_game, get_player, join_game, leave_game, list_games, submit_orders, tick_game,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

// Build the HTTP router for the game API.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/games", get(list_games))
        .route("/game", post(create_game))
        .route("/game/{id}", get(get_game))
        .route("/join/{id}", post(join_game))
        .route("/tick/{id}", post(tick_game))
        .route("/player/{id}", get(get_player))
        .route("/turn/{id}", post(submit_orders))
        .route("/leave/{id}", post(leave_game))
        .with_state(state)
}
