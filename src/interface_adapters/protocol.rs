// Wire protocol DTOs and conversions for the public JSON API.

use crate::domain::entities::{GameListing, Player};
use crate::use_cases::GameSnapshot;
use serde::{Deserialize, Serialize};

/// Body for `POST /game`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGameRequest {
    pub name: String,
    // Missing size falls back to the minimum board.
    #[serde(default)]
    pub size: i64,
}

/// Body for `POST /join/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinGameRequest {
    pub name: String,
}

/// Body for `POST /turn/{id}`. Missing orders mean a full idle turn.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitOrdersRequest {
    #[serde(default)]
    pub orders: String,
}

/// One row of `GET /games`.
#[derive(Debug, Clone, Serialize)]
pub struct GameListingDto {
    pub id: u64,
    pub active: bool,
    pub size: usize,
    pub name: String,
    pub players: usize,
    pub turn: u64,
}

impl From<GameListing> for GameListingDto {
    fn from(listing: GameListing) -> Self {
        Self {
            id: listing.id,
            active: listing.active,
            size: listing.board_size,
            name: listing.name,
            players: listing.player_count,
            turn: listing.turn,
        }
    }
}

/// Full game view with the rendered board.
#[derive(Debug, Clone, Serialize)]
pub struct GameDto {
    pub name: String,
    pub id: u64,
    pub board_size: usize,
    pub turn: u64,
    pub board: Vec<Vec<String>>,
    pub active: bool,
    // True while a turn is resolving; poll again.
    pub processing: bool,
    pub winner: Option<u64>,
}

impl From<GameSnapshot> for GameDto {
    fn from(snapshot: GameSnapshot) -> Self {
        Self {
            name: snapshot.name,
            id: snapshot.id,
            board_size: snapshot.board_size,
            turn: snapshot.turn,
            board: snapshot.board,
            active: snapshot.active,
            processing: snapshot.processing,
            winner: snapshot.winner,
        }
    }
}

/// Player record; position and facing are null once the player has quit.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerDto {
    pub id: u64,
    pub name: String,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub facing: Option<&'static str>,
    pub hp: i32,
    pub score: i32,
    pub state: &'static str,
    pub orders: String,
}

impl From<Player> for PlayerDto {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            x: player.position.map(|p| p.x),
            y: player.position.map(|p| p.y),
            facing: player.facing.map(|f| f.code()),
            hp: player.hp,
            score: player.score,
            state: player.state.as_str(),
            orders: player.orders.as_str().to_string(),
            name: player.name,
        }
    }
}

/// Response for `POST /join/{id}`: the game view plus the new player.
#[derive(Debug, Clone, Serialize)]
pub struct JoinGameResponse {
    #[serde(flatten)]
    pub game: GameDto,
    pub player: PlayerDto,
}
