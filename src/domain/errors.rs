use crate::domain::entities::{GameId, PlayerId, PlayerState};
use thiserror::Error;

// Domain-level errors for game workflows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game {0} not found")]
    GameNotFound(GameId),
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("game {0} is no longer active")]
    GameInactive(GameId),
    #[error("game {0} has no free seats")]
    GameFull(GameId),
    #[error("player {player_id} cannot submit orders while {state}")]
    NotYourTurn {
        player_id: PlayerId,
        state: PlayerState,
    },
    #[error("game {0} is resolving a turn; retry shortly")]
    TurnInProgress(GameId),
    #[error("storage failure: {0}")]
    StorageFailure(String),
}
