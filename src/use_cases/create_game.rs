use tracing::info;

use crate::domain::entities::{Game, NewGame};
use crate::domain::errors::GameError;
use crate::domain::ports::GameRepository;
use crate::domain::rules::Rules;

// Game creation use case with injected dependencies.
pub struct CreateGameUseCase<R> {
    pub repo: R,
    pub rules: Rules,
}

impl<R> CreateGameUseCase<R>
where
    R: GameRepository,
{
    /// Creates an active game on turn 1. The board size is clamped into the
    /// configured range rather than rejected.
    pub async fn execute(&self, name: String, requested_size: i64) -> Result<Game, GameError> {
        let board_size = self.rules.clamp_board_size(requested_size);
        let game = self
            .repo
            .create_game(NewGame { name, board_size })
            .await
            .map_err(GameError::StorageFailure)?;

        info!(game_id = game.id, board_size, name = %game.name, "game created");
        Ok(game)
    }
}
