use tracing::{info, warn};

use crate::domain::entities::{Player, PlayerId, PlayerState};
use crate::domain::errors::GameError;
use crate::domain::ports::GameRepository;
use crate::domain::turn::TurnEngine;
use crate::use_cases::resolve_turn::resolve_turn;

// Leave game use case with injected dependencies.
pub struct LeaveGameUseCase<R> {
    pub repo: R,
    pub engine: TurnEngine,
}

impl<R> LeaveGameUseCase<R>
where
    R: GameRepository,
{
    /// Takes the player off the board for good. Leaving again is a no-op.
    ///
    /// The leaver may have been the last player the turn was waiting on, so a
    /// resolution attempt follows. The leave is already persisted by then; a
    /// failed resolution is logged and left for the next submit or tick.
    pub async fn execute(&self, player_id: PlayerId) -> Result<Player, GameError> {
        let mut player = self
            .repo
            .find_player(player_id)
            .await
            .map_err(GameError::StorageFailure)?
            .ok_or(GameError::PlayerNotFound(player_id))?;
        if player.state == PlayerState::Quit {
            return Ok(player);
        }

        player.leave(self.engine.rules().orders_per_turn);
        self.repo
            .save_player(&player)
            .await
            .map_err(GameError::StorageFailure)?;
        info!(game_id = player.game_id, player_id, "player left");

        if let Err(err) = resolve_turn(&self.repo, &self.engine, player.game_id).await {
            warn!(
                game_id = player.game_id,
                player_id,
                error = %err,
                "turn resolution after leave failed"
            );
        }
        Ok(player)
    }
}
