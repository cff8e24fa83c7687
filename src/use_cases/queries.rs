use crate::domain::entities::{GameListing, Player, PlayerId};
use crate::domain::errors::GameError;
use crate::domain::ports::GameRepository;

// Lists every game, active or not.
pub struct ListGamesUseCase<R> {
    pub repo: R,
}

impl<R> ListGamesUseCase<R>
where
    R: GameRepository,
{
    pub async fn execute(&self) -> Result<Vec<GameListing>, GameError> {
        self.repo
            .list_games()
            .await
            .map_err(GameError::StorageFailure)
    }
}

// Looks up a single player record.
pub struct GetPlayerUseCase<R> {
    pub repo: R,
}

impl<R> GetPlayerUseCase<R>
where
    R: GameRepository,
{
    pub async fn execute(&self, player_id: PlayerId) -> Result<Player, GameError> {
        self.repo
            .find_player(player_id)
            .await
            .map_err(GameError::StorageFailure)?
            .ok_or(GameError::PlayerNotFound(player_id))
    }
}
