use crate::domain::entities::GameId;
use crate::domain::errors::GameError;
use crate::domain::ports::GameRepository;
use crate::domain::turn::TurnEngine;
use crate::use_cases::game_snapshot::{GameSnapshot, load_snapshot};
use crate::use_cases::resolve_turn::{Resolution, resolve_turn};

// Response returned by the tick use case.
pub struct TickedGame {
    pub game: GameSnapshot,
    pub resolution: Resolution,
}

// Retries turn resolution for a game without submitting anything.
//
// Never clears a held processing flag; a tick during resolution is deferred.
pub struct TickGameUseCase<R> {
    pub repo: R,
    pub engine: TurnEngine,
}

impl<R> TickGameUseCase<R>
where
    R: GameRepository,
{
    pub async fn execute(&self, game_id: GameId) -> Result<TickedGame, GameError> {
        let resolution = resolve_turn(&self.repo, &self.engine, game_id).await?;
        let game = load_snapshot(&self.repo, game_id).await?;
        Ok(TickedGame { game, resolution })
    }
}
