use tracing::{debug, info};

use crate::domain::entities::GameId;
use crate::domain::errors::GameError;
use crate::domain::ports::GameRepository;
use crate::domain::turn::{TurnEngine, TurnOutcome};

// Bounds the re-check loop when state changes between the eligibility check
// and permit acquisition.
const MAX_RESOLVE_ATTEMPTS: usize = 3;

/// Result of attempting to resolve a game's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(TurnOutcome),
    /// Another request holds the turn permit and will resolve instead.
    Deferred,
    /// Some seated player has not submitted yet, or the game has ended.
    NotReady,
}

/// Resolves the game's current turn if every seated player has submitted.
///
/// The permit is re-checked against fresh state once held, and released
/// before returning on every path.
pub async fn resolve_turn<R>(
    repo: &R,
    engine: &TurnEngine,
    game_id: GameId,
) -> Result<Resolution, GameError>
where
    R: GameRepository + ?Sized,
{
    for _ in 0..MAX_RESOLVE_ATTEMPTS {
        let game = repo
            .find_game(game_id)
            .await
            .map_err(GameError::StorageFailure)?
            .ok_or(GameError::GameNotFound(game_id))?;
        let players = repo
            .players_in_game(game_id)
            .await
            .map_err(GameError::StorageFailure)?;
        if !engine.orders_complete(&game, &players) {
            return Ok(Resolution::NotReady);
        }

        let Some(permit) = repo
            .try_begin_turn(game_id)
            .await
            .map_err(GameError::StorageFailure)?
        else {
            debug!(game_id, "turn resolution already in flight");
            return Ok(Resolution::Deferred);
        };

        // Reload under the permit: a competing resolver may have just finished.
        let mut game = repo
            .find_game(game_id)
            .await
            .map_err(GameError::StorageFailure)?
            .ok_or(GameError::GameNotFound(game_id))?;
        let mut players = repo
            .players_in_game(game_id)
            .await
            .map_err(GameError::StorageFailure)?;
        if !engine.orders_complete(&game, &players) {
            drop(permit);
            continue;
        }

        let outcome = engine.resolve(&mut game, &mut players);
        repo.commit_turn(&game, &players)
            .await
            .map_err(GameError::StorageFailure)?;
        drop(permit);

        info!(
            game_id,
            turn = outcome.turn,
            moves = outcome.moves,
            hits = outcome.hits,
            eliminated = ?outcome.eliminated,
            "turn resolved"
        );
        if let Some(winner) = outcome.winner.filter(|_| outcome.ended) {
            info!(game_id, winner, turn = outcome.turn, "game won");
        }

        return Ok(Resolution::Resolved(outcome));
    }

    Ok(Resolution::NotReady)
}
