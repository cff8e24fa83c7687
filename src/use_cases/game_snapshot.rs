use crate::domain::board::Board;
use crate::domain::entities::{Game, GameId, Player, PlayerId};
use crate::domain::errors::GameError;
use crate::domain::ports::GameRepository;

/// Point-in-time view of a game for clients.
///
/// `processing == true` means a turn is being resolved; clients should poll again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub id: GameId,
    pub name: String,
    pub board_size: usize,
    pub turn: u64,
    pub active: bool,
    pub processing: bool,
    pub winner: Option<PlayerId>,
    /// Row-major cell labels, `board_size` x `board_size`.
    pub board: Vec<Vec<String>>,
}

impl GameSnapshot {
    pub fn build(game: &Game, players: &[Player]) -> Self {
        let board = Board::new(game.board_size, players);
        Self {
            id: game.id,
            name: game.name.clone(),
            board_size: game.board_size,
            turn: game.turn,
            active: game.active,
            processing: game.processing,
            winner: game.winner,
            board: board.render(players),
        }
    }
}

pub(crate) async fn load_snapshot<R>(repo: &R, game_id: GameId) -> Result<GameSnapshot, GameError>
where
    R: GameRepository + ?Sized,
{
    let game = repo
        .find_game(game_id)
        .await
        .map_err(GameError::StorageFailure)?
        .ok_or(GameError::GameNotFound(game_id))?;
    let players = repo
        .players_in_game(game_id)
        .await
        .map_err(GameError::StorageFailure)?;

    Ok(GameSnapshot::build(&game, &players))
}

// Read-only game view use case.
pub struct GetGameSnapshotUseCase<R> {
    pub repo: R,
}

impl<R> GetGameSnapshotUseCase<R>
where
    R: GameRepository,
{
    pub async fn execute(&self, game_id: GameId) -> Result<GameSnapshot, GameError> {
        load_snapshot(&self.repo, game_id).await
    }
}
