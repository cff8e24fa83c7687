use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::board::Board;
use crate::domain::entities::{Facing, GameId, NewPlayer, Player};
use crate::domain::errors::GameError;
use crate::domain::orders::Orders;
use crate::domain::ports::{GameRepository, RandomSource, Seating};
use crate::domain::rules::Rules;
use crate::use_cases::game_snapshot::{GameSnapshot, load_snapshot};

// A concurrent join can take the chosen cell first, or a turn can be
// resolving; pick again a few times.
const MAX_SEAT_ATTEMPTS: u32 = 8;
const TURN_IN_FLIGHT_BACKOFF: Duration = Duration::from_millis(5);

// Response returned by the join game use case.
pub struct JoinedGame {
    pub game: GameSnapshot,
    pub player: Player,
}

// Join game use case with injected dependencies.
pub struct JoinGameUseCase<R, G> {
    pub repo: R,
    pub random: G,
    pub rules: Rules,
}

impl<R, G> JoinGameUseCase<R, G>
where
    R: GameRepository,
    G: RandomSource,
{
    /// Seats a new player on a uniformly random free cell with a random facing.
    ///
    /// Nobody is seated while a turn resolves; if resolution outlasts the
    /// retries the caller gets `TurnInProgress`.
    pub async fn execute(&self, game_id: GameId, name: String) -> Result<JoinedGame, GameError> {
        let mut last_refusal = Seating::CellTaken;

        for attempt in 0..MAX_SEAT_ATTEMPTS {
            let game = self
                .repo
                .find_game(game_id)
                .await
                .map_err(GameError::StorageFailure)?
                .ok_or(GameError::GameNotFound(game_id))?;
            if !game.active {
                return Err(GameError::GameInactive(game_id));
            }

            let players = self
                .repo
                .players_in_game(game_id)
                .await
                .map_err(GameError::StorageFailure)?;
            let seated = players.iter().filter(|p| p.is_on_board()).count();
            if seated >= self.rules.players_per_game {
                return Err(GameError::GameFull(game_id));
            }

            let free = Board::new(game.board_size, &players).free_cells();
            if free.is_empty() {
                return Err(GameError::GameFull(game_id));
            }
            let position = free[self.random.index(free.len())];
            let facing = Facing::ALL[self.random.index(Facing::ALL.len())];

            let seating = self
                .repo
                .insert_player(NewPlayer {
                    game_id,
                    name: name.clone(),
                    position,
                    facing,
                    hp: self.rules.starting_hitpoints,
                    orders: Orders::idle(self.rules.orders_per_turn),
                })
                .await
                .map_err(GameError::StorageFailure)?;

            match seating {
                Seating::Seated(player) => {
                    info!(
                        game_id,
                        player_id = player.id,
                        x = position.x,
                        y = position.y,
                        facing = facing.code(),
                        "player joined"
                    );
                    let game = load_snapshot(&self.repo, game_id).await?;
                    return Ok(JoinedGame { game, player });
                }
                Seating::CellTaken => {
                    warn!(game_id, attempt, "spawn cell taken concurrently; retrying");
                    last_refusal = Seating::CellTaken;
                }
                Seating::TurnInFlight => {
                    debug!(game_id, attempt, "turn resolving; delaying join");
                    last_refusal = Seating::TurnInFlight;
                    tokio::time::sleep(TURN_IN_FLIGHT_BACKOFF * (attempt + 1)).await;
                }
            }
        }

        match last_refusal {
            Seating::TurnInFlight => Err(GameError::TurnInProgress(game_id)),
            _ => Err(GameError::StorageFailure(format!(
                "no free cell could be claimed in game {game_id}"
            ))),
        }
    }
}
