use tracing::{debug, info};

use crate::domain::entities::{Player, PlayerId, PlayerState};
use crate::domain::errors::GameError;
use crate::domain::orders::Orders;
use crate::domain::ports::GameRepository;
use crate::domain::turn::TurnEngine;
use crate::use_cases::resolve_turn::{Resolution, resolve_turn};

// Response returned by the submit orders use case.
#[derive(Debug)]
pub struct SubmittedOrders {
    /// Player record as stored after any resolution this call triggered.
    pub player: Player,
    pub resolution: Resolution,
}

// Order submission use case with injected dependencies.
pub struct SubmitOrdersUseCase<R> {
    pub repo: R,
    pub engine: TurnEngine,
}

impl<R> SubmitOrdersUseCase<R>
where
    R: GameRepository,
{
    /// Records a turn of orders for a `ready` player, then resolves the turn
    /// if that was the last outstanding submission.
    pub async fn execute(
        &self,
        player_id: PlayerId,
        raw_orders: &str,
    ) -> Result<SubmittedOrders, GameError> {
        let mut player = self.find_player(player_id).await?;
        if player.state != PlayerState::Ready {
            return Err(GameError::NotYourTurn {
                player_id,
                state: player.state,
            });
        }

        player.orders = Orders::normalize(raw_orders, self.engine.rules().orders_per_turn);
        player.state = PlayerState::Waiting;
        self.repo
            .save_player(&player)
            .await
            .map_err(GameError::StorageFailure)?;
        debug!(
            game_id = player.game_id,
            player_id,
            orders = %player.orders,
            "orders accepted"
        );

        let resolution = resolve_turn(&self.repo, &self.engine, player.game_id).await?;
        if resolution == Resolution::Deferred {
            info!(
                game_id = player.game_id,
                player_id, "turn resolution deferred to the request holding the permit"
            );
        }

        let player = self.find_player(player_id).await?;
        Ok(SubmittedOrders { player, resolution })
    }

    async fn find_player(&self, player_id: PlayerId) -> Result<Player, GameError> {
        self.repo
            .find_player(player_id)
            .await
            .map_err(GameError::StorageFailure)?
            .ok_or(GameError::PlayerNotFound(player_id))
    }
}
