// Turn resolution: eligibility, the phase loop and end-of-turn transitions.

use crate::domain::board::Board;
use crate::domain::entities::{Game, Player, PlayerId, PlayerState};
use crate::domain::orders::{OrderEffect, OrderExecutor};
use crate::domain::rules::Rules;
use tracing::debug;

/// Summary of one resolved turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Turn counter after resolution.
    pub turn: u64,
    pub moves: u32,
    pub hits: u32,
    /// Players who moved to `lost` because their hit points ran out.
    pub eliminated: Vec<PlayerId>,
    pub winner: Option<PlayerId>,
    /// True when this turn ended the game.
    pub ended: bool,
}

/// Drives the per-game turn state machine over an in-memory snapshot.
///
/// The caller is responsible for holding the game's turn permit while
/// `resolve` runs and for committing the mutated records afterwards.
#[derive(Debug, Clone, Copy)]
pub struct TurnEngine {
    rules: Rules,
}

impl TurnEngine {
    pub fn new(rules: Rules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// True when every seated player has submitted and nothing else is resolving.
    pub fn is_eligible(&self, game: &Game, players: &[Player]) -> bool {
        !game.processing && self.orders_complete(game, players)
    }

    /// True when the game is live and every seated player has submitted.
    ///
    /// Seated players who already lost or won never need to submit again.
    /// Ignores the processing flag so a permit holder can re-check fresh state.
    pub fn orders_complete(&self, game: &Game, players: &[Player]) -> bool {
        if !game.active {
            return false;
        }

        let mut any_waiting = false;
        for player in players.iter().filter(|p| p.active) {
            match player.state {
                PlayerState::Ready => return false,
                PlayerState::Waiting => any_waiting = true,
                PlayerState::Lost | PlayerState::Won | PlayerState::Quit => {}
            }
        }
        any_waiting
    }

    /// Runs every phase, advances the turn counter and applies win/loss transitions.
    ///
    /// `players` must belong to `game`. They are processed in id-ascending
    /// order regardless of the order they are passed in.
    pub fn resolve(&self, game: &mut Game, players: &mut [Player]) -> TurnOutcome {
        players.sort_by_key(|p| p.id);
        let mut outcome = TurnOutcome::default();

        for phase in 0..self.rules.phases_per_turn() {
            let board = Board::new(game.board_size, players.iter());
            let mut executor = OrderExecutor::new(&board);

            for actor in 0..players.len() {
                if !players[actor].active {
                    continue;
                }
                let order = players[actor].orders.order_at(phase);
                let effect = executor.execute(players, actor, order);
                match effect {
                    OrderEffect::Moved { .. } => outcome.moves += 1,
                    OrderEffect::Hit { .. } => outcome.hits += 1,
                    _ => {}
                }
                if effect != OrderEffect::Idle {
                    debug!(
                        game_id = game.id,
                        player_id = players[actor].id,
                        phase,
                        ?order,
                        ?effect,
                        "order executed"
                    );
                }
            }
        }

        game.turn += 1;
        outcome.turn = game.turn;

        for player in players.iter_mut() {
            if player.state != PlayerState::Waiting {
                continue;
            }
            player.state = if player.hp <= 0 {
                outcome.eliminated.push(player.id);
                PlayerState::Lost
            } else if player.score >= self.rules.score_to_win {
                game.winner = Some(player.id);
                PlayerState::Won
            } else {
                PlayerState::Ready
            };
        }

        if game.winner.is_some() {
            for player in players.iter_mut() {
                let settled = matches!(player.state, PlayerState::Won | PlayerState::Quit);
                if !settled && player.score < self.rules.score_to_win {
                    player.state = PlayerState::Lost;
                }
            }
            game.active = false;
            outcome.ended = true;
        }
        outcome.winner = game.winner;

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Facing, NewPlayer, Position};
    use crate::domain::orders::Orders;

    fn game() -> Game {
        Game {
            id: 1,
            name: "arena".to_string(),
            board_size: 10,
            turn: 1,
            active: true,
            winner: None,
            processing: false,
        }
    }

    fn player(id: PlayerId, x: i32, y: i32, facing: Facing, orders: &str) -> Player {
        let mut player = NewPlayer {
            game_id: 1,
            name: format!("p{id}"),
            position: Position::new(x, y),
            facing,
            hp: 5,
            orders: Orders::normalize(orders, 3),
        }
        .into_player(id);
        player.state = PlayerState::Waiting;
        player
    }

    #[test]
    fn when_any_seated_player_is_still_ready_then_turn_is_not_eligible() {
        let engine = TurnEngine::new(Rules::default());
        let mut players = vec![
            player(1, 0, 0, Facing::South, "XXX"),
            player(2, 5, 0, Facing::North, "..."),
        ];
        players[1].state = PlayerState::Ready;

        assert!(!engine.is_eligible(&game(), &players));
    }

    #[test]
    fn when_everyone_waiting_or_finished_then_turn_is_eligible() {
        let engine = TurnEngine::new(Rules::default());
        let mut players = vec![
            player(1, 0, 0, Facing::South, "XXX"),
            player(2, 5, 0, Facing::North, "..."),
            player(3, 9, 9, Facing::North, "..."),
        ];
        players[1].state = PlayerState::Lost;
        players[2].leave(3);

        assert!(engine.is_eligible(&game(), &players));
    }

    #[test]
    fn when_game_is_processing_or_ended_then_turn_is_not_eligible() {
        let engine = TurnEngine::new(Rules::default());
        let players = vec![player(1, 0, 0, Facing::South, "XXX")];

        let mut busy = game();
        busy.processing = true;
        let mut ended = game();
        ended.active = false;

        assert!(!engine.is_eligible(&busy, &players));
        assert!(!engine.is_eligible(&ended, &players));
    }

    #[test]
    fn when_nobody_has_submitted_then_turn_is_not_eligible() {
        let engine = TurnEngine::new(Rules::default());
        let mut players = vec![player(1, 0, 0, Facing::South, "XXX")];
        players[0].state = PlayerState::Lost;

        assert!(!engine.is_eligible(&game(), &players));
    }

    #[test]
    fn when_shooter_faces_defender_then_every_shot_lands() {
        let engine = TurnEngine::new(Rules::default());
        let mut game = game();
        let mut players = vec![
            player(1, 0, 0, Facing::South, "XXX"),
            player(2, 5, 0, Facing::East, "..."),
        ];

        let outcome = engine.resolve(&mut game, &mut players);

        assert_eq!(outcome.hits, 3);
        assert_eq!(outcome.turn, 2);
        assert_eq!(game.turn, 2);
        assert_eq!(players[0].score, 3);
        assert_eq!(players[0].hp, 5);
        assert_eq!(players[1].hp, 2);
        assert_eq!(players[1].score, 0);
        assert_eq!(players[0].state, PlayerState::Ready);
        assert_eq!(players[1].state, PlayerState::Ready);
    }

    #[test]
    fn when_defender_steps_out_of_line_then_later_shots_miss() {
        let engine = TurnEngine::new(Rules::default());
        let mut game = game();
        let mut players = vec![
            player(1, 0, 0, Facing::South, "XXX"),
            player(2, 5, 0, Facing::East, "F.."),
        ];

        let outcome = engine.resolve(&mut game, &mut players);

        // Only the phase 0 shot lands; the board is rebuilt after the defender moves.
        assert_eq!(outcome.hits, 1);
        assert_eq!(players[1].hp, 4);
        assert_eq!(players[1].position, Some(Position::new(5, 1)));
    }

    #[test]
    fn lower_id_wins_a_simultaneous_final_exchange() {
        let engine = TurnEngine::new(Rules::default());
        let mut game = game();
        let mut players = vec![
            player(2, 5, 0, Facing::North, "X.."),
            player(1, 0, 0, Facing::South, "X.."),
        ];
        for p in players.iter_mut() {
            p.hp = 1;
        }

        let outcome = engine.resolve(&mut game, &mut players);

        // Sorted by id: player 1 fires first and player 2 never gets to act.
        assert_eq!(players[0].id, 1);
        assert_eq!(players[0].hp, 1);
        assert_eq!(players[0].score, 1);
        assert_eq!(players[1].hp, 0);
        assert_eq!(players[1].score, 0);
        assert_eq!(players[1].state, PlayerState::Lost);
        assert_eq!(outcome.eliminated, vec![2]);
    }

    #[test]
    fn when_score_reaches_the_target_then_game_ends_with_a_winner() {
        let engine = TurnEngine::new(Rules::default());
        let mut game = game();
        let mut players = vec![
            player(1, 0, 0, Facing::South, "X.."),
            player(2, 5, 0, Facing::East, "..."),
            player(3, 9, 9, Facing::West, "..."),
        ];
        players[0].score = 9;
        players[2].leave(3);

        let outcome = engine.resolve(&mut game, &mut players);

        assert_eq!(outcome.winner, Some(1));
        assert!(outcome.ended);
        assert!(!game.active);
        assert_eq!(game.winner, Some(1));
        assert_eq!(players[0].state, PlayerState::Won);
        assert_eq!(players[1].state, PlayerState::Lost);
        assert_eq!(players[2].state, PlayerState::Quit);
    }

    #[test]
    fn four_right_rotations_across_turns_restore_facing() {
        let engine = TurnEngine::new(Rules::default());
        let mut game = game();
        let mut players = vec![player(1, 4, 4, Facing::West, "RRR")];

        engine.resolve(&mut game, &mut players);
        players[0].orders = Orders::normalize("R", 3);
        players[0].state = PlayerState::Waiting;
        engine.resolve(&mut game, &mut players);

        assert_eq!(players[0].facing, Some(Facing::West));
        assert_eq!(game.turn, 3);
    }

    #[test]
    fn quit_players_keep_their_state_through_resolution() {
        let engine = TurnEngine::new(Rules::default());
        let mut game = game();
        let mut players = vec![
            player(1, 0, 0, Facing::South, "FFF"),
            player(2, 5, 0, Facing::North, "XXX"),
        ];
        players[1].leave(3);

        engine.resolve(&mut game, &mut players);

        assert_eq!(players[0].position, Some(Position::new(3, 0)));
        assert_eq!(players[1].state, PlayerState::Quit);
        assert_eq!(players[1].position, None);
        assert_eq!(players[0].hp, 5);
    }
}
