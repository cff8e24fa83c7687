// Use cases layer: application workflows for the game server.

pub mod create_game;
pub mod game_snapshot;
pub mod join_game;
pub mod leave_game;
pub mod queries;
pub mod resolve_turn;
pub mod submit_orders;
pub mod tick_game;

#[cfg(test)]
pub(crate) mod test_support;

pub use game_snapshot::GameSnapshot;
pub use resolve_turn::Resolution;
