pub mod games;
pub mod players;

pub use games::{create_game, get_game, join_game, list_games, tick_game};
pub use players::{get_player, leave_game, submit_orders};
