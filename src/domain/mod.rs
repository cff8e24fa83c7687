// Domain layer: board geometry, combat rules and the turn engine.

pub mod board;
pub mod entities;
pub mod errors;
pub mod orders;
pub mod ports;
pub mod rules;
pub mod turn;

pub use board::{Board, Cell};
pub use entities::{
    Facing, Game, GameId, GameListing, NewGame, NewPlayer, Player, PlayerId, PlayerState, Position,
};
pub use errors::GameError;
pub use orders::{Order, OrderEffect, OrderExecutor, Orders};
pub use ports::{GameRepository, RandomSource, Seating, TurnPermit};
pub use rules::Rules;
pub use turn::{TurnEngine, TurnOutcome};
