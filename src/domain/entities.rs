// Domain-level game and player records plus their small value types.

use crate::domain::orders::Orders;
use std::fmt;

pub type GameId = u64;
pub type PlayerId = u64;

/// A board cell. `x` is the row (north is smaller), `y` is the column (east is larger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell one step along `facing`.
    pub fn step(self, facing: Facing) -> Self {
        let (dx, dy) = facing.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Cardinal direction a player points; drives both movement and firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    /// Clockwise order, used for rotation and random spawn facing.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    pub fn rotated_right(self) -> Self {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    pub fn rotated_left(self) -> Self {
        match self {
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
            Facing::East => Facing::North,
        }
    }

    /// Row/column delta of a single step.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Facing::North => (-1, 0),
            Facing::East => (0, 1),
            Facing::South => (1, 0),
            Facing::West => (0, -1),
        }
    }

    /// Single-letter code used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Facing::North => "N",
            Facing::East => "E",
            Facing::South => "S",
            Facing::West => "W",
        }
    }

    /// Arrow glyph used in the board matrix.
    pub fn glyph(self) -> char {
        match self {
            Facing::North => '^',
            Facing::East => '>',
            Facing::South => 'v',
            Facing::West => '<',
        }
    }
}

/// Per-player lifecycle within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    /// May submit orders for the current turn.
    Ready,
    /// Orders submitted; waiting for the turn to resolve.
    Waiting,
    Lost,
    Won,
    /// Left the game; permanent.
    Quit,
}

impl PlayerState {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerState::Ready => "ready",
            PlayerState::Waiting => "waiting",
            PlayerState::Lost => "lost",
            PlayerState::Won => "won",
            PlayerState::Quit => "quit",
        }
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authoritative game record. Players are stored alongside it by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub board_size: usize,
    /// Starts at 1 and increases by exactly one per resolved turn.
    pub turn: u64,
    /// False once somebody has won; terminal.
    pub active: bool,
    pub winner: Option<PlayerId>,
    /// True while a turn resolution holds this game's permit.
    pub processing: bool,
}

/// Fields supplied when creating a game; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub name: String,
    pub board_size: usize,
}

/// Summary row returned when listing games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameListing {
    pub id: GameId,
    pub name: String,
    pub active: bool,
    pub board_size: usize,
    pub player_count: usize,
    pub turn: u64,
}

/// Combat entity seated in a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub game_id: GameId,
    pub name: String,
    /// Cleared permanently when the player quits.
    pub position: Option<Position>,
    pub facing: Option<Facing>,
    /// At or below zero means eliminated; the record is kept for scoring.
    pub hp: i32,
    pub score: i32,
    pub orders: Orders,
    pub state: PlayerState,
    /// False once quit.
    pub active: bool,
}

impl Player {
    /// Still on the board (blocks movement and can be shot).
    pub fn is_on_board(&self) -> bool {
        self.state != PlayerState::Quit && self.position.is_some()
    }

    /// Allowed to execute orders this turn.
    pub fn can_act(&self) -> bool {
        self.active && self.hp > 0 && self.position.is_some() && self.facing.is_some()
    }

    /// Removes the player from the board. Repeated calls change nothing.
    pub fn leave(&mut self, orders_per_turn: usize) {
        if self.state == PlayerState::Quit {
            return;
        }
        self.state = PlayerState::Quit;
        self.orders = Orders::idle(orders_per_turn);
        self.active = false;
        self.position = None;
        self.facing = None;
    }
}

/// Fields supplied when seating a player; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub game_id: GameId,
    pub name: String,
    pub position: Position,
    pub facing: Facing,
    pub hp: i32,
    pub orders: Orders,
}

impl NewPlayer {
    pub fn into_player(self, id: PlayerId) -> Player {
        Player {
            id,
            game_id: self.game_id,
            name: self.name,
            position: Some(self.position),
            facing: Some(self.facing),
            hp: self.hp,
            score: 0,
            orders: self.orders,
            state: PlayerState::Ready,
            active: true,
        }
    }
}
