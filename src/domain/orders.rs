// Order codes and per-phase order execution.

use crate::domain::board::Board;
use crate::domain::entities::{Facing, Player, PlayerId, Position};
use std::collections::HashSet;
use std::fmt;

/// A single order code.
///
/// Unknown codes are accepted and behave as `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// `F`: step one cell along the current facing.
    Forward,
    /// `R`: rotate 90 degrees clockwise.
    RotateRight,
    /// `L`: rotate 90 degrees counter-clockwise.
    RotateLeft,
    /// `X`: fire along the current facing.
    Fire,
    Idle,
}

impl Order {
    pub fn from_code(code: char) -> Self {
        match code {
            'F' => Order::Forward,
            'R' => Order::RotateRight,
            'L' => Order::RotateLeft,
            'X' => Order::Fire,
            _ => Order::Idle,
        }
    }
}

/// A player's pending order codes, normalized to the per-turn length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orders(String);

impl Orders {
    /// A full turn of `.` codes.
    pub fn idle(len: usize) -> Self {
        Self(".".repeat(len))
    }

    /// Uppercases `raw`, then truncates or pads it with `.` to exactly `len` codes.
    pub fn normalize(raw: &str, len: usize) -> Self {
        let mut codes: String = raw.chars().flat_map(char::to_uppercase).take(len).collect();
        let missing = len.saturating_sub(codes.chars().count());
        codes.extend(std::iter::repeat_n('.', missing));
        Self(codes)
    }

    /// Order for `phase`; anything past the end is idle.
    pub fn order_at(&self, phase: usize) -> Order {
        self.0
            .chars()
            .nth(phase)
            .map(Order::from_code)
            .unwrap_or(Order::Idle)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Orders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a single order did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderEffect {
    Moved { from: Position, to: Position },
    /// Forward move refused: wall or occupied destination.
    Blocked,
    Rotated(Facing),
    Hit { target: PlayerId, remaining_hp: i32 },
    /// Shot found nobody, or only an already eliminated player.
    Missed,
    Idle,
}

/// Applies orders for one phase against the board as it stood when the phase began.
pub struct OrderExecutor<'a> {
    board: &'a Board,
    // Cells entered earlier in this phase; they block later movers.
    arrivals: HashSet<Position>,
}

impl<'a> OrderExecutor<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            arrivals: HashSet::new(),
        }
    }

    /// Executes `order` for `players[actor]`. Firing may damage another entry in `players`.
    pub fn execute(&mut self, players: &mut [Player], actor: usize, order: Order) -> OrderEffect {
        let Some(player) = players.get(actor) else {
            return OrderEffect::Idle;
        };
        if !player.can_act() {
            return OrderEffect::Idle;
        }

        match order {
            Order::Forward => self.move_forward(&mut players[actor]),
            Order::RotateRight => rotate(&mut players[actor], Facing::rotated_right),
            Order::RotateLeft => rotate(&mut players[actor], Facing::rotated_left),
            Order::Fire => self.fire(players, actor),
            Order::Idle => OrderEffect::Idle,
        }
    }

    fn move_forward(&mut self, player: &mut Player) -> OrderEffect {
        let (Some(from), Some(facing)) = (player.position, player.facing) else {
            return OrderEffect::Idle;
        };

        let to = from.step(facing);
        if !self.board.is_in_bounds(to)
            || self.board.is_occupied(to)
            || self.arrivals.contains(&to)
        {
            return OrderEffect::Blocked;
        }

        player.position = Some(to);
        self.arrivals.insert(to);
        OrderEffect::Moved { from, to }
    }

    fn fire(&self, players: &mut [Player], actor: usize) -> OrderEffect {
        let shooter = &players[actor];
        let (Some(origin), Some(facing)) = (shooter.position, shooter.facing) else {
            return OrderEffect::Idle;
        };
        let shooter_id = shooter.id;

        let Some(target_id) = self.board.first_occupant_along_ray(origin, facing) else {
            return OrderEffect::Missed;
        };
        let Some(target_index) = players
            .iter()
            .position(|p| p.id == target_id && p.id != shooter_id)
        else {
            return OrderEffect::Missed;
        };

        let target = &mut players[target_index];
        if target.hp <= 0 {
            return OrderEffect::Missed;
        }
        target.hp -= 1;
        let remaining_hp = target.hp;

        players[actor].score += 1;
        OrderEffect::Hit {
            target: target_id,
            remaining_hp,
        }
    }
}

fn rotate(player: &mut Player, turn: fn(Facing) -> Facing) -> OrderEffect {
    match player.facing {
        Some(facing) => {
            let next = turn(facing);
            player.facing = Some(next);
            OrderEffect::Rotated(next)
        }
        None => OrderEffect::Idle,
    }
}
