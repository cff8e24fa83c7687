// Grid geometry and occupancy view for a single game.

use crate::domain::entities::{Facing, Player, PlayerId, Position};
use std::collections::HashMap;

/// One board cell as shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Occupied {
        player_id: PlayerId,
        facing: Facing,
        eliminated: bool,
    },
}

impl Cell {
    /// `.` when empty, otherwise the player id followed by a facing arrow
    /// (`*` once the player is out of hit points).
    pub fn label(&self) -> String {
        match self {
            Cell::Empty => ".".to_string(),
            Cell::Occupied {
                player_id,
                facing,
                eliminated,
            } => {
                let glyph = if *eliminated { '*' } else { facing.glyph() };
                format!("{player_id}{glyph}")
            }
        }
    }
}

/// Read-only occupancy index over the players still on the board.
///
/// Built from authoritative player positions; never mutated in place.
#[derive(Debug, Clone)]
pub struct Board {
    size: i32,
    occupants: HashMap<Position, PlayerId>,
}

impl Board {
    pub fn new<'a, I>(size: usize, players: I) -> Self
    where
        I: IntoIterator<Item = &'a Player>,
    {
        let occupants = players
            .into_iter()
            .filter(|p| p.is_on_board())
            .filter_map(|p| p.position.map(|pos| (pos, p.id)))
            .collect();

        Self {
            size: size as i32,
            occupants,
        }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        (0..self.size).contains(&pos.x) && (0..self.size).contains(&pos.y)
    }

    pub fn occupant_at(&self, pos: Position) -> Option<PlayerId> {
        self.occupants.get(&pos).copied()
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.occupants.contains_key(&pos)
    }

    /// Nearest occupant strictly beyond `origin` along `facing`.
    pub fn first_occupant_along_ray(&self, origin: Position, facing: Facing) -> Option<PlayerId> {
        let mut cursor = origin.step(facing);
        while self.is_in_bounds(cursor) {
            if let Some(id) = self.occupant_at(cursor) {
                return Some(id);
            }
            cursor = cursor.step(facing);
        }
        None
    }

    /// All in-bounds cells with no occupant, in row-major order.
    pub fn free_cells(&self) -> Vec<Position> {
        (0..self.size)
            .flat_map(|x| (0..self.size).map(move |y| Position::new(x, y)))
            .filter(|pos| !self.is_occupied(*pos))
            .collect()
    }

    /// Row-major cell matrix. Player details come from `players`; ids without a
    /// matching record render as empty.
    pub fn cells(&self, players: &[Player]) -> Vec<Vec<Cell>> {
        let by_id: HashMap<PlayerId, &Player> = players.iter().map(|p| (p.id, p)).collect();

        (0..self.size)
            .map(|x| {
                (0..self.size)
                    .map(|y| {
                        self.occupant_at(Position::new(x, y))
                            .and_then(|id| by_id.get(&id))
                            .and_then(|p| {
                                p.facing.map(|facing| Cell::Occupied {
                                    player_id: p.id,
                                    facing,
                                    eliminated: p.hp <= 0,
                                })
                            })
                            .unwrap_or(Cell::Empty)
                    })
                    .collect()
            })
            .collect()
    }

    /// Row-major matrix of cell labels.
    pub fn render(&self, players: &[Player]) -> Vec<Vec<String>> {
        self.cells(players)
            .iter()
            .map(|row| row.iter().map(Cell::label).collect())
            .collect()
    }
}
