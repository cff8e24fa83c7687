/// Hard upper bound on a board edge, whatever the configured maximum.
///
/// Keeps coordinates inside `i32` and the free-cell scan bounded.
pub const BOARD_SIZE_CEILING: usize = 1000;

/// Gameplay rules shared by every game on this server.
///
/// Keep this separate from runtime/server configuration (ports, log format, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Number of order codes a player submits per turn.
    pub orders_per_turn: usize,

    /// Hit points every player joins with.
    pub starting_hitpoints: i32,

    /// Smallest allowed board edge, in cells.
    pub min_board_size: usize,

    /// Largest allowed board edge, in cells.
    pub max_board_size: usize,

    /// Score that wins the game and ends it for everyone else.
    pub score_to_win: i32,

    /// Maximum number of seated (non-quit) players per game.
    pub players_per_game: usize,
}

impl Rules {
    /// Clamps a requested board size into the allowed range.
    pub fn clamp_board_size(&self, requested: i64) -> usize {
        let min = self.min_board_size.min(BOARD_SIZE_CEILING) as i64;
        let max = self
            .max_board_size
            .max(self.min_board_size)
            .min(BOARD_SIZE_CEILING) as i64;
        requested.clamp(min, max) as usize
    }

    /// Phases executed per turn.
    ///
    /// One more than `orders_per_turn`: the final phase reads past the
    /// normalized order string and is always idle.
    pub fn phases_per_turn(&self) -> usize {
        self.orders_per_turn + 1
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            orders_per_turn: 3,
            starting_hitpoints: 5,
            min_board_size: 10,
            max_board_size: 100,
            score_to_win: 10,
            players_per_game: 9,
        }
    }
}
