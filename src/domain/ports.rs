use async_trait::async_trait;
use std::fmt;

use crate::domain::entities::{Game, GameId, GameListing, NewGame, NewPlayer, Player, PlayerId};

/// Outcome of asking the repository to seat a new player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seating {
    Seated(Player),
    CellTaken,
    // The resolver's snapshot would not include the newcomer.
    TurnInFlight,
}

// Port for game and player persistence used by the use cases.
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_game(&self, game: NewGame) -> Result<Game, String>;
    async fn find_game(&self, game_id: GameId) -> Result<Option<Game>, String>;
    async fn list_games(&self) -> Result<Vec<GameListing>, String>;

    /// Every player ever seated in the game, id ascending.
    async fn players_in_game(&self, game_id: GameId) -> Result<Vec<Player>, String>;
    async fn find_player(&self, player_id: PlayerId) -> Result<Option<Player>, String>;

    /// Seats a new player. Refuses while the requested cell is held by a
    /// player on the board or a turn is resolving, checked atomically.
    async fn insert_player(&self, player: NewPlayer) -> Result<Seating, String>;

    /// Persists a single player. A stored player who has quit stays quit.
    async fn save_player(&self, player: &Player) -> Result<(), String>;

    /// Atomically flips the game's processing flag from false to true.
    /// Returns `Ok(None)` when another resolution already holds it.
    async fn try_begin_turn(&self, game_id: GameId) -> Result<Option<TurnPermit>, String>;

    /// Persists a resolved turn: the game record and every player in `players`.
    /// A stored player who has quit stays quit.
    async fn commit_turn(&self, game: &Game, players: &[Player]) -> Result<(), String>;
}

// Port for the randomness used when seating players.
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..upper`. `upper` is never zero.
    fn index(&self, upper: usize) -> usize;
}

/// Scoped ownership of a game's processing flag.
///
/// Dropping the permit clears the flag, so the flag is released on every exit
/// path, including early returns and unwinding.
pub struct TurnPermit {
    game_id: GameId,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl TurnPermit {
    pub fn new(game_id: GameId, release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            game_id,
            release: Some(Box::new(release)),
        }
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }
}

impl fmt::Debug for TurnPermit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnPermit")
            .field("game_id", &self.game_id)
            .finish_non_exhaustive()
    }
}

impl Drop for TurnPermit {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
