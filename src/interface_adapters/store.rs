use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::domain::entities::{
    Game, GameId, GameListing, NewGame, NewPlayer, Player, PlayerId, PlayerState,
};
use crate::domain::ports::{GameRepository, Seating, TurnPermit};

// In-memory repository adapter for games and players.
#[derive(Clone, Default)]
pub struct InMemoryGameStore {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Default)]
struct Tables {
    games: BTreeMap<GameId, GameRow>,
    players: BTreeMap<PlayerId, Player>,
    last_game_id: GameId,
    last_player_id: PlayerId,
}

struct GameRow {
    game: Game,
    // Shared with outstanding turn permits; the permit clears it on drop.
    processing: Arc<AtomicBool>,
}

impl GameRow {
    fn snapshot(&self) -> Game {
        Game {
            processing: self.processing.load(Ordering::Acquire),
            ..self.game.clone()
        }
    }
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// Quit is permanent: a stale copy never resurrects a player who left.
fn store_player(players: &mut BTreeMap<PlayerId, Player>, player: &Player) -> Result<(), String> {
    let stored = players
        .get_mut(&player.id)
        .ok_or_else(|| format!("player {} does not exist", player.id))?;
    if stored.state == PlayerState::Quit && player.state != PlayerState::Quit {
        return Ok(());
    }
    *stored = player.clone();
    Ok(())
}

#[async_trait]
impl GameRepository for InMemoryGameStore {
    async fn create_game(&self, game: NewGame) -> Result<Game, String> {
        let mut tables = self.tables.lock().await;
        tables.last_game_id += 1;
        let record = Game {
            id: tables.last_game_id,
            name: game.name,
            board_size: game.board_size,
            turn: 1,
            active: true,
            winner: None,
            processing: false,
        };
        tables.games.insert(
            record.id,
            GameRow {
                game: record.clone(),
                processing: Arc::new(AtomicBool::new(false)),
            },
        );
        Ok(record)
    }

    async fn find_game(&self, game_id: GameId) -> Result<Option<Game>, String> {
        let tables = self.tables.lock().await;
        Ok(tables.games.get(&game_id).map(GameRow::snapshot))
    }

    async fn list_games(&self) -> Result<Vec<GameListing>, String> {
        let tables = self.tables.lock().await;
        let listings = tables
            .games
            .values()
            .map(|row| GameListing {
                id: row.game.id,
                name: row.game.name.clone(),
                active: row.game.active,
                board_size: row.game.board_size,
                player_count: tables
                    .players
                    .values()
                    .filter(|p| p.game_id == row.game.id)
                    .count(),
                turn: row.game.turn,
            })
            .collect();
        Ok(listings)
    }

    async fn players_in_game(&self, game_id: GameId) -> Result<Vec<Player>, String> {
        let tables = self.tables.lock().await;
        Ok(tables
            .players
            .values()
            .filter(|p| p.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn find_player(&self, player_id: PlayerId) -> Result<Option<Player>, String> {
        let tables = self.tables.lock().await;
        Ok(tables.players.get(&player_id).cloned())
    }

    async fn insert_player(&self, player: NewPlayer) -> Result<Seating, String> {
        let mut tables = self.tables.lock().await;
        let row = tables
            .games
            .get(&player.game_id)
            .ok_or_else(|| format!("game {} does not exist", player.game_id))?;
        // Read under the table lock: a permit taken after this point reloads
        // players and sees the newcomer.
        if row.processing.load(Ordering::Acquire) {
            return Ok(Seating::TurnInFlight);
        }

        let taken = tables.players.values().any(|p| {
            p.game_id == player.game_id && p.is_on_board() && p.position == Some(player.position)
        });
        if taken {
            return Ok(Seating::CellTaken);
        }

        tables.last_player_id += 1;
        let record = player.into_player(tables.last_player_id);
        tables.players.insert(record.id, record.clone());
        Ok(Seating::Seated(record))
    }

    async fn save_player(&self, player: &Player) -> Result<(), String> {
        let mut tables = self.tables.lock().await;
        store_player(&mut tables.players, player)
    }

    async fn try_begin_turn(&self, game_id: GameId) -> Result<Option<TurnPermit>, String> {
        let tables = self.tables.lock().await;
        let row = tables
            .games
            .get(&game_id)
            .ok_or_else(|| format!("game {game_id} does not exist"))?;

        if row
            .processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(None);
        }

        let flag = row.processing.clone();
        Ok(Some(TurnPermit::new(game_id, move || {
            flag.store(false, Ordering::Release)
        })))
    }

    async fn commit_turn(&self, game: &Game, players: &[Player]) -> Result<(), String> {
        let mut tables = self.tables.lock().await;
        let row = tables
            .games
            .get_mut(&game.id)
            .ok_or_else(|| format!("game {} does not exist", game.id))?;
        row.game = Game {
            processing: false,
            ..game.clone()
        };

        for player in players {
            store_player(&mut tables.players, player)?;
        }
        Ok(())
    }
}
