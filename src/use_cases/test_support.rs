use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::entities::{
    Facing, Game, GameId, GameListing, NewGame, NewPlayer, Player, PlayerId, PlayerState,
    Position,
};
use crate::domain::orders::Orders;
use crate::domain::ports::{GameRepository, RandomSource, Seating, TurnPermit};
use crate::interface_adapters::store::InMemoryGameStore;

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub find_game: bool,
    pub insert_player: bool,
    pub save_player: bool,
    pub commit_turn: bool,
}

// In-memory store with switchable failures for negative-path tests.
#[derive(Clone)]
pub(crate) struct FlakyStore {
    inner: InMemoryGameStore,
    failures: FailureFlags,
}

impl FlakyStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: InMemoryGameStore::new(),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) async fn game(&self, game_id: GameId) -> Game {
        self.inner
            .find_game(game_id)
            .await
            .expect("expected game lookup to succeed")
            .expect("expected game to exist")
    }

    pub(crate) async fn player(&self, player_id: PlayerId) -> Player {
        self.inner
            .find_player(player_id)
            .await
            .expect("expected player lookup to succeed")
            .expect("expected player to exist")
    }
}

#[async_trait]
impl GameRepository for FlakyStore {
    async fn create_game(&self, game: NewGame) -> Result<Game, String> {
        self.inner.create_game(game).await
    }

    async fn find_game(&self, game_id: GameId) -> Result<Option<Game>, String> {
        if self.failures.find_game {
            return Err("find_game failed".to_string());
        }
        self.inner.find_game(game_id).await
    }

    async fn list_games(&self) -> Result<Vec<GameListing>, String> {
        self.inner.list_games().await
    }

    async fn players_in_game(&self, game_id: GameId) -> Result<Vec<Player>, String> {
        self.inner.players_in_game(game_id).await
    }

    async fn find_player(&self, player_id: PlayerId) -> Result<Option<Player>, String> {
        self.inner.find_player(player_id).await
    }

    async fn insert_player(&self, player: NewPlayer) -> Result<Seating, String> {
        if self.failures.insert_player {
            return Err("insert_player failed".to_string());
        }
        self.inner.insert_player(player).await
    }

    async fn save_player(&self, player: &Player) -> Result<(), String> {
        if self.failures.save_player {
            return Err("save_player failed".to_string());
        }
        self.inner.save_player(player).await
    }

    async fn try_begin_turn(&self, game_id: GameId) -> Result<Option<TurnPermit>, String> {
        self.inner.try_begin_turn(game_id).await
    }

    async fn commit_turn(&self, game: &Game, players: &[Player]) -> Result<(), String> {
        if self.failures.commit_turn {
            return Err("commit_turn failed".to_string());
        }
        self.inner.commit_turn(game, players).await
    }
}

// Replays a fixed list of indices, wrapping around; clamps into range.
pub(crate) struct ScriptedRandom {
    picks: Vec<usize>,
    cursor: AtomicUsize,
}

impl ScriptedRandom {
    pub(crate) fn new(picks: Vec<usize>) -> Self {
        Self {
            picks,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn index(&self, upper: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let at = self.cursor.fetch_add(1, Ordering::Relaxed) % self.picks.len();
        self.picks[at].min(upper - 1)
    }
}

// Records every bound it was asked for; always picks the last index.
#[derive(Default)]
pub(crate) struct LastIndexRandom {
    pub bounds: Mutex<Vec<usize>>,
}

impl RandomSource for LastIndexRandom {
    fn index(&self, upper: usize) -> usize {
        self.bounds
            .lock()
            .expect("bounds mutex poisoned")
            .push(upper);
        upper - 1
    }
}

pub(crate) async fn seeded_game<R: GameRepository>(store: &R, board_size: usize) -> Game {
    store
        .create_game(NewGame {
            name: "arena".to_string(),
            board_size,
        })
        .await
        .expect("expected game to be created")
}

// Seats a player directly; `orders` of `Some` also marks them as submitted.
pub(crate) async fn seat<R: GameRepository>(
    store: &R,
    game_id: GameId,
    (x, y): (i32, i32),
    facing: Facing,
    orders: Option<&str>,
) -> Player {
    let seating = store
        .insert_player(NewPlayer {
            game_id,
            name: format!("pilot-{x}-{y}"),
            position: Position::new(x, y),
            facing,
            hp: 5,
            orders: Orders::idle(3),
        })
        .await
        .expect("expected insert to succeed");
    let mut player = match seating {
        Seating::Seated(player) => player,
        other => panic!("expected cell ({x}, {y}) to be free, got {other:?}"),
    };

    if let Some(orders) = orders {
        player.orders = Orders::normalize(orders, 3);
        player.state = PlayerState::Waiting;
        store
            .save_player(&player)
            .await
            .expect("expected save to succeed");
    }
    player
}
