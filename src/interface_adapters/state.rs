use rand::Rng;

use crate::domain::ports::RandomSource;
use crate::domain::rules::Rules;
use crate::domain::turn::TurnEngine;
use crate::interface_adapters::store::InMemoryGameStore;

// Shared application state for the HTTP handlers.
pub struct AppState {
    pub store: InMemoryGameStore,
    pub rules: Rules,
}

impl AppState {
    pub fn new(rules: Rules) -> Self {
        Self {
            store: InMemoryGameStore::new(),
            rules,
        }
    }

    pub fn engine(&self) -> TurnEngine {
        TurnEngine::new(self.rules)
    }
}

// Thread-local RNG adapter used when seating players.
#[derive(Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}
