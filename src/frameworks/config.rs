use std::{env, net::IpAddr, str::FromStr};

use crate::domain::rules::{BOARD_SIZE_CEILING, Rules};

// Runtime/server settings, then gameplay overrides.

pub fn http_port() -> u16 {
    env_or("ROBOTS_SERVER_PORT", 4567)
}

pub fn bind_addr() -> IpAddr {
    env_or("ROBOTS_BIND_ADDR", IpAddr::from([127, 0, 0, 1]))
}

// Game rules with any env overrides applied over the defaults.
pub fn rules() -> Rules {
    let defaults = Rules::default();
    let rules = Rules {
        orders_per_turn: env_or("ROBOTS_ORDERS_PER_TURN", defaults.orders_per_turn),
        starting_hitpoints: env_or("ROBOTS_STARTING_HITPOINTS", defaults.starting_hitpoints),
        score_to_win: env_or("ROBOTS_SCORE_TO_WIN", defaults.score_to_win),
        players_per_game: env_or("ROBOTS_PLAYERS_PER_GAME", defaults.players_per_game),
        min_board_size: env_or("ROBOTS_MIN_BOARD_SIZE", defaults.min_board_size),
        max_board_size: env_or("ROBOTS_MAX_BOARD_SIZE", defaults.max_board_size),
    };
    sanitize(rules, defaults)
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(env::var(key).ok().as_deref(), default)
}

fn parse_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

// Overrides that would make the rules unusable fall back to defaults.
fn sanitize(mut rules: Rules, defaults: Rules) -> Rules {
    if rules.orders_per_turn == 0 {
        rules.orders_per_turn = defaults.orders_per_turn;
    }
    if rules.starting_hitpoints <= 0 {
        rules.starting_hitpoints = defaults.starting_hitpoints;
    }
    if rules.score_to_win <= 0 {
        rules.score_to_win = defaults.score_to_win;
    }
    if rules.players_per_game == 0 {
        rules.players_per_game = defaults.players_per_game;
    }
    if rules.max_board_size > BOARD_SIZE_CEILING {
        tracing::warn!(
            requested = rules.max_board_size,
            ceiling = BOARD_SIZE_CEILING,
            "max board size capped"
        );
        rules.max_board_size = BOARD_SIZE_CEILING;
    }
    if rules.min_board_size == 0 || rules.min_board_size > rules.max_board_size {
        rules.min_board_size = defaults.min_board_size;
        rules.max_board_size = defaults.max_board_size;
    }
    rules
}
