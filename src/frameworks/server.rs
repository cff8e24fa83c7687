// Framework bootstrap for the robots game server.

use crate::frameworks::config;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::AppState;

use std::net::SocketAddr;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    // A missing .env is normal outside local development.
    let _ = dotenvy::dotenv();
    init_tracing(LogFormat::from_env());
    install_panic_hook();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Compact,
        }
    }
}

fn init_tracing(format: LogFormat) {
    // RUST_LOG wins; otherwise lifecycle events at info, per-order effects
    // need `robots_server=debug`.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().with_current_span(true).init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

// Panics inside handlers would otherwise only reach stderr.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let rules = config::rules();
    tracing::debug!(
        orders_per_turn = rules.orders_per_turn,
        players_per_game = rules.players_per_game,
        score_to_win = rules.score_to_win,
        "rules configured"
    );

    let state = Arc::new(AppState::new(rules));
    let router = app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, router).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::new(config::bind_addr(), config::http_port());

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}
