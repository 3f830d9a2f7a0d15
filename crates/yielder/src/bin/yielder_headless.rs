//! # Yielder Headless Runner
//!
//! Runs the cursor particle field off-screen, then exercises the persisted
//! dashboard state (favorites, wallet session) against the file store.
//!
//! Usage: `yielder_headless [config.toml]`

use std::process::ExitCode;
use std::sync::Arc;

use yielder::{init_tracing, run_headless, AppConfig, AppResult, DemoWalletProvider};
use yielder_storage::{FavoriteCategory, FavoritesStore, WalletKind, WalletSessionStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("yielder_headless: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AppResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    init_tracing(&config.logging)?;
    tracing::info!("Yielder headless runner v{}", env!("CARGO_PKG_VERSION"));

    let summary = run_headless(&config.field, &config.headless);
    println!(
        "particle field: {} frames, peak {} particles, {} spawned, {} expired, {} evicted, {} lit pixels",
        summary.frames,
        summary.peak_particles,
        summary.stats.spawned_total,
        summary.stats.expired_total,
        summary.stats.evicted_total,
        summary.lit_pixels,
    );

    let store = Arc::new(config.storage.open()?);
    tracing::info!(dir = %store.dir().display(), "using file store");

    let mut favorites = FavoritesStore::load(Arc::clone(&store));
    let member = favorites.toggle(FavoriteCategory::Pools, "XLM-USDC");
    println!(
        "favorites: XLM-USDC {} pools ({} favorites total)",
        if member { "added to" } else { "removed from" },
        favorites.total(),
    );

    let mut wallet = WalletSessionStore::restore(Arc::clone(&store));
    match wallet.session().cloned() {
        Some(session) => {
            println!("wallet: restored {} session {}", session.wallet_type, session.short_address());
        }
        None => {
            let provider = DemoWalletProvider::new(config.headless.demo_address.clone());
            match wallet.connect(&provider, WalletKind::Freighter).await {
                Ok(session) => println!("wallet: connected {}", session.short_address()),
                Err(e) => println!("wallet: not connected ({})", e.message()),
            }
        }
    }

    Ok(())
}
