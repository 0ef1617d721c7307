//! Command-line driver for the join dialog.
//!
//! Usage: `coinflip-join [data_dir] [index ...]`
//!
//! Reads `coinflip.toml`, `game.json` and `inventory.json` from `data_dir`
//! (default `data`), selects the given sorted-view indices, prints the
//! dialog view as JSON and attempts the join.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::runtime::Handle;
use tracing::{error, info, warn};

use coinflip_join::coinflip::ThresholdRange;
use coinflip_join::inventory::FileInventoryProvider;
use coinflip_join::notify::{TracingJoinAction, TracingNotifier};
use coinflip_join::{AppConfig, Game, JoinDialog, JoinError};

async fn load_game(path: &Path) -> Result<Game, String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse {:?}: {}", path, e))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("coinflip_join=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let data_dir = PathBuf::from(args.next().unwrap_or_else(|| "data".to_string()));

    let mut indices = Vec::new();
    for arg in args {
        match arg.parse::<usize>() {
            Ok(index) => indices.push(index),
            Err(_) => warn!("Skipping non-numeric index {:?}", arg),
        }
    }

    let config = match AppConfig::load_from_file(&data_dir.join("coinflip.toml")) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let game = match load_game(&data_dir.join("game.json")).await {
        Ok(game) => game,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Game {} has a pot of ${:.2}", game.id, game.pot_total());

    let inventory = FileInventoryProvider::new(data_dir.join("inventory.json"), Handle::current());
    let range = ThresholdRange::from_config(&config.coinflip);
    let notifier = TracingNotifier;
    let join_action = TracingJoinAction;

    let mut dialog = JoinDialog::new(&config, &range, &notifier, &join_action);
    dialog.open(&inventory);
    let snapshot = inventory.settled().await;

    for index in indices {
        if !dialog.select(&snapshot, index) {
            warn!("Index {} was not selected", index);
        }
    }

    let view = dialog.view(&snapshot, &game);
    match serde_json::to_string_pretty(&view) {
        Ok(json) => println!("{}", json),
        Err(e) => warn!("Failed to serialize view: {}", e),
    }

    match dialog.join(&snapshot, &game) {
        Ok(request) => {
            info!("Request {} submitted", request.id);
            ExitCode::SUCCESS
        }
        // Already reported through the notifier
        Err(JoinError::Rejected(_)) => ExitCode::from(2),
        Err(e) => {
            error!("Cannot join: {}", e);
            ExitCode::FAILURE
        }
    }
}
