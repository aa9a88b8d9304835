//! Custom voice channel manager bot.
//!
//! Watches a configured set of voice channels and automates their session
//! lifecycle: the first member in becomes the owner, the owner gets a control
//! panel for limits, bitrate, block-lists, and approval-gated entry through a
//! paired waiting room, and everything resets when the channel empties.

mod bot;
mod config;
mod data;
mod error;
mod model;
mod service;
mod startup;

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::load(Path::new("config.toml")) {
        Ok(config) => Arc::new(config),
        Err(error) => {
            tracing::error!("Configuration error: {error}");
            std::process::exit(1);
        }
    };

    let db = match startup::connect_to_database(&config).await {
        Ok(db) => db,
        Err(error) => {
            tracing::error!("Database error: {error}");
            std::process::exit(1);
        }
    };

    if let Err(error) = bot::start::start_bot(config, db).await {
        tracing::error!("Discord bot error: {error}");
        std::process::exit(1);
    }
}
