pub mod command;
pub mod handler;
pub mod start;
pub mod ui;

use std::sync::{Arc, Mutex};

use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, Interaction, MessageId, Ready, VoiceState};
use serenity::async_trait;

use crate::config::Config;
use crate::service::selection::SelectionStore;

/// Discord bot event handler.
///
/// Holds the shared state every event needs: the database connection, the
/// validated configuration, the pending picker selections, and the id of a
/// control panel posted this run when none is configured.
pub struct Handler {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub selections: SelectionStore,
    pub panel_message: Mutex<Option<MessageId>>,
}

impl Handler {
    pub fn new(db: DatabaseConnection, config: Arc<Config>) -> Self {
        Self {
            db,
            config,
            selections: SelectionStore::new(),
            panel_message: Mutex::new(None),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        handler::ready::handle_ready(self, ctx, ready).await;
    }

    /// Called when any member's voice state changes
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        handler::voice::handle_voice_state_update(self, ctx, old, new).await;
    }

    /// Called for component and modal interactions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        handler::interaction::handle_interaction(self, ctx, interaction).await;
    }
}
