//! Ready event handler for bot initialization.
//!
//! Fires once per connection after the gateway handshake. Used to log
//! connection information, set the activity, and bring the control panel up
//! to date with whatever sessions survived the restart.

use serenity::all::{ActivityData, Context, Ready};

use crate::bot::Handler;
use crate::service::panel::PanelService;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `handler` - Shared bot state
/// - `ctx` - Discord context for setting activity and publishing the panel
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(handler: &Handler, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::custom("Watching the custom VCs")));

    let panel = PanelService::new(&handler.db, &handler.config);
    if let Err(error) = panel.publish(&ctx, &handler.panel_message).await {
        tracing::error!("Failed to publish control panel on ready: {error:?}");
    }
}
