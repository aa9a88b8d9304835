//! Voice state update handler.
//!
//! Every join, leave, and move in the guild lands here; the session service
//! decides what it means for the managed channels. Failures are logged and
//! dropped - reconciliation is convergent, so the next voice event for the
//! same channel repairs whatever this one could not finish.

use serenity::all::{Context, VoiceState};

use crate::bot::Handler;
use crate::service::panel::PanelService;
use crate::service::session::SessionService;

/// Handles a member's voice state changing.
///
/// # Arguments
/// - `handler` - Shared bot state
/// - `ctx` - Discord context
/// - `old` - Previous voice state, if the member was already tracked
/// - `new` - Current voice state
pub async fn handle_voice_state_update(
    handler: &Handler,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let service = SessionService::new(&handler.db, &handler.config);
    match service
        .handle_voice_state_update(&ctx, old.as_ref(), &new)
        .await
    {
        Ok(true) => {
            let panel = PanelService::new(&handler.db, &handler.config);
            if let Err(error) = panel.publish(&ctx, &handler.panel_message).await {
                tracing::error!("Failed to refresh control panel: {error:?}");
            }
        }
        Ok(false) => {}
        Err(error) => {
            tracing::error!("Failed to process voice state update: {error:?}");
        }
    }
}
