//! Authorization for control-panel operations.
//!
//! Every panel operation acts on the managed channel the acting user is
//! currently connected to. The stored session owner is the authority: the
//! owner may always operate, and ownerless operations (claiming a channel
//! whose owner is gone) are allowed only where the caller opts in.

use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, Context, GuildChannel, GuildId, UserId};

use crate::config::Config;
use crate::data::room::RoomRepository;
use crate::error::AppError;

/// Resolves the managed voice channel an operation applies to and checks the
/// acting user may operate it.
///
/// # Arguments
/// - `allow_ownerless` - Permit the operation when the session has no owner
///   or the stored owner is no longer connected (used by ownership transfer
///   so a successor can claim an abandoned channel)
///
/// # Returns
/// - `Ok(GuildChannel)` - The managed channel the user is connected to
/// - `Err(AppError::Unauthorized)` - User is not in a managed channel, or is
///   not allowed to operate it
pub async fn connected_editable_channel(
    ctx: &Context,
    db: &DatabaseConnection,
    config: &Config,
    guild_id: GuildId,
    user_id: UserId,
    allow_ownerless: bool,
) -> Result<GuildChannel, AppError> {
    let Some(channel_id) = connected_channel(ctx, guild_id, user_id) else {
        return Err(AppError::Unauthorized(
            "Join a custom VC first, then use the control panel.".to_string(),
        ));
    };
    if !config.is_managed(channel_id) {
        return Err(AppError::Unauthorized(
            "The channel you are in is not a custom VC.".to_string(),
        ));
    }

    let room = RoomRepository::new(db)
        .find_by_channel_id(channel_id.get())
        .await?;
    let owner = room.and_then(|room| room.owner_id).map(UserId::new);

    let authorized = match owner {
        Some(owner_id) if owner_id == user_id => true,
        Some(owner_id) => {
            allow_ownerless && connected_channel(ctx, guild_id, owner_id) != Some(channel_id)
        }
        None => allow_ownerless,
    };
    if !authorized {
        return Err(AppError::Unauthorized(
            "Only the channel owner can do that.".to_string(),
        ));
    }

    let channel = channel_id
        .to_channel(ctx)
        .await?
        .guild()
        .ok_or_else(|| AppError::NotFound("The channel no longer exists.".to_string()))?;
    Ok(channel)
}

/// The voice channel a user is currently connected to, from the cache.
pub fn connected_channel(ctx: &Context, guild_id: GuildId, user_id: UserId) -> Option<ChannelId> {
    let guild = ctx.cache.guild(guild_id)?;
    guild
        .voice_states
        .get(&user_id)
        .and_then(|state| state.channel_id)
}
