//! Session lifecycle driven by voice-state updates.
//!
//! Joining an empty managed channel starts a session: the joiner becomes
//! owner, gets the owner grant applied, a welcome message with the moderation
//! picker, and the crown marker in the channel status. Leaving runs the
//! teardown ladder: owner left with members remaining releases the session
//! (ownership, approval mode, and grants all drop), last member out resets
//! the channel to its configured defaults, and a channel holding only exempt
//! read-aloud bots disconnects them first.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, Context, CreateMessage, EditMember, GetMessages, GuildChannel, GuildId, Member,
    UserId, VoiceState,
};

use crate::bot::ui;
use crate::config::Config;
use crate::data::room::RoomRepository;
use crate::error::AppError;
use crate::service::approval::ApprovalService;
use crate::service::block_list::BlockListService;
use crate::service::reconciler::{OwnerChange, ReconcileRequest, Reconciler};
use crate::service::status;

pub struct SessionService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> SessionService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Routes one voice-state update through the session lifecycle.
    ///
    /// # Returns
    /// - `Ok(true)` - Ownership changed somewhere; the control panel should
    ///   be re-rendered
    /// - `Ok(false)` - Nothing panel-relevant happened
    /// - `Err(AppError)` - Database or Discord failure; the next update for
    ///   the channel converges it again
    pub async fn handle_voice_state_update(
        &self,
        ctx: &Context,
        old: Option<&VoiceState>,
        new: &VoiceState,
    ) -> Result<bool, AppError> {
        let Some(guild_id) = new.guild_id.or_else(|| old.and_then(|o| o.guild_id)) else {
            return Ok(false);
        };
        let old_channel = old.and_then(|state| state.channel_id);
        let new_channel = new.channel_id;
        // Mute/deafen toggles arrive as updates within the same channel.
        if old_channel == new_channel {
            return Ok(false);
        }

        let mut panel_dirty = false;
        if let Some(channel_id) = old_channel {
            panel_dirty |= self
                .handle_leave(ctx, guild_id, channel_id, new.user_id)
                .await?;
        }
        if let Some(channel_id) = new_channel {
            panel_dirty |= self.handle_join(ctx, channel_id, new.user_id).await?;
        }
        Ok(panel_dirty)
    }

    async fn handle_join(
        &self,
        ctx: &Context,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Result<bool, AppError> {
        if self.config.is_managed(channel_id) {
            return self.handle_join_managed(ctx, channel_id, user_id).await;
        }
        let room = RoomRepository::new(self.db)
            .find_by_wait_channel_id(channel_id.get())
            .await?;
        if let Some(room) = room {
            // The wait-channel overwrites already hide the room from blocked
            // users, but a block added mid-wait must not produce a card.
            if let Some(owner_id) = room.owner_id {
                let blocked = BlockListService::new(self.db)
                    .is_blocked_by(UserId::new(owner_id), user_id)
                    .await?;
                if blocked {
                    return Ok(false);
                }
            }
            tracing::debug!("{user_id} entered the waiting room for {}", room.channel_id);
            ApprovalService::new(self.db, self.config)
                .post_join_request(ctx, ChannelId::new(room.channel_id), user_id)
                .await?;
        }
        Ok(false)
    }

    async fn handle_leave(
        &self,
        ctx: &Context,
        guild_id: GuildId,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Result<bool, AppError> {
        if self.config.is_managed(channel_id) {
            return self
                .handle_leave_managed(ctx, guild_id, channel_id, user_id)
                .await;
        }
        let room = RoomRepository::new(self.db)
            .find_by_wait_channel_id(channel_id.get())
            .await?;
        if let Some(room) = room {
            // A requester who gives up (or gets moved in) no longer needs a
            // pending card. Approved cards stay for later rejection.
            ApprovalService::new(self.db, self.config)
                .remove_pending_card(ctx, ChannelId::new(room.channel_id), user_id)
                .await?;
        }
        Ok(false)
    }

    /// First non-exempt member into an unowned managed channel becomes the
    /// session owner.
    async fn handle_join_managed(
        &self,
        ctx: &Context,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Result<bool, AppError> {
        let Some(channel) = channel_id.to_channel(ctx).await?.guild() else {
            return Ok(false);
        };
        let occupants = self.occupants(ctx, &channel)?;
        let solo = occupants.len() == 1 && occupants[0].user.id == user_id;
        if !solo || self.config.is_read_bot(user_id) || occupants[0].user.bot {
            return Ok(false);
        }
        let owner_name = occupants[0].display_name().to_string();

        tracing::info!("{user_id} starts a session in {channel_id}");
        Reconciler::new(self.db, self.config)
            .update_channel(
                ctx,
                &channel,
                ReconcileRequest::owner(OwnerChange::Assign(user_id)),
            )
            .await?;

        channel
            .id
            .send_message(
                &ctx.http,
                CreateMessage::new()
                    .embed(ui::welcome_embed(
                        self.config.bot_color,
                        channel.user_limit,
                        channel.bitrate,
                    ))
                    .components(ui::welcome_components()),
            )
            .await?;
        status::apply_owner_marker(ctx, &channel, &owner_name).await?;
        Ok(true)
    }

    async fn handle_leave_managed(
        &self,
        ctx: &Context,
        guild_id: GuildId,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Result<bool, AppError> {
        let Some(channel) = channel_id.to_channel(ctx).await?.guild() else {
            return Ok(false);
        };
        let members = channel.members(&ctx.cache).map_err(Box::new)?;
        let occupants: Vec<&Member> = members
            .iter()
            .filter(|member| !self.config.is_read_bot(member.user.id))
            .collect();

        if occupants.is_empty() {
            if !members.is_empty() {
                // Only exempt read-aloud bots are left; they never count as
                // members, so disconnect them and end the session.
                channel
                    .id
                    .send_message(
                        &ctx.http,
                        CreateMessage::new().embed(ui::bot_remain_embed(self.config.bot_color)),
                    )
                    .await?;
                for member in &members {
                    if let Err(error) = guild_id
                        .edit_member(
                            &ctx.http,
                            member.user.id,
                            EditMember::new().disconnect_member(),
                        )
                        .await
                    {
                        tracing::error!(
                            "Failed to disconnect read-aloud bot {}: {error:?}",
                            member.user.id
                        );
                    }
                }
            }
            tracing::info!("Session in {channel_id} ended, resetting channel");
            Reconciler::new(self.db, self.config)
                .reset_channel(ctx, &channel)
                .await?;
            status::clear_owner_marker(ctx, &channel).await?;
            self.cleanup_notices(ctx, &channel).await?;
            return Ok(true);
        }

        let stored = RoomRepository::new(self.db)
            .find_by_channel_id(channel_id.get())
            .await?;
        if stored.and_then(|room| room.owner_id) == Some(user_id.get()) {
            tracing::info!("Owner {user_id} left {channel_id} with members remaining");
            // Nobody is left to approve or moderate: approval mode, the
            // waiting room, and the per-member grants go with the owner.
            Reconciler::new(self.db, self.config)
                .update_channel(ctx, &channel, ReconcileRequest::release())
                .await?;
            channel
                .id
                .send_message(
                    &ctx.http,
                    CreateMessage::new()
                        .embed(ui::no_owner_embed(self.config.bot_color, user_id)),
                )
                .await?;
            status::clear_owner_marker(ctx, &channel).await?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Deletes our own session notices when they are all that remains of the
    /// recent history, so an unused channel looks untouched. Any human
    /// message in the window keeps the history and a disband notice is posted
    /// instead.
    async fn cleanup_notices(
        &self,
        ctx: &Context,
        channel: &GuildChannel,
    ) -> Result<(), AppError> {
        let bot_id = ctx.cache.current_user().id;
        let messages = channel
            .id
            .messages(&ctx.http, GetMessages::new().limit(10))
            .await?;

        let all_ours = !messages.is_empty()
            && messages.iter().all(|message| {
                message.author.id == bot_id
                    && message.embeds.first().is_some_and(|embed| {
                        ui::is_session_notice(
                            embed.title.as_deref(),
                            embed.footer.as_ref().map(|footer| footer.text.as_str()),
                        )
                    })
            });

        if all_ours {
            for message in messages {
                if let Err(error) = message.delete(&ctx.http).await {
                    tracing::error!("Failed to delete session notice {}: {error:?}", message.id);
                }
            }
        } else {
            channel
                .id
                .send_message(
                    &ctx.http,
                    CreateMessage::new().embed(ui::disband_embed(self.config.bot_color)),
                )
                .await?;
        }
        Ok(())
    }

    fn occupants(&self, ctx: &Context, channel: &GuildChannel) -> Result<Vec<Member>, AppError> {
        let members = channel.members(&ctx.cache).map_err(Box::new)?;
        Ok(members
            .into_iter()
            .filter(|member| !self.config.is_read_bot(member.user.id))
            .collect())
    }
}
