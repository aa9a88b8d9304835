//! Approval-gated entry via paired waiting rooms.
//!
//! When approval mode is on, a managed channel gets a paired waiting-room
//! voice channel placed directly above it. Members join the waiting room,
//! which posts a request card into the managed channel; the owner approves,
//! rejects, or blocks from the card's buttons. Cards are found again by their
//! footer marker and requester mention in the recent channel history, so no
//! message ids need to be stored.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, ChannelType, Context, CreateChannel, CreateMessage, EditChannel, EditMember,
    EditMessage, GetMessages, GuildChannel, GuildId, Message, PermissionOverwrite,
    PermissionOverwriteType, Permissions, RoleId, UserId,
};

use crate::bot::ui;
use crate::config::Config;
use crate::data::room::RoomRepository;
use crate::error::AppError;
use crate::model::Room;
use crate::service::access;
use crate::service::permission::{self, WAIT_EVERYONE_DENY};

/// How far back request cards are searched in the managed channel.
const CARD_LOOKBACK: u8 = 10;

pub struct ApprovalService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> ApprovalService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Converges the waiting-room pairing on the approval flag: creates the
    /// waiting room when approval turns on, refreshes its overwrites while it
    /// stays on (blocked users must not see it either), and deletes it when
    /// approval turns off.
    pub async fn reconcile_wait_channel(
        &self,
        ctx: &Context,
        channel: &GuildChannel,
        blocked: &[UserId],
        inherited: &[PermissionOverwrite],
        approval: bool,
        room: Room,
    ) -> Result<Room, AppError> {
        let rooms = RoomRepository::new(self.db);
        let everyone_role = RoleId::new(channel.guild_id.get());

        match (approval, room.wait_channel_id) {
            (true, None) => {
                let mut builder = CreateChannel::new(ui::WAIT_CHANNEL_NAME)
                    .kind(ChannelType::Voice)
                    .position(channel.position.saturating_sub(1))
                    .permissions(wait_overwrites(everyone_role, blocked, inherited));
                if let Some(parent_id) = channel.parent_id {
                    builder = builder.category(parent_id);
                }
                let wait = channel.guild_id.create_channel(&ctx.http, builder).await?;
                let room = rooms
                    .set_wait_channel(channel.id.get(), Some(wait.id.get()))
                    .await?;
                Ok(room)
            }
            (true, Some(wait_channel_id)) => {
                let wait_id = ChannelId::new(wait_channel_id);
                wait_id
                    .edit(
                        &ctx.http,
                        EditChannel::new()
                            .permissions(wait_overwrites(everyone_role, blocked, inherited)),
                    )
                    .await?;
                kick_blocked_waiters(ctx, wait_id, blocked).await;
                Ok(room)
            }
            (false, Some(wait_channel_id)) => {
                // Clear the pairing even if the delete fails: a half-deleted
                // waiting room must not keep resurrecting the approval state.
                if let Err(error) = ChannelId::new(wait_channel_id).delete(&ctx.http).await {
                    tracing::error!(
                        "Failed to delete waiting room {wait_channel_id}: {error:?}"
                    );
                }
                let room = rooms.set_wait_channel(channel.id.get(), None).await?;
                Ok(room)
            }
            (false, None) => Ok(room),
        }
    }

    /// Posts a join-request card into the managed channel for a member who
    /// just entered its waiting room.
    pub async fn post_join_request(
        &self,
        ctx: &Context,
        channel_id: ChannelId,
        requester: UserId,
    ) -> Result<(), AppError> {
        channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new()
                    .embed(ui::request_card_embed(
                        self.config.bot_color,
                        requester,
                        false,
                    ))
                    .components(vec![ui::request_card_buttons()]),
            )
            .await?;
        Ok(())
    }

    /// Deletes the pending (not yet approved) request card for a requester,
    /// if one is in the recent history. Approved cards are kept so the owner
    /// can still reject later.
    pub async fn remove_pending_card(
        &self,
        ctx: &Context,
        channel_id: ChannelId,
        requester: UserId,
    ) -> Result<(), AppError> {
        let bot_id = ctx.cache.current_user().id;
        let messages = channel_id
            .messages(&ctx.http, GetMessages::new().limit(CARD_LOOKBACK))
            .await?;
        for message in messages {
            if message.author.id != bot_id {
                continue;
            }
            if card_requester(&message) == Some(requester) && !card_is_done(&message) {
                message.delete(&ctx.http).await?;
            }
        }
        Ok(())
    }

    /// Rewrites a request card as approved, keeping the buttons so the owner
    /// can still reject afterwards.
    pub async fn mark_card_done(&self, ctx: &Context, message: &Message) -> Result<(), AppError> {
        let requester = requester_from_card(message)?;
        message
            .channel_id
            .edit_message(
                &ctx.http,
                message.id,
                EditMessage::new().embed(ui::request_card_embed(
                    self.config.bot_color,
                    requester,
                    true,
                )),
            )
            .await?;
        Ok(())
    }

    /// Whether the requester is currently connected to the session's waiting
    /// room.
    pub fn is_waiting(
        &self,
        ctx: &Context,
        guild_id: GuildId,
        room: &Room,
        requester: UserId,
    ) -> bool {
        let Some(wait_channel_id) = room.wait_channel_id else {
            return false;
        };
        access::connected_channel(ctx, guild_id, requester) == Some(ChannelId::new(wait_channel_id))
    }

    /// Moves an approved requester from the waiting room into the managed
    /// channel.
    pub async fn move_into_channel(
        &self,
        ctx: &Context,
        guild_id: GuildId,
        requester: UserId,
        channel_id: ChannelId,
    ) -> Result<(), AppError> {
        guild_id
            .edit_member(
                &ctx.http,
                requester,
                EditMember::new().voice_channel(channel_id),
            )
            .await?;
        Ok(())
    }
}

/// Voice-kicks blocked users still connected to the waiting room after its
/// overwrite refresh landed. Failures are logged per member; the deny
/// already stops them from rejoining.
async fn kick_blocked_waiters(ctx: &Context, wait_channel_id: ChannelId, blocked: &[UserId]) {
    let wait = match wait_channel_id.to_channel(ctx).await.map(|channel| channel.guild()) {
        Ok(Some(wait)) => wait,
        Ok(None) => return,
        Err(error) => {
            tracing::error!("Failed to fetch waiting room {wait_channel_id}: {error:?}");
            return;
        }
    };
    let connected: Vec<UserId> = match wait.members(&ctx.cache) {
        Ok(members) => members.iter().map(|member| member.user.id).collect(),
        Err(error) => {
            tracing::error!("Failed to list waiting room members: {error:?}");
            return;
        }
    };
    for user_id in permission::blocked_and_connected(blocked, &connected) {
        if let Err(error) = wait
            .guild_id
            .edit_member(&ctx.http, user_id, EditMember::new().disconnect_member())
            .await
        {
            tracing::error!("Failed to disconnect blocked waiter {user_id}: {error:?}");
        }
    }
}

/// Overwrite set for a waiting-room channel: category inheritance, then
/// everyone may join but not speak or chat, blocked users cannot see it.
fn wait_overwrites(
    everyone_role: RoleId,
    blocked: &[UserId],
    inherited: &[PermissionOverwrite],
) -> Vec<PermissionOverwrite> {
    let mut overwrites = inherited.to_vec();
    overwrites.push(PermissionOverwrite {
        allow: Permissions::empty(),
        deny: WAIT_EVERYONE_DENY,
        kind: PermissionOverwriteType::Role(everyone_role),
    });
    overwrites.extend(permission::blocked_overwrites(blocked));
    overwrites
}

/// Extracts the requester from a request card, erroring when the message is
/// not one of our cards.
pub fn requester_from_card(message: &Message) -> Result<UserId, AppError> {
    card_requester(message).ok_or_else(|| {
        AppError::BadRequest("This message is not a join-request card.".to_string())
    })
}

fn card_requester(message: &Message) -> Option<UserId> {
    let embed = message.embeds.first()?;
    let footer = embed.footer.as_ref()?;
    if footer.text != ui::REQUEST_CARD_FOOTER {
        return None;
    }
    parse_mention(embed.description.as_deref()?)
}

pub(crate) fn card_is_done(message: &Message) -> bool {
    message
        .embeds
        .first()
        .and_then(|embed| embed.description.as_deref())
        .is_some_and(|description| description.starts_with("✅"))
}

/// Parses the first `<@id>` or `<@!id>` mention out of a string.
pub fn parse_mention(text: &str) -> Option<UserId> {
    let start = text.find("<@")?;
    let rest = &text[start + 2..];
    let rest = rest.strip_prefix('!').unwrap_or(rest);
    let end = rest.find('>')?;
    let id = rest[..end].parse::<u64>().ok().filter(|id| *id != 0)?;
    Some(UserId::new(id))
}
