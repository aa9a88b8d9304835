//! Channel reconciliation.
//!
//! All permission mutation funnels through here: gather facts (stored session
//! row, block-list, grants preserved from the current overwrite snapshot,
//! parent-category inheritance), fold in the requested change, recompute the
//! complete overwrite set with [`permission::compute_overwrites`], and apply
//! it in a single channel edit. Because the full set is recomputed every time,
//! concurrent operations converge on the facts of whichever write landed last
//! instead of corrupting each other.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, Context, EditChannel, EditMember, GuildChannel, PermissionOverwrite, RoleId, UserId,
};

use crate::config::Config;
use crate::data::black_list::BlackListRepository;
use crate::data::room::RoomRepository;
use crate::error::AppError;
use crate::model::Room;
use crate::service::approval::ApprovalService;
use crate::service::permission::{self, ChannelFacts, MemberChange, MemberFlags};

/// What happens to the stored session owner during a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerChange {
    /// Leave the stored owner as it stands.
    Keep,
    /// Assign a new owner (session start, ownership transfer).
    Assign(UserId),
    /// Clear the owner (the owner left while members remain).
    Clear,
}

/// A requested change folded into one reconciliation pass.
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    pub owner: OwnerChange,
    /// `None` keeps the stored approval flag.
    pub approval: Option<bool>,
    pub members: Vec<MemberChange>,
    /// Discard the approved/muted grants held on the current snapshot
    /// instead of preserving them.
    pub drop_grants: bool,
}

impl ReconcileRequest {
    /// Recompute from current facts without changing any of them.
    pub fn refresh() -> Self {
        Self {
            owner: OwnerChange::Keep,
            approval: None,
            members: Vec::new(),
            drop_grants: false,
        }
    }

    /// Ends the owner's session while members remain: clears the stored
    /// owner, turns approval off (tearing down the waiting room), and drops
    /// the per-member grants, leaving a default-permission channel open for
    /// a claim.
    pub fn release() -> Self {
        Self {
            owner: OwnerChange::Clear,
            approval: Some(false),
            drop_grants: true,
            ..Self::refresh()
        }
    }

    pub fn owner(owner: OwnerChange) -> Self {
        Self {
            owner,
            ..Self::refresh()
        }
    }

    pub fn approval(approval: bool) -> Self {
        Self {
            approval: Some(approval),
            ..Self::refresh()
        }
    }

    pub fn members(members: Vec<MemberChange>) -> Self {
        Self {
            members,
            ..Self::refresh()
        }
    }
}

pub struct Reconciler<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> Reconciler<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Applies a requested change to a managed channel and converges its
    /// overwrites, stored session row, and waiting-room pairing on the
    /// resulting facts.
    ///
    /// # Returns
    /// - `Ok(Room)` - The stored session row after the pass
    /// - `Err(AppError)` - Database or Discord failure; the channel is left
    ///   as the last successful write put it and the next event re-converges
    pub async fn update_channel(
        &self,
        ctx: &Context,
        channel: &GuildChannel,
        request: ReconcileRequest,
    ) -> Result<Room, AppError> {
        let rooms = RoomRepository::new(self.db);
        let stored = rooms.find_by_channel_id(channel.id.get()).await?;

        let owner = match request.owner {
            OwnerChange::Keep => stored
                .as_ref()
                .and_then(|room| room.owner_id)
                .map(UserId::new),
            OwnerChange::Assign(user_id) => Some(user_id),
            OwnerChange::Clear => None,
        };
        let approval = request
            .approval
            .unwrap_or_else(|| stored.as_ref().is_some_and(|room| room.approval));

        let mut flags = if request.drop_grants {
            MemberFlags::default()
        } else {
            permission::collect_member_flags(&channel.permission_overwrites)
        };
        permission::apply_member_changes(&mut flags, &request.members);

        let blocked = match owner {
            Some(owner_id) => BlackListRepository::new(self.db)
                .list_by_owner(owner_id.get())
                .await?
                .iter()
                .map(|entry| UserId::new(entry.blocked_user_id))
                .collect(),
            None => Vec::new(),
        };

        let facts = ChannelFacts {
            everyone_role: RoleId::new(channel.guild_id.get()),
            owner,
            approval,
            blocked: blocked.clone(),
            approved: flags.approved,
            muted: flags.muted,
            inherited: self.inherited_overwrites(ctx, channel).await?,
        };
        let overwrites = permission::compute_overwrites(&facts);
        channel
            .id
            .edit(&ctx.http, EditChannel::new().permissions(overwrites))
            .await?;

        let room = rooms
            .set_session(channel.id.get(), owner.map(UserId::get), approval)
            .await?;

        self.kick_blocked(ctx, channel, &blocked).await;

        ApprovalService::new(self.db, self.config)
            .reconcile_wait_channel(ctx, channel, &blocked, &facts.inherited, approval, room)
            .await
    }

    /// Restores a managed channel to its configured defaults: inherited
    /// overwrites only, the configured user limit, the default bitrate, no
    /// owner, approval off, no waiting room.
    pub async fn reset_channel(&self, ctx: &Context, channel: &GuildChannel) -> Result<(), AppError> {
        let inherited = self.inherited_overwrites(ctx, channel).await?;
        let user_limit = self
            .config
            .channel_entry(channel.id)
            .map(|entry| entry.user_limit)
            .unwrap_or(0);

        channel
            .id
            .edit(
                &ctx.http,
                EditChannel::new()
                    .permissions(inherited.clone())
                    .user_limit(user_limit)
                    .bitrate(DEFAULT_BITRATE),
            )
            .await?;

        let room = RoomRepository::new(self.db)
            .set_session(channel.id.get(), None, false)
            .await?;
        ApprovalService::new(self.db, self.config)
            .reconcile_wait_channel(ctx, channel, &[], &inherited, false, room)
            .await?;
        Ok(())
    }

    /// Overwrites the channel inherits from its parent category, filtered to
    /// the subjects that keep the bot itself operable.
    async fn inherited_overwrites(
        &self,
        ctx: &Context,
        channel: &GuildChannel,
    ) -> Result<Vec<PermissionOverwrite>, AppError> {
        let Some(parent_id) = channel.parent_id else {
            return Ok(Vec::new());
        };
        let Some(parent) = parent_id.to_channel(ctx).await?.guild() else {
            return Ok(Vec::new());
        };

        let bot_id = ctx.cache.current_user().id;
        let bot_member = channel.guild_id.member(ctx, bot_id).await?;
        Ok(permission::filter_inherited(
            &parent.permission_overwrites,
            bot_id,
            &bot_member.roles,
        ))
    }

    /// Voice-kicks blocked users that are still connected. Kicks are applied
    /// after the overwrite write lands so a kicked user cannot rejoin, and
    /// failures are logged per member rather than aborting the pass.
    async fn kick_blocked(&self, ctx: &Context, channel: &GuildChannel, blocked: &[UserId]) {
        let connected: Vec<UserId> = match channel.members(&ctx.cache) {
            Ok(members) => members.iter().map(|member| member.user.id).collect(),
            Err(error) => {
                tracing::error!("Failed to list members of {}: {error:?}", channel.id);
                return;
            }
        };
        for user_id in permission::blocked_and_connected(blocked, &connected) {
            if let Err(error) = channel
                .guild_id
                .edit_member(&ctx.http, user_id, EditMember::new().disconnect_member())
                .await
            {
                tracing::error!("Failed to disconnect blocked user {user_id}: {error:?}");
            }
        }
    }
}

/// Bitrate restored when a channel resets, in bits per second.
pub const DEFAULT_BITRATE: u32 = 64_000;

/// Validated user-limit input from the settings modal.
pub fn parse_user_limit(input: &str) -> Result<u32, AppError> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|limit| *limit <= 99)
        .ok_or_else(|| {
            AppError::BadRequest("Enter a user limit between 0 and 99 (0 = unlimited).".to_string())
        })
}

/// Validated bitrate input from the settings modal, converted to bits per
/// second.
pub fn parse_bitrate(input: &str) -> Result<u32, AppError> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|kbps| (8..=384).contains(kbps))
        .map(|kbps| kbps * 1000)
        .ok_or_else(|| {
            AppError::BadRequest("Enter a bitrate between 8 and 384 kbps.".to_string())
        })
}

/// Applies a validated user limit to a channel.
pub async fn set_user_limit(
    ctx: &Context,
    channel_id: ChannelId,
    user_limit: u32,
) -> Result<(), AppError> {
    channel_id
        .edit(&ctx.http, EditChannel::new().user_limit(user_limit))
        .await?;
    Ok(())
}

/// Applies a validated bitrate to a channel.
pub async fn set_bitrate(ctx: &Context, channel_id: ChannelId, bitrate: u32) -> Result<(), AppError> {
    channel_id
        .edit(&ctx.http, EditChannel::new().bitrate(bitrate))
        .await?;
    Ok(())
}
