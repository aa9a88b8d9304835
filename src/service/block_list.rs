//! Block-list management.
//!
//! Block-lists belong to owners, not channels: the rows persist across
//! sessions and are folded into every reconciliation of a channel the owner
//! holds. Blocking a privileged member (anyone who can move members) is
//! refused; those targets are reported back to the acting user instead.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildId, Permissions, UserId};

use crate::data::black_list::BlackListRepository;
use crate::error::AppError;

/// Result of a block request, split by what happened to each target.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BlockOutcome {
    /// Targets newly added to the block-list.
    pub blocked: Vec<UserId>,
    /// Targets refused: the owner themselves, or members allowed to move
    /// members.
    pub privileged: Vec<UserId>,
    /// Targets that were already on the block-list.
    pub already_blocked: Vec<UserId>,
}

pub struct BlockListService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BlockListService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds targets to an owner's block-list, refusing privileged members.
    ///
    /// # Returns
    /// - `Ok(BlockOutcome)` - Per-target result; the caller reconciles the
    ///   owner's channel afterwards so the new denies take effect
    /// - `Err(AppError)` - Database or Discord lookup failure
    pub async fn block_users(
        &self,
        ctx: &Context,
        guild_id: GuildId,
        owner_id: UserId,
        targets: &[UserId],
    ) -> Result<BlockOutcome, AppError> {
        let repository = BlackListRepository::new(self.db);
        let mut outcome = BlockOutcome::default();

        for target in targets {
            if *target == owner_id || self.is_privileged(ctx, guild_id, *target).await? {
                outcome.privileged.push(*target);
                continue;
            }
            if repository.add(owner_id.get(), target.get()).await? {
                outcome.blocked.push(*target);
            } else {
                outcome.already_blocked.push(*target);
            }
        }

        Ok(outcome)
    }

    /// Removes targets from an owner's block-list.
    pub async fn unblock_users(
        &self,
        owner_id: UserId,
        targets: &[UserId],
    ) -> Result<(), AppError> {
        let repository = BlackListRepository::new(self.db);
        for target in targets {
            repository.remove(owner_id.get(), target.get()).await?;
        }
        Ok(())
    }

    /// Renders an owner's block-list as an embed description.
    pub async fn render_block_list(&self, owner_id: UserId) -> Result<String, AppError> {
        let blocked = BlackListRepository::new(self.db)
            .list_by_owner(owner_id.get())
            .await?;
        if blocked.is_empty() {
            return Ok("No one is blocked.".to_string());
        }
        Ok(blocked
            .iter()
            .map(|entry| format!("<@{}>", entry.blocked_user_id))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Whether an owner has blocked a given user. Checked when that user
    /// joins a waiting room to decide whether a request card gets posted.
    pub async fn is_blocked_by(&self, owner_id: UserId, user_id: UserId) -> Result<bool, AppError> {
        let blocked = BlackListRepository::new(self.db)
            .list_by_owner(owner_id.get())
            .await?;
        Ok(blocked
            .iter()
            .any(|entry| entry.blocked_user_id == user_id.get()))
    }

    /// Whether a member may move other members, which exempts them from being
    /// blocked.
    async fn is_privileged(
        &self,
        ctx: &Context,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<bool, AppError> {
        let member = guild_id.member(ctx, user_id).await?;
        let Some(guild) = ctx.cache.guild(guild_id) else {
            return Ok(false);
        };
        Ok(guild
            .member_permissions(&member)
            .contains(Permissions::MOVE_MEMBERS))
    }
}
