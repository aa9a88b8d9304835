//! Per-managed-channel session facts.
//!
//! One row per managed voice channel, created lazily on first reconciliation
//! and reused across sessions. Ownership and approval mode are stored here as
//! first-class facts; the permission grants on the channel are derived from
//! them, never the other way around.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "room_lists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Discord channel id of the managed voice channel.
    #[sea_orm(unique)]
    pub channel_id: String,
    /// Discord channel id of the paired waiting-room channel, if approval
    /// mode is currently on.
    pub wait_channel_id: Option<String>,
    /// Discord user id of the current session owner, if any.
    pub owner_id: Option<String>,
    /// Whether approval-gated entry is currently enabled.
    pub approval: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
