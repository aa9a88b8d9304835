//! Block-list rows: one row per (owner, blocked user) pair.
//!
//! Rows are owner-scoped and independent of any particular channel session:
//! blocking is a user-level preference that survives channel resets. Discord
//! snowflakes are stored as strings to avoid u64/i64 signedness issues in the
//! database layer.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "black_lists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Discord user id of the owner who created the block.
    pub user_id: String,
    /// Discord user id of the blocked user.
    pub block_user_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
