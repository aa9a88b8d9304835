use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::BlockedUser;

/// Repository for block-list database operations.
///
/// Block-list rows are keyed by owner, not by channel session: they persist
/// across sessions and are re-read on every reconciliation of a channel the
/// owner holds.
pub struct BlackListRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BlackListRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection reference
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a block-list row for the (owner, blocked user) pair.
    ///
    /// # Arguments
    /// - `owner_id` - Discord user id of the blocking owner
    /// - `blocked_user_id` - Discord user id of the user being blocked
    ///
    /// # Returns
    /// - `Ok(true)` - Row created
    /// - `Ok(false)` - Pair already existed, nothing inserted
    /// - `Err(DbErr)` - Database error during query or insert
    pub async fn add(&self, owner_id: u64, blocked_user_id: u64) -> Result<bool, DbErr> {
        if self.exists(owner_id, blocked_user_id).await? {
            return Ok(false);
        }

        entity::black_list::ActiveModel {
            user_id: ActiveValue::Set(owner_id.to_string()),
            block_user_id: ActiveValue::Set(blocked_user_id.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// Removes the block-list row for the (owner, blocked user) pair.
    ///
    /// # Returns
    /// - `Ok(())` - Row deleted (or did not exist)
    /// - `Err(DbErr)` - Database error during deletion
    pub async fn remove(&self, owner_id: u64, blocked_user_id: u64) -> Result<(), DbErr> {
        entity::prelude::BlackList::delete_many()
            .filter(entity::black_list::Column::UserId.eq(owner_id.to_string()))
            .filter(entity::black_list::Column::BlockUserId.eq(blocked_user_id.to_string()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Retrieves every user blocked by an owner.
    ///
    /// # Returns
    /// - `Ok(Vec<BlockedUser>)` - All block entries scoped to this owner
    /// - `Err(DbErr)` - Database error during query or entity conversion
    pub async fn list_by_owner(&self, owner_id: u64) -> Result<Vec<BlockedUser>, DbErr> {
        let entities = entity::prelude::BlackList::find()
            .filter(entity::black_list::Column::UserId.eq(owner_id.to_string()))
            .all(self.db)
            .await?;

        entities.into_iter().map(BlockedUser::from_entity).collect()
    }

    async fn exists(&self, owner_id: u64, blocked_user_id: u64) -> Result<bool, DbErr> {
        let found = entity::prelude::BlackList::find()
            .filter(entity::black_list::Column::UserId.eq(owner_id.to_string()))
            .filter(entity::black_list::Column::BlockUserId.eq(blocked_user_id.to_string()))
            .one(self.db)
            .await?;
        Ok(found.is_some())
    }
}
