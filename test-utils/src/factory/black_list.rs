//! Block-list factory for creating test block entries.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_snowflake;

/// Factory for creating block-list rows with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::black_list::BlackListFactory;
///
/// let entry = BlackListFactory::new(&db)
///     .owner_id(1000)
///     .blocked_user_id(2000)
///     .build()
///     .await?;
/// ```
pub struct BlackListFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: u64,
    blocked_user_id: u64,
}

impl<'a> BlackListFactory<'a> {
    /// Creates a new factory with unique generated user ids.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            owner_id: next_snowflake(),
            blocked_user_id: next_snowflake(),
        }
    }

    /// Sets the blocking owner's Discord id.
    pub fn owner_id(mut self, owner_id: u64) -> Self {
        self.owner_id = owner_id;
        self
    }

    /// Sets the blocked user's Discord id.
    pub fn blocked_user_id(mut self, blocked_user_id: u64) -> Self {
        self.blocked_user_id = blocked_user_id;
        self
    }

    /// Builds and inserts the block-list entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::black_list::Model)` - Created entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::black_list::Model, DbErr> {
        entity::black_list::ActiveModel {
            user_id: ActiveValue::Set(self.owner_id.to_string()),
            block_user_id: ActiveValue::Set(self.blocked_user_id.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a block entry with default values.
///
/// Shorthand for `BlackListFactory::new(db).build().await`.
pub async fn create_block_entry(
    db: &DatabaseConnection,
) -> Result<entity::black_list::Model, DbErr> {
    BlackListFactory::new(db).build().await
}

/// Creates a block entry for a specific (owner, blocked user) pair.
pub async fn create_block_entry_for(
    db: &DatabaseConnection,
    owner_id: u64,
    blocked_user_id: u64,
) -> Result<entity::black_list::Model, DbErr> {
    BlackListFactory::new(db)
        .owner_id(owner_id)
        .blocked_user_id(blocked_user_id)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::BlackList;

    #[tokio::test]
    async fn creates_entry_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(BlackList)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let entry = create_block_entry(db).await?;

        assert!(!entry.user_id.is_empty());
        assert_ne!(entry.user_id, entry.block_user_id);

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_entries() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(BlackList)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_block_entry(db).await?;
        let second = create_block_entry(db).await?;

        assert_ne!(first.user_id, second.user_id);

        Ok(())
    }
}
