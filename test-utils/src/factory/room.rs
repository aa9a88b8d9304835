//! Room factory for creating test session rows.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_snowflake;

/// Factory for creating room session rows with customizable fields.
///
/// Defaults to an idle session: no owner, no waiting room, approval off.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::room::RoomFactory;
///
/// let room = RoomFactory::new(&db)
///     .channel_id(1000)
///     .owner_id(Some(2000))
///     .approval(true)
///     .build()
///     .await?;
/// ```
pub struct RoomFactory<'a> {
    db: &'a DatabaseConnection,
    channel_id: u64,
    wait_channel_id: Option<u64>,
    owner_id: Option<u64>,
    approval: bool,
}

impl<'a> RoomFactory<'a> {
    /// Creates a new factory with a unique generated channel id.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            channel_id: next_snowflake(),
            wait_channel_id: None,
            owner_id: None,
            approval: false,
        }
    }

    /// Sets the managed channel's Discord id.
    pub fn channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id;
        self
    }

    /// Sets the paired waiting-room channel id.
    pub fn wait_channel_id(mut self, wait_channel_id: Option<u64>) -> Self {
        self.wait_channel_id = wait_channel_id;
        self
    }

    /// Sets the session owner's Discord id.
    pub fn owner_id(mut self, owner_id: Option<u64>) -> Self {
        self.owner_id = owner_id;
        self
    }

    /// Sets the approval-mode flag.
    pub fn approval(mut self, approval: bool) -> Self {
        self.approval = approval;
        self
    }

    /// Builds and inserts the room entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::room_list::Model)` - Created entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::room_list::Model, DbErr> {
        entity::room_list::ActiveModel {
            channel_id: ActiveValue::Set(self.channel_id.to_string()),
            wait_channel_id: ActiveValue::Set(self.wait_channel_id.map(|id| id.to_string())),
            owner_id: ActiveValue::Set(self.owner_id.map(|id| id.to_string())),
            approval: ActiveValue::Set(self.approval),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an idle room with default values.
///
/// Shorthand for `RoomFactory::new(db).build().await`.
pub async fn create_room(db: &DatabaseConnection) -> Result<entity::room_list::Model, DbErr> {
    RoomFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::RoomList;

    #[tokio::test]
    async fn creates_idle_room_by_default() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(RoomList)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let room = create_room(db).await?;

        assert!(room.owner_id.is_none());
        assert!(room.wait_channel_id.is_none());
        assert!(!room.approval);

        Ok(())
    }

    #[tokio::test]
    async fn creates_room_with_custom_values() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(RoomList)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let room = RoomFactory::new(db)
            .channel_id(1000)
            .wait_channel_id(Some(1001))
            .owner_id(Some(2000))
            .approval(true)
            .build()
            .await?;

        assert_eq!(room.channel_id, "1000");
        assert_eq!(room.wait_channel_id.as_deref(), Some("1001"));
        assert_eq!(room.owner_id.as_deref(), Some("2000"));
        assert!(room.approval);

        Ok(())
    }
}
