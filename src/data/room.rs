use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::Room;

/// Repository for managed-channel session rows.
///
/// One row per managed voice channel, upserted on first use and reused for
/// the channel's whole configured lifetime. Owner and approval facts live
/// here; permission overwrites are derived from them, never the reverse.
pub struct RoomRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoomRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection reference
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the session row for a managed channel.
    ///
    /// # Returns
    /// - `Ok(Some(Room))` - Row exists for this channel
    /// - `Ok(None)` - Channel has never been reconciled
    /// - `Err(DbErr)` - Database error during query or entity conversion
    pub async fn find_by_channel_id(&self, channel_id: u64) -> Result<Option<Room>, DbErr> {
        let entity = entity::prelude::RoomList::find()
            .filter(entity::room_list::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(Room::from_entity).transpose()
    }

    /// Finds the session row paired to a waiting-room channel.
    ///
    /// Used to answer "which managed channel does this waiting room belong
    /// to" when a member joins or leaves a waiting room.
    ///
    /// # Returns
    /// - `Ok(Some(Room))` - A managed channel is paired to this waiting room
    /// - `Ok(None)` - Not a waiting-room channel
    /// - `Err(DbErr)` - Database error during query or entity conversion
    pub async fn find_by_wait_channel_id(
        &self,
        wait_channel_id: u64,
    ) -> Result<Option<Room>, DbErr> {
        let entity = entity::prelude::RoomList::find()
            .filter(entity::room_list::Column::WaitChannelId.eq(wait_channel_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(Room::from_entity).transpose()
    }

    /// Retrieves the session rows for a set of managed channels.
    ///
    /// Used by the control panel to render current owners in one query.
    ///
    /// # Returns
    /// - `Ok(Vec<Room>)` - Rows for channels that have been reconciled at
    ///   least once (channels with no row simply have no session yet)
    /// - `Err(DbErr)` - Database error during query or entity conversion
    pub async fn find_by_channel_ids(&self, channel_ids: &[u64]) -> Result<Vec<Room>, DbErr> {
        let ids: Vec<String> = channel_ids.iter().map(|id| id.to_string()).collect();
        let entities = entity::prelude::RoomList::find()
            .filter(entity::room_list::Column::ChannelId.is_in(ids))
            .all(self.db)
            .await?;

        entities.into_iter().map(Room::from_entity).collect()
    }

    /// Upserts the owner and approval facts for a managed channel.
    ///
    /// The waiting-room pairing is left untouched; it follows its own
    /// lifecycle via [`set_wait_channel`](Self::set_wait_channel).
    ///
    /// # Arguments
    /// - `channel_id` - Managed voice channel id
    /// - `owner_id` - New session owner, or `None` for an ownerless/ended
    ///   session
    /// - `approval` - Whether approval-gated entry is on
    ///
    /// # Returns
    /// - `Ok(Room)` - The stored row after the upsert
    /// - `Err(DbErr)` - Database error during insert/update
    pub async fn set_session(
        &self,
        channel_id: u64,
        owner_id: Option<u64>,
        approval: bool,
    ) -> Result<Room, DbErr> {
        let entity = entity::prelude::RoomList::insert(entity::room_list::ActiveModel {
            channel_id: ActiveValue::Set(channel_id.to_string()),
            owner_id: ActiveValue::Set(owner_id.map(|id| id.to_string())),
            approval: ActiveValue::Set(approval),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::room_list::Column::ChannelId)
                .update_columns([
                    entity::room_list::Column::OwnerId,
                    entity::room_list::Column::Approval,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Room::from_entity(entity)
    }

    /// Upserts the waiting-room pairing for a managed channel.
    ///
    /// Passing `None` clears the pairing but keeps the row, matching the
    /// waiting channel being deleted when approval mode turns off.
    ///
    /// # Returns
    /// - `Ok(Room)` - The stored row after the upsert
    /// - `Err(DbErr)` - Database error during insert/update
    pub async fn set_wait_channel(
        &self,
        channel_id: u64,
        wait_channel_id: Option<u64>,
    ) -> Result<Room, DbErr> {
        let entity = entity::prelude::RoomList::insert(entity::room_list::ActiveModel {
            channel_id: ActiveValue::Set(channel_id.to_string()),
            wait_channel_id: ActiveValue::Set(wait_channel_id.map(|id| id.to_string())),
            approval: ActiveValue::Set(wait_channel_id.is_some()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::room_list::Column::ChannelId)
                .update_columns([entity::room_list::Column::WaitChannelId])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Room::from_entity(entity)
    }
}
