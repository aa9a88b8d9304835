use sea_orm::DbErr;

/// Session facts for one managed voice channel.
///
/// `owner_id` and `approval` are the source of truth for ownership and
/// approval mode; the channel's permission overwrites are derived from them
/// on every reconciliation. `wait_channel_id` is present exactly while
/// approval mode is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub channel_id: u64,
    pub wait_channel_id: Option<u64>,
    pub owner_id: Option<u64>,
    pub approval: bool,
}

impl Room {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Room)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Failed to parse a stored id as u64
    pub fn from_entity(entity: entity::room_list::Model) -> Result<Self, DbErr> {
        Ok(Self {
            channel_id: parse_id("channel_id", &entity.channel_id)?,
            wait_channel_id: entity
                .wait_channel_id
                .as_deref()
                .map(|id| parse_id("wait_channel_id", id))
                .transpose()?,
            owner_id: entity
                .owner_id
                .as_deref()
                .map(|id| parse_id("owner_id", id))
                .transpose()?,
            approval: entity.approval,
        })
    }
}

fn parse_id(column: &str, value: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {column}: {e}")))
}
