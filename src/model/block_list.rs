use sea_orm::DbErr;

/// One block-list entry: `owner_id` has blocked `blocked_user_id` from every
/// channel session the owner holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedUser {
    pub owner_id: u64,
    pub blocked_user_id: u64,
}

impl BlockedUser {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(BlockedUser)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Failed to parse a stored id as u64
    pub fn from_entity(entity: entity::black_list::Model) -> Result<Self, DbErr> {
        Ok(Self {
            owner_id: parse_id("user_id", &entity.user_id)?,
            blocked_user_id: parse_id("block_user_id", &entity.block_user_id)?,
        })
    }
}

fn parse_id(column: &str, value: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {column}: {e}")))
}
