use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoomLists::Table)
                    .if_not_exists()
                    .col(pk_auto(RoomLists::Id))
                    .col(string(RoomLists::ChannelId))
                    .col(string_null(RoomLists::WaitChannelId))
                    .col(string_null(RoomLists::OwnerId))
                    .col(boolean(RoomLists::Approval).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_lists_channel_id")
                    .table(RoomLists::Table)
                    .col(RoomLists::ChannelId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_room_lists_channel_id")
                    .table(RoomLists::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RoomLists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RoomLists {
    Table,
    Id,
    ChannelId,
    WaitChannelId,
    OwnerId,
    Approval,
}
