use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlackLists::Table)
                    .if_not_exists()
                    .col(pk_auto(BlackLists::Id))
                    .col(string(BlackLists::UserId))
                    .col(string(BlackLists::BlockUserId))
                    .to_owned(),
            )
            .await?;

        // Each (owner, blocked user) pair exists at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_black_lists_user_id_block_user_id")
                    .table(BlackLists::Table)
                    .col(BlackLists::UserId)
                    .col(BlackLists::BlockUserId)
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
                    .name("idx_black_lists_user_id_block_user_id")
                    .table(BlackLists::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(BlackLists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlackLists {
    Table,
    Id,
    UserId,
    BlockUserId,
}
