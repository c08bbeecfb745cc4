use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create websites table
        manager
            .create_table(
                Table::create()
                    .table(Websites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Websites::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Websites::Url).string().not_null())
                    .col(
                        ColumnDef::new(Websites::SubmitterFingerprint)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Websites::Status).string().not_null())
                    .col(
                        ColumnDef::new(Websites::LastModified)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: the admission pipeline relies on the conflict error
        // to reject concurrent duplicate inserts.
        manager
            .create_index(
                Index::create()
                    .name("idx_websites_url_unique")
                    .table(Websites::Table)
                    .col(Websites::Url)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Websites::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Websites {
    Table,
    Id,
    Url,
    SubmitterFingerprint,
    Status,
    LastModified,
}
