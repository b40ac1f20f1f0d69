use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CrawlRuns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CrawlRuns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CrawlRuns::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(CrawlRuns::FinishedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(CrawlRuns::WindowStart).integer())
                    .col(ColumnDef::new(CrawlRuns::WindowEnd).integer())
                    .col(
                        ColumnDef::new(CrawlRuns::Discovered)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CrawlRuns::Processed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CrawlRuns::Skipped)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CrawlRuns::Failed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CrawlRuns::Status)
                            .string()
                            .not_null()
                            .default("running"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CrawlRuns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CrawlRuns {
    Table,
    Id,
    StartedAt,
    FinishedAt,
    WindowStart,
    WindowEnd,
    Discovered,
    Processed,
    Skipped,
    Failed,
    Status,
}
