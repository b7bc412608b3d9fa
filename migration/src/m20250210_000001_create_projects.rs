//! Projects table: one row per imported project, holding the display
//! configuration and the selected personnel as JSON text.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(pk_auto(Projects::Id))
                    .col(string_uniq(Projects::Number))
                    .col(string(Projects::Name))
                    .col(string(Projects::Basin))
                    .col(string_null(Projects::Crew))
                    .col(text(Projects::Configuration))
                    .col(text(Projects::Personnel))
                    .col(string_null(Projects::SelectedCompletionType))
                    .col(
                        timestamp_with_time_zone(Projects::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // The active project is the most recently saved one
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_updated_at")
                    .table(Projects::Table)
                    .col(Projects::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Projects {
    Table,
    Id,
    Number,
    Name,
    Basin,
    Crew,
    Configuration,
    Personnel,
    SelectedCompletionType,
    UpdatedAt,
}
