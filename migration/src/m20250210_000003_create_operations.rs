//! Operations table. `end_time` is derived data: it is rewritten on every
//! save and recomputed again on load.

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250210_000001_create_projects::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Operations::Table)
                    .if_not_exists()
                    .col(string(Operations::Id).primary_key())
                    .col(integer(Operations::ProjectId))
                    .col(string(Operations::WellId))
                    .col(string(Operations::OperationType))
                    .col(string(Operations::Sector))
                    .col(timestamp_with_time_zone(Operations::StartTime))
                    .col(timestamp_with_time_zone_null(Operations::EndTime))
                    .col(integer_null(Operations::Stage))
                    .col(string_null(Operations::Party))
                    .col(string_null(Operations::MainEvent))
                    .col(string_null(Operations::CompletionType))
                    .col(boolean(Operations::Completed).default(false))
                    .col(text_null(Operations::Personnel))
                    .col(text_null(Operations::Comments))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_operations_project_id")
                            .from(Operations::Table, Operations::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for loading a project's timeline in start order
        manager
            .create_index(
                Index::create()
                    .name("idx_operations_project_start")
                    .table(Operations::Table)
                    .col(Operations::ProjectId)
                    .col(Operations::StartTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Operations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Operations {
    Table,
    Id,
    ProjectId,
    WellId,
    OperationType,
    Sector,
    StartTime,
    EndTime,
    Stage,
    Party,
    MainEvent,
    CompletionType,
    Completed,
    Personnel,
    Comments,
}
