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
                    .table(Wells::Table)
                    .if_not_exists()
                    .col(pk_auto(Wells::Id))
                    .col(integer(Wells::ProjectId))
                    .col(string(Wells::WellId))
                    .col(string(Wells::Name))
                    .col(integer_null(Wells::PlannedNumberOfStages))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wells_project_id")
                            .from(Wells::Table, Wells::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_wells_project_well")
                    .table(Wells::Table)
                    .col(Wells::ProjectId)
                    .col(Wells::WellId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Wells::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Wells {
    Table,
    Id,
    ProjectId,
    WellId,
    Name,
    PlannedNumberOfStages,
}
