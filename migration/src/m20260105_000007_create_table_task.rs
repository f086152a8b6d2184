/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Task::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Task::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Task::Build).uuid().not_null())
                    .col(ColumnDef::new(Task::Order).integer())
                    .col(
                        ColumnDef::new(Task::TaskExecuted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Task::Outcome)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(ColumnDef::new(Task::SstateChecksum).string().not_null())
                    .col(ColumnDef::new(Task::PathToSstateObj).string().not_null())
                    .col(ColumnDef::new(Task::Recipe).uuid().not_null())
                    .col(ColumnDef::new(Task::TaskName).string().not_null())
                    .col(ColumnDef::new(Task::SourceUrl).string().not_null())
                    .col(ColumnDef::new(Task::WorkDirectory).string().not_null())
                    .col(
                        ColumnDef::new(Task::ScriptType)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Task::LineNumber)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Task::DiskIo).big_integer())
                    .col(ColumnDef::new(Task::CpuUsage).integer())
                    .col(ColumnDef::new(Task::ElapsedTime).double())
                    .col(
                        ColumnDef::new(Task::SstateResult)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Task::Message).string().not_null())
                    .col(ColumnDef::new(Task::Logfile).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-task-build")
                            .from(Task::Table, Task::Build)
                            .to(Build::Table, Build::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-task-recipe")
                            .from(Task::Table, Task::Recipe)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // NULL orders never collide, so unordered tasks stay unconstrained.
        manager
            .create_index(
                Index::create()
                    .name("idx-task-build-order")
                    .table(Task::Table)
                    .col(Task::Build)
                    .col(Task::Order)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Task::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Task {
    Table,
    Id,
    Build,
    Order,
    TaskExecuted,
    Outcome,
    SstateChecksum,
    PathToSstateObj,
    Recipe,
    TaskName,
    SourceUrl,
    WorkDirectory,
    ScriptType,
    LineNumber,
    DiskIo,
    CpuUsage,
    ElapsedTime,
    SstateResult,
    Message,
    Logfile,
}

#[derive(DeriveIden)]
enum Build {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Recipe {
    Table,
    Id,
}
