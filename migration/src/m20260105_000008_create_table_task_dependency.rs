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
                    .table(TaskDependency::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TaskDependency::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TaskDependency::Task).uuid().not_null())
                    .col(ColumnDef::new(TaskDependency::DependsOn).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-task_dependency-task")
                            .from(TaskDependency::Table, TaskDependency::Task)
                            .to(Task::Table, Task::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-task_dependency-depends_on")
                            .from(TaskDependency::Table, TaskDependency::DependsOn)
                            .to(Task::Table, Task::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-task_dependency-edge")
                    .table(TaskDependency::Table)
                    .col(TaskDependency::Task)
                    .col(TaskDependency::DependsOn)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TaskDependency::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TaskDependency {
    Table,
    Id,
    Task,
    DependsOn,
}

#[derive(DeriveIden)]
enum Task {
    Table,
    Id,
}
