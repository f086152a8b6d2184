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
                    .table(Target::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Target::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Target::Build).uuid().not_null())
                    .col(ColumnDef::new(Target::Target).string().not_null())
                    .col(
                        ColumnDef::new(Target::IsImage)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Target::FileName).string().not_null())
                    .col(ColumnDef::new(Target::FileSize).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-target-build")
                            .from(Target::Table, Target::Build)
                            .to(Build::Table, Build::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Target::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Target {
    Table,
    Id,
    Build,
    Target,
    IsImage,
    FileName,
    FileSize,
}

#[derive(DeriveIden)]
enum Build {
    Table,
    Id,
}
