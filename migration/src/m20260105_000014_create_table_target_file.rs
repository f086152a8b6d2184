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
                    .table(TargetFile::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TargetFile::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TargetFile::TargetPackage).uuid().not_null())
                    .col(ColumnDef::new(TargetFile::Path).string().not_null())
                    .col(ColumnDef::new(TargetFile::Size).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-target_file-target_package")
                            .from(TargetFile::Table, TargetFile::TargetPackage)
                            .to(TargetPackage::Table, TargetPackage::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-target_file-path")
                    .table(TargetFile::Table)
                    .col(TargetFile::TargetPackage)
                    .col(TargetFile::Path)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TargetFile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TargetFile {
    Table,
    Id,
    TargetPackage,
    Path,
    Size,
}

#[derive(DeriveIden)]
enum TargetPackage {
    Table,
    Id,
}
