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
                    .table(BuildFile::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BuildFile::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BuildFile::BuildPackage).uuid().not_null())
                    .col(ColumnDef::new(BuildFile::Path).string().not_null())
                    .col(ColumnDef::new(BuildFile::Size).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-build_file-build_package")
                            .from(BuildFile::Table, BuildFile::BuildPackage)
                            .to(BuildPackage::Table, BuildPackage::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-build_file-path")
                    .table(BuildFile::Table)
                    .col(BuildFile::BuildPackage)
                    .col(BuildFile::Path)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BuildFile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BuildFile {
    Table,
    Id,
    BuildPackage,
    Path,
    Size,
}

#[derive(DeriveIden)]
enum BuildPackage {
    Table,
    Id,
}
