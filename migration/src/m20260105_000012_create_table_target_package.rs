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
                    .table(TargetPackage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TargetPackage::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TargetPackage::Target).uuid().not_null())
                    .col(ColumnDef::new(TargetPackage::Recipe).uuid())
                    .col(ColumnDef::new(TargetPackage::Name).string().not_null())
                    .col(ColumnDef::new(TargetPackage::Version).string().not_null())
                    .col(ColumnDef::new(TargetPackage::Size).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-target_package-target")
                            .from(TargetPackage::Table, TargetPackage::Target)
                            .to(Target::Table, Target::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-target_package-recipe")
                            .from(TargetPackage::Table, TargetPackage::Recipe)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TargetPackage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TargetPackage {
    Table,
    Id,
    Target,
    Recipe,
    Name,
    Version,
    Size,
}

#[derive(DeriveIden)]
enum Target {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Recipe {
    Table,
    Id,
}
