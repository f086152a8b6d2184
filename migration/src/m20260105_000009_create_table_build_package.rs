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
                    .table(BuildPackage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BuildPackage::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BuildPackage::Build).uuid().not_null())
                    .col(ColumnDef::new(BuildPackage::Recipe).uuid())
                    .col(ColumnDef::new(BuildPackage::Name).string().not_null())
                    .col(ColumnDef::new(BuildPackage::Version).string().not_null())
                    .col(ColumnDef::new(BuildPackage::Revision).string().not_null())
                    .col(ColumnDef::new(BuildPackage::Summary).string().not_null())
                    .col(ColumnDef::new(BuildPackage::Description).string().not_null())
                    .col(
                        ColumnDef::new(BuildPackage::Size)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(BuildPackage::Section).string().not_null())
                    .col(ColumnDef::new(BuildPackage::License).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-build_package-build")
                            .from(BuildPackage::Table, BuildPackage::Build)
                            .to(Build::Table, Build::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-build_package-recipe")
                            .from(BuildPackage::Table, BuildPackage::Recipe)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BuildPackage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BuildPackage {
    Table,
    Id,
    Build,
    Recipe,
    Name,
    Version,
    Revision,
    Summary,
    Description,
    Size,
    Section,
    License,
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
