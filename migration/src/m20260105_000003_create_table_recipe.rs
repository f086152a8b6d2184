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
                    .table(Recipe::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Recipe::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Recipe::Name).string().not_null())
                    .col(ColumnDef::new(Recipe::Version).string().not_null())
                    .col(ColumnDef::new(Recipe::LayerVersion).uuid().not_null())
                    .col(ColumnDef::new(Recipe::Summary).string().not_null())
                    .col(ColumnDef::new(Recipe::Description).string().not_null())
                    .col(ColumnDef::new(Recipe::Section).string().not_null())
                    .col(ColumnDef::new(Recipe::License).string().not_null())
                    .col(ColumnDef::new(Recipe::LicensingInfo).text().not_null())
                    .col(ColumnDef::new(Recipe::Homepage).string().not_null())
                    .col(ColumnDef::new(Recipe::Bugtracker).string().not_null())
                    .col(ColumnDef::new(Recipe::FilePath).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-recipe-layer_version")
                            .from(Recipe::Table, Recipe::LayerVersion)
                            .to(LayerVersion::Table, LayerVersion::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-recipe-identity")
                    .table(Recipe::Table)
                    .col(Recipe::Name)
                    .col(Recipe::Version)
                    .col(Recipe::LayerVersion)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Recipe::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Recipe {
    Table,
    Id,
    Name,
    Version,
    LayerVersion,
    Summary,
    Description,
    Section,
    License,
    LicensingInfo,
    Homepage,
    Bugtracker,
    FilePath,
}

#[derive(DeriveIden)]
enum LayerVersion {
    Table,
    Id,
}
