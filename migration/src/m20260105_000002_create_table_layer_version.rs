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
                    .table(LayerVersion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LayerVersion::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LayerVersion::Layer).uuid().not_null())
                    .col(ColumnDef::new(LayerVersion::Branch).string().not_null())
                    .col(ColumnDef::new(LayerVersion::Commit).string().not_null())
                    .col(ColumnDef::new(LayerVersion::Priority).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-layer_version-layer")
                            .from(LayerVersion::Table, LayerVersion::Layer)
                            .to(Layer::Table, Layer::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LayerVersion::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LayerVersion {
    Table,
    Id,
    Layer,
    Branch,
    Commit,
    Priority,
}

#[derive(DeriveIden)]
enum Layer {
    Table,
    Id,
}
