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
                    .table(Build::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Build::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Build::Machine).string().not_null())
                    .col(ColumnDef::new(Build::ImageFstypes).string().not_null())
                    .col(ColumnDef::new(Build::Distro).string().not_null())
                    .col(ColumnDef::new(Build::DistroVersion).string().not_null())
                    .col(ColumnDef::new(Build::StartedOn).date_time().not_null())
                    .col(ColumnDef::new(Build::CompletedOn).date_time())
                    .col(
                        ColumnDef::new(Build::Outcome)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(
                        ColumnDef::new(Build::ErrorsNo)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Build::WarningsNo)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Build::CookerLogPath).string().not_null())
                    .col(ColumnDef::new(Build::BuildName).string().not_null())
                    .col(ColumnDef::new(Build::BitbakeVersion).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Build::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Build {
    Table,
    Id,
    Machine,
    ImageFstypes,
    Distro,
    DistroVersion,
    StartedOn,
    CompletedOn,
    Outcome,
    ErrorsNo,
    WarningsNo,
    CookerLogPath,
    BuildName,
    BitbakeVersion,
}
