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
                    .table(LogMessage::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LogMessage::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(LogMessage::Build).uuid().not_null())
                    .col(ColumnDef::new(LogMessage::Sequence).integer().not_null())
                    .col(
                        ColumnDef::new(LogMessage::Level)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(LogMessage::Message).string().not_null())
                    .col(ColumnDef::new(LogMessage::Pathname).string().not_null())
                    .col(ColumnDef::new(LogMessage::Lineno).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-log_message-build")
                            .from(LogMessage::Table, LogMessage::Build)
                            .to(Build::Table, Build::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-log_message-build-sequence")
                    .table(LogMessage::Table)
                    .col(LogMessage::Build)
                    .col(LogMessage::Sequence)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LogMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LogMessage {
    Table,
    Id,
    Build,
    Sequence,
    Level,
    Message,
    Pathname,
    Lineno,
}

#[derive(DeriveIden)]
enum Build {
    Table,
    Id,
}
