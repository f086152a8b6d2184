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
                    .table(VariableHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VariableHistory::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VariableHistory::Variable).uuid().not_null())
                    .col(ColumnDef::new(VariableHistory::Sequence).integer().not_null())
                    .col(ColumnDef::new(VariableHistory::FileName).string().not_null())
                    .col(ColumnDef::new(VariableHistory::LineNumber).integer())
                    .col(ColumnDef::new(VariableHistory::Operation).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-variable_history-variable")
                            .from(VariableHistory::Table, VariableHistory::Variable)
                            .to(Variable::Table, Variable::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-variable_history-sequence")
                    .table(VariableHistory::Table)
                    .col(VariableHistory::Variable)
                    .col(VariableHistory::Sequence)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VariableHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VariableHistory {
    Table,
    Id,
    Variable,
    Sequence,
    FileName,
    LineNumber,
    Operation,
}

#[derive(DeriveIden)]
enum Variable {
    Table,
    Id,
}
