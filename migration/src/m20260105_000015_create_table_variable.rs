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
                    .table(Variable::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Variable::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Variable::Build).uuid().not_null())
                    .col(ColumnDef::new(Variable::VariableName).string().not_null())
                    .col(ColumnDef::new(Variable::VariableValue).text().not_null())
                    .col(
                        ColumnDef::new(Variable::Changed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Variable::HumanReadableName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Variable::Description).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-variable-build")
                            .from(Variable::Table, Variable::Build)
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
                    .name("idx-variable-build-name")
                    .table(Variable::Table)
                    .col(Variable::Build)
                    .col(Variable::VariableName)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Variable::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Variable {
    Table,
    Id,
    Build,
    VariableName,
    VariableValue,
    Changed,
    HumanReadableName,
    Description,
}

#[derive(DeriveIden)]
enum Build {
    Table,
    Id,
}
