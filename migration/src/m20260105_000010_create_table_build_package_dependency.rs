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
                    .table(BuildPackageDependency::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BuildPackageDependency::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BuildPackageDependency::Package)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BuildPackageDependency::DependsOn)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BuildPackageDependency::DepType)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-build_package_dependency-package")
                            .from(
                                BuildPackageDependency::Table,
                                BuildPackageDependency::Package,
                            )
                            .to(BuildPackage::Table, BuildPackage::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(BuildPackageDependency::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum BuildPackageDependency {
    Table,
    Id,
    Package,
    DependsOn,
    DepType,
}

#[derive(DeriveIden)]
enum BuildPackage {
    Table,
    Id,
}
