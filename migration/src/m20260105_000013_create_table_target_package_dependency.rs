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
                    .table(TargetPackageDependency::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TargetPackageDependency::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TargetPackageDependency::Package)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TargetPackageDependency::DependsOn)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TargetPackageDependency::DepType)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-target_package_dependency-package")
                            .from(
                                TargetPackageDependency::Table,
                                TargetPackageDependency::Package,
                            )
                            .to(TargetPackage::Table, TargetPackage::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-target_package_dependency-depends_on")
                            .from(
                                TargetPackageDependency::Table,
                                TargetPackageDependency::DependsOn,
                            )
                            .to(TargetPackage::Table, TargetPackage::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-target_package_dependency-edge")
                    .table(TargetPackageDependency::Table)
                    .col(TargetPackageDependency::Package)
                    .col(TargetPackageDependency::DependsOn)
                    .col(TargetPackageDependency::DepType)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(TargetPackageDependency::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum TargetPackageDependency {
    Table,
    Id,
    Package,
    DependsOn,
    DepType,
}

#[derive(DeriveIden)]
enum TargetPackage {
    Table,
    Id,
}
