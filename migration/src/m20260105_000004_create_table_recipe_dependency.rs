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
                    .table(RecipeDependency::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecipeDependency::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RecipeDependency::Recipe).uuid().not_null())
                    .col(
                        ColumnDef::new(RecipeDependency::DependsOn)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecipeDependency::DepType)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-recipe_dependency-recipe")
                            .from(RecipeDependency::Table, RecipeDependency::Recipe)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-recipe_dependency-depends_on")
                            .from(RecipeDependency::Table, RecipeDependency::DependsOn)
                            .to(Recipe::Table, Recipe::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-recipe_dependency-edge")
                    .table(RecipeDependency::Table)
                    .col(RecipeDependency::Recipe)
                    .col(RecipeDependency::DependsOn)
                    .col(RecipeDependency::DepType)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeDependency::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RecipeDependency {
    Table,
    Id,
    Recipe,
    DependsOn,
    DepType,
}

#[derive(DeriveIden)]
enum Recipe {
    Table,
    Id,
}
