/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_table_layer;
mod m20260105_000002_create_table_layer_version;
mod m20260105_000003_create_table_recipe;
mod m20260105_000004_create_table_recipe_dependency;
mod m20260105_000005_create_table_build;
mod m20260105_000006_create_table_target;
mod m20260105_000007_create_table_task;
mod m20260105_000008_create_table_task_dependency;
mod m20260105_000009_create_table_build_package;
mod m20260105_000010_create_table_build_package_dependency;
mod m20260105_000011_create_table_build_file;
mod m20260105_000012_create_table_target_package;
mod m20260105_000013_create_table_target_package_dependency;
mod m20260105_000014_create_table_target_file;
mod m20260105_000015_create_table_variable;
mod m20260105_000016_create_table_variable_history;
mod m20260105_000017_create_table_log_message;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_table_layer::Migration),
            Box::new(m20260105_000002_create_table_layer_version::Migration),
            Box::new(m20260105_000003_create_table_recipe::Migration),
            Box::new(m20260105_000004_create_table_recipe_dependency::Migration),
            Box::new(m20260105_000005_create_table_build::Migration),
            Box::new(m20260105_000006_create_table_target::Migration),
            Box::new(m20260105_000007_create_table_task::Migration),
            Box::new(m20260105_000008_create_table_task_dependency::Migration),
            Box::new(m20260105_000009_create_table_build_package::Migration),
            Box::new(m20260105_000010_create_table_build_package_dependency::Migration),
            Box::new(m20260105_000011_create_table_build_file::Migration),
            Box::new(m20260105_000012_create_table_target_package::Migration),
            Box::new(m20260105_000013_create_table_target_package_dependency::Migration),
            Box::new(m20260105_000014_create_table_target_file::Migration),
            Box::new(m20260105_000015_create_table_variable::Migration),
            Box::new(m20260105_000016_create_table_variable_history::Migration),
            Box::new(m20260105_000017_create_table_log_message::Migration),
        ]
    }
}
