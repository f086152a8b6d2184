/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Shared fixtures for store integration tests.

#![allow(dead_code)]

use entity::task::{SstateResult, TaskOutcome};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use store::types::*;
use store::*;

/// A store backed by a fresh, migrated in-memory SQLite database.
///
/// The pool holds exactly one connection so every query sees the same
/// in-memory database.
pub async fn setup() -> ProvenanceStore {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    ProvenanceStore::new(db)
}

pub async fn create_build(store: &ProvenanceStore, machine: &str) -> BuildId {
    store
        .create_build(NewBuild {
            machine: machine.to_string(),
            distro: "poky".to_string(),
            distro_version: "5.0".to_string(),
            build_name: "core-image-minimal".to_string(),
            bitbake_version: "2.8.0".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create build")
}

pub async fn layer_version(store: &ProvenanceStore) -> LayerVersionId {
    let layer = store
        .add_layer(NewLayer {
            name: "meta".to_string(),
            local_path: "/srv/poky/meta".to_string(),
            layer_index_url: String::new(),
        })
        .await
        .expect("Failed to add layer");

    store
        .add_layer_version(
            layer,
            NewLayerVersion {
                branch: "scarthgap".to_string(),
                commit: "5f1e0b1".to_string(),
                priority: 5,
            },
        )
        .await
        .expect("Failed to add layer version")
}

pub async fn recipe(store: &ProvenanceStore, name: &str) -> RecipeId {
    let layer_version = layer_version(store).await;

    store
        .add_recipe(
            layer_version,
            NewRecipe {
                name: name.to_string(),
                version: "1.0".to_string(),
                license: "MIT".to_string(),
                file_path: format!("/srv/poky/meta/recipes-core/{name}/{name}_1.0.bb"),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to add recipe")
}

pub fn executed(task_name: &str) -> TaskRecord {
    TaskRecord {
        task_name: task_name.to_string(),
        task_executed: true,
        outcome: TaskOutcome::Succeeded,
        sstate_result: SstateResult::NotApplicable,
        ..Default::default()
    }
}

pub fn from_sstate(task_name: &str, result: SstateResult) -> TaskRecord {
    TaskRecord {
        task_name: task_name.to_string(),
        task_executed: false,
        outcome: if result == SstateResult::Restored {
            TaskOutcome::Sstate
        } else {
            TaskOutcome::Covered
        },
        sstate_result: result,
        ..Default::default()
    }
}
