/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use common::*;
use entity::recipe_dependency::RecipeDependencyType;
use store::types::*;
use store::*;

fn busybox(file_path: &str) -> NewRecipe {
    NewRecipe {
        name: "busybox".to_string(),
        version: "1.36.1".to_string(),
        license: "GPL-2.0-only".to_string(),
        file_path: file_path.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_layer_and_version_are_reused() {
    let store = setup().await;

    let first = layer_version(&store).await;
    let second = layer_version(&store).await;
    assert_eq!(first, second);

    let version = store.get_layer_version(first).await.unwrap();
    let layer = store
        .get_layer(LayerId::from_uuid(version.layer))
        .await
        .unwrap();
    assert_eq!(layer.name, "meta");
    assert_eq!(version.branch, "scarthgap");
}

#[tokio::test]
async fn test_layer_version_requires_layer() {
    let store = setup().await;
    let missing: LayerId = "0b6f5e0e-8f0c-4a8e-9f55-2b0c8e7d1a10".parse().unwrap();

    let err = store
        .add_layer_version(
            missing,
            NewLayerVersion {
                branch: "master".to_string(),
                commit: "abc".to_string(),
                priority: 1,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidReference { entity: "layer", .. }));
}

#[tokio::test]
async fn test_recipe_identity_includes_file_path() {
    let store = setup().await;
    let layer_version = layer_version(&store).await;

    let first = store
        .add_recipe(layer_version, busybox("recipes-core/busybox/busybox_1.36.1.bb"))
        .await
        .unwrap();
    let again = store
        .add_recipe(layer_version, busybox("recipes-core/busybox/busybox_1.36.1.bb"))
        .await
        .unwrap();
    assert_eq!(first, again);

    let relocated = store
        .add_recipe(layer_version, busybox("recipes-extended/busybox/busybox_1.36.1.bb"))
        .await
        .unwrap();
    assert_ne!(first, relocated);

    let found = store.find_recipes("busybox", Some("1.36.1")).await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(store.find_recipes("busybox", Some("1.35.0")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_recipe_requires_layer_version() {
    let store = setup().await;
    let missing: LayerVersionId = "c1a4f1f7-2f5c-4d0c-bb6a-5a1d9d40c7e2".parse().unwrap();

    let err = store
        .add_recipe(missing, busybox("busybox.bb"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidReference { .. }));
}

#[tokio::test]
async fn test_recipe_self_dependency() {
    let store = setup().await;
    let recipe = recipe(&store, "busybox").await;

    let err = store
        .add_recipe_dependency(recipe, recipe, RecipeDependencyType::Depends)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::SelfDependency { entity: "recipe", .. }));
    assert!(store.list_recipe_dependencies(recipe).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_recipe_duplicate_edge() {
    let store = setup().await;
    let busybox = recipe(&store, "busybox").await;
    let glibc = recipe(&store, "glibc").await;

    store
        .add_recipe_dependency(busybox, glibc, RecipeDependencyType::Depends)
        .await
        .unwrap();

    let err = store
        .add_recipe_dependency(busybox, glibc, RecipeDependencyType::Depends)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEdge { entity: "recipe_dependency", .. }));

    store
        .add_recipe_dependency(busybox, glibc, RecipeDependencyType::RDepends)
        .await
        .unwrap();

    let deps = store.list_recipe_dependencies(busybox).await.unwrap();
    assert_eq!(deps.len(), 2);
    assert_eq!(deps[0].dep_type, RecipeDependencyType::Depends);
    assert_eq!(deps[1].dep_type, RecipeDependencyType::RDepends);
}

#[tokio::test]
async fn test_recipe_dependency_requires_endpoints() {
    let store = setup().await;
    let busybox = recipe(&store, "busybox").await;
    let missing: RecipeId = "5d2c8f0e-6a1b-4c3d-9e8f-7a6b5c4d3e2f".parse().unwrap();

    let err = store
        .add_recipe_dependency(busybox, missing, RecipeDependencyType::RDepends)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidReference { .. }));
}
