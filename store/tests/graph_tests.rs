/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use common::*;
use entity::build_package_dependency::BuildPackageDependencyType;
use entity::recipe_dependency::RecipeDependencyType;
use entity::target_package_dependency::TargetPackageDependencyType;
use std::collections::HashSet;
use store::graph::Direction;
use store::types::*;
use store::*;
use uuid::Uuid;

fn ids<T>(rows: &[T], id: impl Fn(&T) -> Uuid) -> HashSet<Uuid> {
    rows.iter().map(id).collect()
}

#[tokio::test]
async fn test_task_closure_survives_cycles() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let recipe = recipe(&store, "busybox").await;

    let mut tasks = Vec::new();
    for (order, name) in ["do_fetch", "do_unpack", "do_patch", "do_configure"]
        .into_iter()
        .enumerate()
    {
        tasks.push(
            store
                .record_task(build, recipe, Some(order as i32 + 1), executed(name))
                .await
                .unwrap(),
        );
    }
    let [fetch, unpack, patch, configure] = tasks[..] else {
        panic!("expected four tasks");
    };

    store.add_task_dependency(configure, patch).await.unwrap();
    store.add_task_dependency(patch, unpack).await.unwrap();
    store.add_task_dependency(unpack, fetch).await.unwrap();
    store.add_task_dependency(fetch, patch).await.unwrap();

    let closure = store
        .task_closure(configure, Direction::Dependencies)
        .await
        .unwrap();
    assert_eq!(
        closure
            .iter()
            .map(|t| TaskId::from_uuid(t.id))
            .collect::<Vec<_>>(),
        vec![fetch, unpack, patch]
    );

    let dependents = store
        .task_closure(fetch, Direction::Dependents)
        .await
        .unwrap();
    assert_eq!(
        ids(&dependents, |t| t.id),
        HashSet::from([unpack.as_uuid(), patch.as_uuid(), configure.as_uuid()])
    );

    assert!(store
        .task_closure(configure, Direction::Dependents)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_recipe_closure_by_type() {
    let store = setup().await;
    let image = recipe(&store, "core-image-minimal").await;
    let busybox = recipe(&store, "busybox").await;
    let glibc = recipe(&store, "glibc").await;
    let gcc = recipe(&store, "gcc-cross").await;

    store
        .add_recipe_dependency(image, busybox, RecipeDependencyType::RDepends)
        .await
        .unwrap();
    store
        .add_recipe_dependency(busybox, glibc, RecipeDependencyType::RDepends)
        .await
        .unwrap();
    store
        .add_recipe_dependency(glibc, gcc, RecipeDependencyType::Depends)
        .await
        .unwrap();
    store
        .add_recipe_dependency(gcc, glibc, RecipeDependencyType::Depends)
        .await
        .unwrap();

    let all = store
        .recipe_closure(image, Direction::Dependencies, None)
        .await
        .unwrap();
    assert_eq!(
        ids(&all, |r| r.id),
        HashSet::from([busybox.as_uuid(), glibc.as_uuid(), gcc.as_uuid()])
    );

    let runtime = store
        .recipe_closure(image, Direction::Dependencies, Some(RecipeDependencyType::RDepends))
        .await
        .unwrap();
    assert_eq!(
        ids(&runtime, |r| r.id),
        HashSet::from([busybox.as_uuid(), glibc.as_uuid()])
    );

    let users = store
        .recipe_closure(glibc, Direction::Dependents, None)
        .await
        .unwrap();
    assert_eq!(
        ids(&users, |r| r.id),
        HashSet::from([busybox.as_uuid(), image.as_uuid(), gcc.as_uuid()])
    );
}

#[tokio::test]
async fn test_target_package_closure() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let target = store
        .add_target(
            build,
            NewTarget {
                target: "core-image-minimal".to_string(),
                is_image: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mut packages = Vec::new();
    for name in ["busybox", "libc6", "ld-linux", "update-alternatives"] {
        packages.push(
            store
                .add_target_package(
                    target,
                    None,
                    NewTargetPackage {
                        name: name.to_string(),
                        ..Default::default()
                    },
                )
                .await
                .unwrap(),
        );
    }
    let [busybox, libc, ld, alternatives] = packages[..] else {
        panic!("expected four packages");
    };

    store
        .add_target_package_dependency(busybox, libc, TargetPackageDependencyType::RDepends)
        .await
        .unwrap();
    store
        .add_target_package_dependency(libc, ld, TargetPackageDependencyType::RDepends)
        .await
        .unwrap();
    store
        .add_target_package_dependency(ld, libc, TargetPackageDependencyType::RDepends)
        .await
        .unwrap();
    store
        .add_target_package_dependency(busybox, alternatives, TargetPackageDependencyType::Recommends)
        .await
        .unwrap();

    let hard = store
        .target_package_closure(busybox, Direction::Dependencies, Some(TargetPackageDependencyType::RDepends))
        .await
        .unwrap();
    assert_eq!(
        hard.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["ld-linux", "libc6"]
    );

    let everything = store
        .target_package_closure(busybox, Direction::Dependencies, None)
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);

    let dependents = store
        .target_package_closure(ld, Direction::Dependents, None)
        .await
        .unwrap();
    assert_eq!(
        ids(&dependents, |p| p.id),
        HashSet::from([libc.as_uuid(), busybox.as_uuid()])
    );
}

#[tokio::test]
async fn test_soft_closure_reports_unresolved_names() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;

    let mut packages = Vec::new();
    for name in ["busybox", "libc6", "ld-linux"] {
        packages.push(
            store
                .add_build_package(
                    build,
                    None,
                    NewBuildPackage {
                        name: name.to_string(),
                        ..Default::default()
                    },
                )
                .await
                .unwrap(),
        );
    }
    let [busybox, libc, ld] = packages[..] else {
        panic!("expected three packages");
    };

    for (package, name, dep_type) in [
        (busybox, "libc6", BuildPackageDependencyType::RDepends),
        (busybox, "busybox-syslog", BuildPackageDependencyType::RRecommends),
        (libc, "ld-linux", BuildPackageDependencyType::RDepends),
        (ld, "libc6", BuildPackageDependencyType::RDepends),
        (libc, "virtual-libc", BuildPackageDependencyType::RProvides),
    ] {
        store
            .add_build_package_dependency(package, name, dep_type)
            .await
            .unwrap();
    }

    let closure = store
        .build_package_closure(busybox, Direction::Dependencies, &[])
        .await
        .unwrap();
    assert_eq!(
        closure.packages.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["ld-linux", "libc6"]
    );
    assert_eq!(closure.unresolved, vec!["busybox-syslog", "virtual-libc"]);

    let runtime = store
        .build_package_closure(busybox, Direction::Dependencies, &[BuildPackageDependencyType::RDepends])
        .await
        .unwrap();
    assert_eq!(runtime.packages.len(), 2);
    assert!(runtime.unresolved.is_empty());

    let dependents = store
        .build_package_closure(ld, Direction::Dependents, &[])
        .await
        .unwrap();
    assert_eq!(
        dependents.packages.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["busybox", "libc6"]
    );
}
