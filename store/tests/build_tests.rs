/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use chrono::{NaiveDate, Utc};
use common::*;
use entity::build::BuildOutcome;
use entity::build_package_dependency::BuildPackageDependencyType;
use entity::log_message::LogLevel;
use entity::target_package_dependency::TargetPackageDependencyType;
use sea_orm::{EntityTrait, PaginatorTrait};
use std::time::Duration;
use store::types::*;
use store::*;

#[tokio::test]
async fn test_create_build_starts_in_progress() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;

    let row = store.get_build(build).await.unwrap();
    assert_eq!(row.machine, "qemux86");
    assert_eq!(row.outcome, BuildOutcome::InProgress);
    assert_eq!(row.completed_on, None);
    assert_eq!(row.errors_no, 0);
    assert_eq!(row.warnings_no, 0);
}

#[tokio::test]
async fn test_get_unknown_build() {
    let store = setup().await;
    let missing: BuildId = "7b7e4c3a-3d52-4f43-9a7e-0f5d0d1f6a11".parse().unwrap();

    let err = store.get_build(missing).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "build", .. }));

    let err = store.list_tasks(missing).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_finalize_twice_fails_without_changes() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let completed_on = NaiveDate::from_ymd_opt(2026, 1, 5)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();

    let finalized = store
        .finalize_build(build, BuildOutcome::Succeeded, 0, 0, completed_on)
        .await
        .unwrap();
    assert_eq!(finalized.outcome, BuildOutcome::Succeeded);
    assert_eq!(finalized.completed_on, Some(completed_on));

    let err = store
        .finalize_build(build, BuildOutcome::Failed, 0, 0, Utc::now().naive_utc())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidStateTransition {
            from: BuildOutcome::Succeeded,
            to: BuildOutcome::Failed,
            ..
        }
    ));

    assert_eq!(store.get_build(build).await.unwrap(), finalized);
}

#[tokio::test]
async fn test_finalize_requires_terminal_outcome() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;

    let err = store
        .finalize_build(build, BuildOutcome::InProgress, 0, 0, Utc::now().naive_utc())
        .await
        .unwrap_err();
    assert!(err.is_state_violation());

    assert_eq!(
        store.get_build(build).await.unwrap().outcome,
        BuildOutcome::InProgress
    );
}

#[tokio::test]
async fn test_writes_after_finalize_are_rejected() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let recipe = recipe(&store, "busybox").await;
    let package = store
        .add_build_package(
            build,
            Some(recipe),
            NewBuildPackage {
                name: "busybox".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let variable = store
        .set_variable(build, "MACHINE", "qemux86", false, VariableMetadata::default())
        .await
        .unwrap();

    store
        .finalize_build(build, BuildOutcome::Failed, 0, 0, Utc::now().naive_utc())
        .await
        .unwrap();

    let err = store
        .record_task(build, recipe, Some(1), executed("do_fetch"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::BuildFinalized { outcome: BuildOutcome::Failed, .. }));

    let err = store
        .log_message(build, LogLevel::Error, "late", "", None)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::BuildFinalized { .. }));

    let err = store
        .set_variable(build, "DISTRO", "poky", false, VariableMetadata::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::BuildFinalized { .. }));

    let err = store
        .append_variable_history(variable, "conf/local.conf", Some(3), "set")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::BuildFinalized { .. }));

    let err = store
        .add_build_file(package, "/bin/busybox", 1024)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::BuildFinalized { .. }));

    let err = store
        .add_target(
            build,
            NewTarget {
                target: "core-image-minimal".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::BuildFinalized { .. }));

    assert!(store.list_tasks(build).await.unwrap().is_empty());
    assert!(store.list_log_messages(build, None).await.unwrap().is_empty());
    assert_eq!(store.list_variables(build).await.unwrap().len(), 1);
    assert!(store.variable_history(variable).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_finalize_checks_error_count() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;

    for _ in 0..3 {
        store
            .log_message(build, LogLevel::Error, "compile failed", "log.do_compile", Some(12))
            .await
            .unwrap();
    }

    assert_eq!(store.count_by_level(build, LogLevel::Error).await.unwrap(), 3);
    assert_eq!(store.get_build(build).await.unwrap().errors_no, 3);

    let err = store
        .finalize_build(build, BuildOutcome::Failed, 2, 0, Utc::now().naive_utc())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::CounterMismatch {
            level: LogLevel::Error,
            declared: 2,
            recorded: 3,
            ..
        }
    ));
    assert_eq!(
        store.get_build(build).await.unwrap().outcome,
        BuildOutcome::InProgress
    );

    let finalized = store
        .finalize_build(build, BuildOutcome::Failed, 3, 0, Utc::now().naive_utc())
        .await
        .unwrap();
    assert_eq!(finalized.outcome, BuildOutcome::Failed);
    assert_eq!(finalized.errors_no, 3);
    assert_eq!(finalized.warnings_no, 0);
}

#[tokio::test]
async fn test_list_builds_newest_first() {
    let store = setup().await;
    let first = create_build(&store, "qemux86").await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = create_build(&store, "qemuarm").await;

    let ids: Vec<_> = store
        .list_builds()
        .await
        .unwrap()
        .into_iter()
        .map(|b| BuildId::from_uuid(b.id))
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
async fn test_target_image_file() {
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

    let updated = store
        .set_target_image_file(target, "core-image-minimal-qemux86.ext4".to_string(), 4096)
        .await
        .unwrap();
    assert_eq!(updated.file_name, "core-image-minimal-qemux86.ext4");
    assert_eq!(updated.file_size, 4096);

    let targets = store.list_targets(build).await.unwrap();
    assert_eq!(targets, vec![updated]);
}

#[tokio::test]
async fn test_delete_build_keeps_catalog() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let other = create_build(&store, "qemuarm").await;
    let busybox = recipe(&store, "busybox").await;
    let glibc = recipe(&store, "glibc").await;

    let fetch = store
        .record_task(build, busybox, Some(1), executed("do_fetch"))
        .await
        .unwrap();
    let compile = store
        .record_task(build, busybox, Some(2), executed("do_compile"))
        .await
        .unwrap();
    store.add_task_dependency(compile, fetch).await.unwrap();
    store
        .record_task(other, glibc, Some(1), executed("do_fetch"))
        .await
        .unwrap();

    let package = store
        .add_build_package(
            build,
            Some(busybox),
            NewBuildPackage {
                name: "busybox".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    store
        .add_build_package_dependency(package, "libc6", BuildPackageDependencyType::RDepends)
        .await
        .unwrap();
    store.add_build_file(package, "/bin/busybox", 1024).await.unwrap();

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
    let installed = store
        .add_target_package(
            target,
            Some(busybox),
            NewTargetPackage {
                name: "busybox".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let libc = store
        .add_target_package(
            target,
            Some(glibc),
            NewTargetPackage {
                name: "libc6".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    store
        .add_target_package_dependency(installed, libc, TargetPackageDependencyType::RDepends)
        .await
        .unwrap();
    store.add_target_file(installed, "/bin/busybox", 1024).await.unwrap();

    let variable = store
        .set_variable(build, "MACHINE", "qemux86", false, VariableMetadata::default())
        .await
        .unwrap();
    store
        .append_variable_history(variable, "conf/local.conf", Some(1), "set")
        .await
        .unwrap();
    store
        .log_message(build, LogLevel::Warning, "fuzz", "", None)
        .await
        .unwrap();

    let deleted = store.delete_build(build).await.unwrap();
    assert_eq!(deleted.tasks, 2);
    assert_eq!(deleted.task_dependencies, 1);
    assert_eq!(deleted.targets, 1);
    assert_eq!(deleted.build_packages, 1);
    assert_eq!(deleted.target_packages, 2);
    assert_eq!(deleted.package_dependencies, 2);
    assert_eq!(deleted.files, 2);
    assert_eq!(deleted.variables, 1);
    assert_eq!(deleted.variable_history, 1);
    assert_eq!(deleted.log_messages, 1);

    assert!(matches!(
        store.get_build(build).await.unwrap_err(),
        StoreError::NotFound { .. }
    ));
    assert!(matches!(
        store.get_task(fetch).await.unwrap_err(),
        StoreError::NotFound { .. }
    ));

    let db = store.connection();
    assert_eq!(entity::task::Entity::find().count(db).await.unwrap(), 1);
    assert_eq!(entity::build_file::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(entity::target_file::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(entity::variable_history::Entity::find().count(db).await.unwrap(), 0);

    assert_eq!(store.get_recipe(busybox).await.unwrap().name, "busybox");
    assert_eq!(store.get_recipe(glibc).await.unwrap().name, "glibc");
    assert_eq!(entity::layer::Entity::find().count(db).await.unwrap(), 1);
    assert_eq!(entity::layer_version::Entity::find().count(db).await.unwrap(), 1);

    assert_eq!(store.list_tasks(other).await.unwrap().len(), 1);
}
