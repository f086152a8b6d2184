/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use common::*;
use entity::task::{SstateResult, TaskOutcome};
use store::types::*;
use store::*;

#[tokio::test]
async fn test_duplicate_order_is_rejected() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let recipe = recipe(&store, "busybox").await;

    let task = store
        .record_task(build, recipe, Some(1), executed("do_fetch"))
        .await
        .unwrap();

    let err = store
        .record_task(build, recipe, Some(1), executed("do_unpack"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateOrder { order: 1, .. }));

    let tasks = store.list_tasks(build).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(TaskId::from_uuid(tasks[0].id), task);
}

#[tokio::test]
async fn test_order_is_scoped_per_build() {
    let store = setup().await;
    let first = create_build(&store, "qemux86").await;
    let second = create_build(&store, "qemuarm").await;
    let recipe = recipe(&store, "busybox").await;

    store
        .record_task(first, recipe, Some(1), executed("do_fetch"))
        .await
        .unwrap();
    store
        .record_task(second, recipe, Some(1), executed("do_fetch"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unordered_tasks_listed_last() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let recipe = recipe(&store, "busybox").await;

    let unordered_a = store
        .record_task(build, recipe, None, executed("do_listtasks"))
        .await
        .unwrap();
    let second = store
        .record_task(build, recipe, Some(2), executed("do_compile"))
        .await
        .unwrap();
    let unordered_b = store
        .record_task(build, recipe, None, executed("do_cleansstate"))
        .await
        .unwrap();
    let first = store
        .record_task(build, recipe, Some(1), executed("do_fetch"))
        .await
        .unwrap();

    let tasks = store.list_tasks(build).await.unwrap();
    let ids: Vec<_> = tasks.iter().map(|t| TaskId::from_uuid(t.id)).collect();

    assert_eq!(&ids[..2], &[first, second]);
    assert!(ids[2..].contains(&unordered_a));
    assert!(ids[2..].contains(&unordered_b));
    assert_eq!(tasks[3].order, None);
}

#[tokio::test]
async fn test_task_requires_existing_recipe() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let missing: RecipeId = "3f1d2b86-9d7f-4b59-8c34-6f3e1b0f2a77".parse().unwrap();

    let err = store
        .record_task(build, missing, Some(1), executed("do_fetch"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidReference { entity: "recipe", .. }));
}

#[tokio::test]
async fn test_inconsistent_sstate_is_rejected() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let recipe = recipe(&store, "busybox").await;

    let record = TaskRecord {
        sstate_result: SstateResult::Restored,
        ..executed("do_populate_sysroot")
    };

    let err = store
        .record_task(build, recipe, Some(1), record)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidTaskState(_)));
    assert!(store.list_tasks(build).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_task_attributes_are_stored() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let recipe = recipe(&store, "busybox").await;

    let record = TaskRecord {
        sstate_checksum: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
        work_directory: "/build/tmp/work/busybox".to_string(),
        disk_io: Some(52_428_800),
        cpu_usage: Some(9_850),
        elapsed_time: Some(12.5),
        logfile: "/build/tmp/work/busybox/temp/log.do_compile".to_string(),
        ..executed("do_compile")
    };

    let task = store
        .record_task(build, recipe, Some(7), record)
        .await
        .unwrap();

    let row = store.get_task(task).await.unwrap();
    assert_eq!(row.build, build.as_uuid());
    assert_eq!(row.recipe, recipe.as_uuid());
    assert_eq!(row.order, Some(7));
    assert_eq!(row.task_name, "do_compile");
    assert_eq!(row.outcome, TaskOutcome::Succeeded);
    assert_eq!(row.disk_io, Some(52_428_800));
    assert_eq!(row.cpu_usage, Some(9_850));
    assert_eq!(row.elapsed_time, Some(12.5));
}

#[tokio::test]
async fn test_task_dependency_checks() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let other = create_build(&store, "qemuarm").await;
    let recipe = recipe(&store, "busybox").await;

    let fetch = store
        .record_task(build, recipe, Some(1), executed("do_fetch"))
        .await
        .unwrap();
    let unpack = store
        .record_task(build, recipe, Some(2), executed("do_unpack"))
        .await
        .unwrap();
    let foreign = store
        .record_task(other, recipe, Some(1), executed("do_fetch"))
        .await
        .unwrap();

    let err = store.add_task_dependency(unpack, unpack).await.unwrap_err();
    assert!(matches!(err, StoreError::SelfDependency { entity: "task", .. }));

    let err = store.add_task_dependency(unpack, foreign).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidReference { entity: "task", .. }));

    let edge: TaskDependencyId = store.add_task_dependency(unpack, fetch).await.unwrap();
    assert_ne!(edge.as_uuid(), fetch.as_uuid());

    let err = store.add_task_dependency(unpack, fetch).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEdge { .. }));

    let deps = store.list_task_dependencies(unpack).await.unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(TaskId::from_uuid(deps[0].id), fetch);
}

#[tokio::test]
async fn test_task_dependency_with_unknown_endpoint() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let recipe = recipe(&store, "busybox").await;
    let fetch = store
        .record_task(build, recipe, Some(1), executed("do_fetch"))
        .await
        .unwrap();
    let missing: TaskId = "6b0c2f4e-1a8d-4e3b-9f57-2d9a0c7e5b13".parse().unwrap();

    let err = store.add_task_dependency(missing, fetch).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidReference { entity: "task", .. }));

    let err = store.add_task_dependency(fetch, missing).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidReference { entity: "task", .. }));

    assert!(store.list_task_dependencies(fetch).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_outcome_and_sstate_summaries() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let recipe = recipe(&store, "busybox").await;

    store
        .record_task(build, recipe, Some(1), executed("do_fetch"))
        .await
        .unwrap();
    store
        .record_task(build, recipe, Some(2), from_sstate("do_populate_sysroot", SstateResult::Restored))
        .await
        .unwrap();
    store
        .record_task(build, recipe, Some(3), from_sstate("do_package", SstateResult::Restored))
        .await
        .unwrap();
    store
        .record_task(build, recipe, Some(4), from_sstate("do_deploy", SstateResult::Missing))
        .await
        .unwrap();
    store
        .record_task(build, recipe, None, from_sstate("do_packagedata", SstateResult::Failed))
        .await
        .unwrap();

    let outcomes = store.task_outcome_summary(build).await.unwrap();
    assert_eq!(outcomes.total, 5);
    assert_eq!(outcomes.executed, 1);
    assert_eq!(outcomes.unordered, 1);
    assert_eq!(outcomes.count(TaskOutcome::Succeeded), 1);
    assert_eq!(outcomes.count(TaskOutcome::Sstate), 2);
    assert_eq!(outcomes.count(TaskOutcome::Covered), 2);
    assert_eq!(outcomes.count(TaskOutcome::Failed), 0);

    let sstate = store.sstate_summary(build).await.unwrap();
    assert_eq!(sstate.count(SstateResult::NotApplicable), 1);
    assert_eq!(sstate.count(SstateResult::Restored), 2);
    assert_eq!(sstate.hit_ratio, Some(0.5));
}

#[tokio::test]
async fn test_empty_build_summaries() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;

    let outcomes = store.task_outcome_summary(build).await.unwrap();
    assert_eq!(outcomes.total, 0);
    assert!(outcomes.outcomes.is_empty());

    let sstate = store.sstate_summary(build).await.unwrap();
    assert_eq!(sstate.hit_ratio, None);
}
