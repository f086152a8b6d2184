/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use common::*;
use entity::log_message::LogLevel;
use sea_orm::ActiveModelTrait;
use sea_orm::ActiveValue::Set;
use store::integrity::Violation;
use store::*;
use uuid::Uuid;

#[tokio::test]
async fn test_consistent_build_passes() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let recipe = recipe(&store, "busybox").await;

    let fetch = store
        .record_task(build, recipe, Some(1), executed("do_fetch"))
        .await
        .unwrap();
    let unpack = store
        .record_task(build, recipe, Some(2), executed("do_unpack"))
        .await
        .unwrap();
    store.add_task_dependency(unpack, fetch).await.unwrap();
    store
        .log_message(build, LogLevel::Warning, "QA issue", "", None)
        .await
        .unwrap();

    let report = store.verify_integrity(build).await.unwrap();
    assert!(report.is_ok(), "{:?}", report.violations);
    assert_eq!(report.build, build);
}

#[tokio::test]
async fn test_detects_rows_written_around_the_store() {
    let store = setup().await;
    let build = create_build(&store, "qemux86").await;
    let recipe = recipe(&store, "busybox").await;
    let task = store
        .record_task(build, recipe, Some(1), executed("do_fetch"))
        .await
        .unwrap();

    let db = store.connection();

    entity::log_message::ActiveModel {
        id: Set(Uuid::new_v4()),
        build: Set(build.as_uuid()),
        sequence: Set(1),
        level: Set(LogLevel::Error),
        message: Set("imported".to_string()),
        pathname: Set(String::new()),
        lineno: Set(None),
    }
    .insert(db)
    .await
    .unwrap();

    let edge = Uuid::new_v4();
    entity::task_dependency::ActiveModel {
        id: Set(edge),
        task: Set(task.as_uuid()),
        depends_on: Set(task.as_uuid()),
    }
    .insert(db)
    .await
    .unwrap();

    let report = store.verify_integrity(build).await.unwrap();
    assert!(!report.is_ok());
    assert!(report.violations.contains(&Violation::CounterMismatch {
        level: LogLevel::Error,
        stored: 0,
        recorded: 1,
    }));
    assert!(report.violations.contains(&Violation::SelfEdge {
        table: "task_dependency",
        id: edge,
    }));
}

#[tokio::test]
async fn test_unknown_build() {
    let store = setup().await;
    let missing: BuildId = "aa0e5f4d-1b2c-4d3e-8f9a-0b1c2d3e4f5a".parse().unwrap();

    assert!(matches!(
        store.verify_integrity(missing).await.unwrap_err(),
        StoreError::NotFound { .. }
    ));
}
