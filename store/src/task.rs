/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Task execution ledger.

use entity::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use std::cmp::Ordering;
use tracing::debug;

use crate::build::{find_build, open_build};
use crate::error::{is_unique_violation, StoreError, StoreResult};
use crate::ids::{BuildId, RecipeId, TaskDependencyId, TaskId};
use crate::input::validate_task_state;
use crate::types::*;
use crate::ProvenanceStore;

/// Execution order: ordered tasks by position, then unordered ones, ties
/// broken by recipe.
pub(crate) fn execution_order(a: &MTask, b: &MTask) -> Ordering {
    match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.recipe.cmp(&b.recipe))
}

impl ProvenanceStore {
    /// Records one task run of `recipe` within `build`.
    ///
    /// `order` is the execution position and must be unused within the build;
    /// `None` records an unordered task.
    pub async fn record_task(
        &self,
        build: BuildId,
        recipe: RecipeId,
        order: Option<i32>,
        record: TaskRecord,
    ) -> StoreResult<TaskId> {
        validate_task_state(&record)?;

        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        open_build(&txn, build).await?;

        if ERecipe::find_by_id(recipe.as_uuid()).one(&txn).await?.is_none() {
            return Err(StoreError::invalid_reference(
                "recipe",
                recipe,
                "does not exist",
            ));
        }

        if let Some(order) = order {
            let taken = ETask::find()
                .filter(task::Column::Build.eq(build))
                .filter(task::Column::Order.eq(order))
                .one(&txn)
                .await?;

            if taken.is_some() {
                return Err(StoreError::DuplicateOrder { build, order });
            }
        }

        let id = TaskId::generate();
        let atask = ATask {
            id: Set(id.as_uuid()),
            build: Set(build.as_uuid()),
            order: Set(order),
            task_executed: Set(record.task_executed),
            outcome: Set(record.outcome),
            sstate_checksum: Set(record.sstate_checksum),
            path_to_sstate_obj: Set(record.path_to_sstate_obj),
            recipe: Set(recipe.as_uuid()),
            task_name: Set(record.task_name),
            source_url: Set(record.source_url),
            work_directory: Set(record.work_directory),
            script_type: Set(record.script_type),
            line_number: Set(record.line_number),
            disk_io: Set(record.disk_io),
            cpu_usage: Set(record.cpu_usage),
            elapsed_time: Set(record.elapsed_time),
            sstate_result: Set(record.sstate_result),
            message: Set(record.message),
            logfile: Set(record.logfile),
        };

        let task = atask.insert(&txn).await.map_err(|e| match order {
            Some(order) if is_unique_violation(&e) => StoreError::DuplicateOrder { build, order },
            _ => e.into(),
        })?;

        txn.commit().await?;

        debug!(
            build_id = %build,
            task_id = %id,
            task = %task.task_name,
            outcome = %task.outcome,
            "Task recorded"
        );
        Ok(id)
    }

    /// Adds the edge `task -> depends_on`. Both tasks must belong to the same
    /// build, which must still be in progress.
    pub async fn add_task_dependency(
        &self,
        task: TaskId,
        depends_on: TaskId,
    ) -> StoreResult<TaskDependencyId> {
        if task == depends_on {
            return Err(StoreError::SelfDependency {
                entity: "task",
                id: task.as_uuid(),
            });
        }

        let build = match self.get_task(task).await {
            Ok(row) => BuildId::from_uuid(row.build),
            Err(StoreError::NotFound { .. }) => {
                return Err(StoreError::invalid_reference("task", task, "does not exist"));
            }
            Err(e) => return Err(e),
        };

        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        open_build(&txn, build).await?;

        for endpoint in [task, depends_on] {
            let row = ETask::find_by_id(endpoint.as_uuid()).one(&txn).await?;

            match row {
                Some(row) if row.build == build.as_uuid() => {}
                Some(_) => {
                    return Err(StoreError::invalid_reference(
                        "task",
                        endpoint,
                        "belongs to a different build",
                    ));
                }
                None => {
                    return Err(StoreError::invalid_reference(
                        "task",
                        endpoint,
                        "does not exist",
                    ));
                }
            }
        }

        let duplicate = StoreError::DuplicateEdge {
            entity: "task_dependency",
            from: task.as_uuid(),
            to: depends_on.as_uuid(),
        };

        let existing = ETaskDependency::find()
            .filter(task_dependency::Column::Task.eq(task))
            .filter(task_dependency::Column::DependsOn.eq(depends_on))
            .one(&txn)
            .await?;

        if existing.is_some() {
            return Err(duplicate);
        }

        let id = TaskDependencyId::generate();
        let aedge = ATaskDependency {
            id: Set(id.as_uuid()),
            task: Set(task.as_uuid()),
            depends_on: Set(depends_on.as_uuid()),
        };

        aedge.insert(&txn).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate
            } else {
                e.into()
            }
        })?;

        txn.commit().await?;

        debug!(build_id = %build, %task, %depends_on, "Task dependency recorded");
        Ok(id)
    }

    pub async fn get_task(&self, task: TaskId) -> StoreResult<MTask> {
        ETask::find_by_id(task.as_uuid())
            .one(&*self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("task", task))
    }

    /// Tasks of a build in execution order, unordered tasks last.
    pub async fn list_tasks(&self, build: BuildId) -> StoreResult<Vec<MTask>> {
        find_build(&*self.db, build).await?;

        let mut tasks = ETask::find()
            .filter(task::Column::Build.eq(build))
            .all(&*self.db)
            .await?;

        tasks.sort_by(execution_order);
        Ok(tasks)
    }

    /// Direct dependencies of a task.
    pub async fn list_task_dependencies(&self, task: TaskId) -> StoreResult<Vec<MTask>> {
        self.get_task(task).await?;

        let targets: Vec<_> = ETaskDependency::find()
            .filter(task_dependency::Column::Task.eq(task))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|edge| edge.depends_on)
            .collect();

        let mut tasks = ETask::find()
            .filter(task::Column::Id.is_in(targets))
            .all(&*self.db)
            .await?;

        tasks.sort_by(execution_order);
        Ok(tasks)
    }
}
