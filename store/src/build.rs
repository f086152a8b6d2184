/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Build aggregate: creation, finalization, targets and cascading removal.

use chrono::{NaiveDateTime, Utc};
use entity::build::BuildOutcome;
use entity::log_message::LogLevel;
use entity::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::diagnostics::count_level;
use crate::error::{StoreError, StoreResult};
use crate::ids::{BuildId, TargetId};
use crate::types::*;
use crate::ProvenanceStore;

/// Loads a build for writing and rejects it once it is finalized.
///
/// The row is selected `FOR UPDATE`, so on backends with row locks a
/// concurrent finalize from another process waits for this transaction.
pub(crate) async fn open_build<C: ConnectionTrait>(db: &C, build: BuildId) -> StoreResult<MBuild> {
    let model = EBuild::find_by_id(build.as_uuid())
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found("build", build))?;

    if model.outcome.is_terminal() {
        return Err(StoreError::BuildFinalized {
            build,
            outcome: model.outcome,
        });
    }

    Ok(model)
}

pub(crate) async fn find_build<C: ConnectionTrait>(db: &C, build: BuildId) -> StoreResult<MBuild> {
    EBuild::find_by_id(build.as_uuid())
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found("build", build))
}

/// Row counts removed by [`ProvenanceStore::delete_build`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletedRows {
    pub targets: u64,
    pub tasks: u64,
    pub task_dependencies: u64,
    pub build_packages: u64,
    pub target_packages: u64,
    pub package_dependencies: u64,
    pub files: u64,
    pub variables: u64,
    pub variable_history: u64,
    pub log_messages: u64,
}

impl ProvenanceStore {
    #[instrument(skip(self, new_build), fields(machine = %new_build.machine))]
    pub async fn create_build(&self, new_build: NewBuild) -> StoreResult<BuildId> {
        let id = BuildId::generate();

        let abuild = ABuild {
            id: Set(id.as_uuid()),
            machine: Set(new_build.machine),
            image_fstypes: Set(new_build.image_fstypes),
            distro: Set(new_build.distro),
            distro_version: Set(new_build.distro_version),
            started_on: Set(Utc::now().naive_utc()),
            completed_on: Set(None),
            outcome: Set(BuildOutcome::InProgress),
            errors_no: Set(0),
            warnings_no: Set(0),
            cooker_log_path: Set(new_build.cooker_log_path),
            build_name: Set(new_build.build_name),
            bitbake_version: Set(new_build.bitbake_version),
        };

        abuild.insert(&*self.db).await?;

        info!(build_id = %id, "Build started");
        Ok(id)
    }

    /// Moves an in-progress build to its terminal outcome.
    ///
    /// The declared error and warning counts must equal the number of
    /// recorded log messages of that level. Once this commits, every further
    /// write scoped to the build fails with [`StoreError::BuildFinalized`]; a
    /// second finalize fails with [`StoreError::InvalidStateTransition`] and
    /// changes nothing.
    #[instrument(skip(self), fields(build_id = %build))]
    pub async fn finalize_build(
        &self,
        build: BuildId,
        outcome: BuildOutcome,
        errors: i32,
        warnings: i32,
        completed_on: NaiveDateTime,
    ) -> StoreResult<MBuild> {
        let guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;

        let current = EBuild::find_by_id(build.as_uuid())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found("build", build))?;

        if current.outcome.is_terminal() || !outcome.is_terminal() {
            return Err(StoreError::InvalidStateTransition {
                build,
                from: current.outcome,
                to: outcome,
            });
        }

        for (level, declared) in [(LogLevel::Error, errors), (LogLevel::Warning, warnings)] {
            let recorded = count_level(&txn, build, level).await?;

            if i64::from(declared) != recorded as i64 {
                return Err(StoreError::CounterMismatch {
                    build,
                    level,
                    declared,
                    recorded,
                });
            }
        }

        let mut abuild: ABuild = current.into();
        abuild.outcome = Set(outcome);
        abuild.errors_no = Set(errors);
        abuild.warnings_no = Set(warnings);
        abuild.completed_on = Set(Some(completed_on));
        let updated = abuild.update(&txn).await?;

        txn.commit().await?;
        drop(guard);
        self.locks.release(build);

        info!(outcome = %outcome, errors, warnings, "Build finalized");
        Ok(updated)
    }

    pub async fn get_build(&self, build: BuildId) -> StoreResult<MBuild> {
        find_build(&*self.db, build).await
    }

    /// All builds, most recently started first.
    pub async fn list_builds(&self) -> StoreResult<Vec<MBuild>> {
        Ok(EBuild::find()
            .order_by_desc(build::Column::StartedOn)
            .all(&*self.db)
            .await?)
    }

    /// Removes a build together with everything it owns. Catalog rows
    /// (recipes, layers, layer versions) are left untouched.
    #[instrument(skip(self), fields(build_id = %build))]
    pub async fn delete_build(&self, build: BuildId) -> StoreResult<DeletedRows> {
        let guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        let mut deleted = DeletedRows::default();

        EBuild::find_by_id(build.as_uuid())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found("build", build))?;

        let task_ids: Vec<Uuid> = ETask::find()
            .filter(task::Column::Build.eq(build))
            .all(&txn)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();

        deleted.task_dependencies = ETaskDependency::delete_many()
            .filter(
                Condition::any()
                    .add(task_dependency::Column::Task.is_in(task_ids.clone()))
                    .add(task_dependency::Column::DependsOn.is_in(task_ids)),
            )
            .exec(&txn)
            .await?
            .rows_affected;

        deleted.tasks = ETask::delete_many()
            .filter(task::Column::Build.eq(build))
            .exec(&txn)
            .await?
            .rows_affected;

        let build_package_ids: Vec<Uuid> = EBuildPackage::find()
            .filter(build_package::Column::Build.eq(build))
            .all(&txn)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        deleted.package_dependencies += EBuildPackageDependency::delete_many()
            .filter(build_package_dependency::Column::Package.is_in(build_package_ids.clone()))
            .exec(&txn)
            .await?
            .rows_affected;

        deleted.files += EBuildFile::delete_many()
            .filter(build_file::Column::BuildPackage.is_in(build_package_ids))
            .exec(&txn)
            .await?
            .rows_affected;

        deleted.build_packages = EBuildPackage::delete_many()
            .filter(build_package::Column::Build.eq(build))
            .exec(&txn)
            .await?
            .rows_affected;

        let target_ids: Vec<Uuid> = ETarget::find()
            .filter(target::Column::Build.eq(build))
            .all(&txn)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();

        let target_package_ids: Vec<Uuid> = ETargetPackage::find()
            .filter(target_package::Column::Target.is_in(target_ids))
            .all(&txn)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        deleted.package_dependencies += ETargetPackageDependency::delete_many()
            .filter(
                Condition::any()
                    .add(target_package_dependency::Column::Package.is_in(target_package_ids.clone()))
                    .add(
                        target_package_dependency::Column::DependsOn
                            .is_in(target_package_ids.clone()),
                    ),
            )
            .exec(&txn)
            .await?
            .rows_affected;

        deleted.files += ETargetFile::delete_many()
            .filter(target_file::Column::TargetPackage.is_in(target_package_ids.clone()))
            .exec(&txn)
            .await?
            .rows_affected;

        deleted.target_packages = ETargetPackage::delete_many()
            .filter(target_package::Column::Id.is_in(target_package_ids))
            .exec(&txn)
            .await?
            .rows_affected;

        deleted.targets = ETarget::delete_many()
            .filter(target::Column::Build.eq(build))
            .exec(&txn)
            .await?
            .rows_affected;

        let variable_ids: Vec<Uuid> = EVariable::find()
            .filter(variable::Column::Build.eq(build))
            .all(&txn)
            .await?
            .into_iter()
            .map(|v| v.id)
            .collect();

        deleted.variable_history = EVariableHistory::delete_many()
            .filter(variable_history::Column::Variable.is_in(variable_ids))
            .exec(&txn)
            .await?
            .rows_affected;

        deleted.variables = EVariable::delete_many()
            .filter(variable::Column::Build.eq(build))
            .exec(&txn)
            .await?
            .rows_affected;

        deleted.log_messages = ELogMessage::delete_many()
            .filter(log_message::Column::Build.eq(build))
            .exec(&txn)
            .await?
            .rows_affected;

        EBuild::delete_by_id(build.as_uuid()).exec(&txn).await?;

        txn.commit().await?;
        drop(guard);
        self.locks.release(build);

        info!(
            tasks = deleted.tasks,
            packages = deleted.build_packages + deleted.target_packages,
            "Build deleted"
        );
        Ok(deleted)
    }

    pub async fn add_target(&self, build: BuildId, new_target: NewTarget) -> StoreResult<TargetId> {
        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        open_build(&txn, build).await?;

        let id = TargetId::generate();
        let atarget = ATarget {
            id: Set(id.as_uuid()),
            build: Set(build.as_uuid()),
            target: Set(new_target.target),
            is_image: Set(new_target.is_image),
            file_name: Set(new_target.file_name),
            file_size: Set(new_target.file_size),
        };

        atarget.insert(&txn).await?;
        txn.commit().await?;

        debug!(build_id = %build, target_id = %id, "Target recorded");
        Ok(id)
    }

    /// Records the image file produced for a target once it exists.
    pub async fn set_target_image_file(
        &self,
        target: TargetId,
        file_name: String,
        file_size: i64,
    ) -> StoreResult<MTarget> {
        let build = BuildId::from_uuid(self.get_target(target).await?.build);

        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        open_build(&txn, build).await?;

        let current = ETarget::find_by_id(target.as_uuid())
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found("target", target))?;

        let mut atarget: ATarget = current.into();
        atarget.file_name = Set(file_name);
        atarget.file_size = Set(file_size);
        let updated = atarget.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }

    pub async fn get_target(&self, target: TargetId) -> StoreResult<MTarget> {
        ETarget::find_by_id(target.as_uuid())
            .one(&*self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("target", target))
    }

    pub async fn list_targets(&self, build: BuildId) -> StoreResult<Vec<MTarget>> {
        find_build(&*self.db, build).await?;

        Ok(ETarget::find()
            .filter(target::Column::Build.eq(build))
            .order_by_asc(target::Column::Target)
            .all(&*self.db)
            .await?)
    }
}
