/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Read-only verification of the invariants of one build.
//!
//! The write path rejects violations up front. This checker is for data that
//! was imported or edited outside the store.

use entity::log_message::LogLevel;
use entity::*;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::build::find_build;
use crate::diagnostics::count_level;
use crate::error::{StoreError, StoreResult};
use crate::ids::BuildId;
use crate::input::validate_task_state;
use crate::types::*;
use crate::ProvenanceStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    DanglingRecipe {
        entity: &'static str,
        id: Uuid,
        recipe: Uuid,
    },
    DuplicateOrder {
        order: i32,
        tasks: Vec<Uuid>,
    },
    InconsistentTask {
        task: Uuid,
        reason: String,
    },
    SelfEdge {
        table: &'static str,
        id: Uuid,
    },
    DanglingEdge {
        table: &'static str,
        from: Uuid,
        to: Uuid,
    },
    CrossBuildEdge {
        table: &'static str,
        from: Uuid,
        to: Uuid,
    },
    CounterMismatch {
        level: LogLevel,
        stored: i32,
        recorded: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrityReport {
    pub build: BuildId,
    pub violations: Vec<Violation>,
}

impl IntegrityReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

fn task_record(task: &MTask) -> TaskRecord {
    TaskRecord {
        task_executed: task.task_executed,
        outcome: task.outcome,
        sstate_result: task.sstate_result,
        cpu_usage: task.cpu_usage,
        ..Default::default()
    }
}

impl ProvenanceStore {
    #[instrument(skip(self), fields(build_id = %build))]
    pub async fn verify_integrity(&self, build: BuildId) -> StoreResult<IntegrityReport> {
        let build_row = find_build(&*self.db, build).await?;
        let mut violations = Vec::new();

        let tasks = ETask::find()
            .filter(task::Column::Build.eq(build))
            .all(&*self.db)
            .await?;

        let build_packages = EBuildPackage::find()
            .filter(build_package::Column::Build.eq(build))
            .all(&*self.db)
            .await?;

        let target_ids: Vec<Uuid> = ETarget::find()
            .filter(target::Column::Build.eq(build))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();

        let target_packages = ETargetPackage::find()
            .filter(target_package::Column::Target.is_in(target_ids))
            .all(&*self.db)
            .await?;

        let mut recipe_refs: Vec<(&'static str, Uuid, Uuid)> = tasks
            .iter()
            .map(|t| ("task", t.id, t.recipe))
            .collect();
        recipe_refs.extend(
            build_packages
                .iter()
                .filter_map(|p| p.recipe.map(|r| ("build_package", p.id, r))),
        );
        recipe_refs.extend(
            target_packages
                .iter()
                .filter_map(|p| p.recipe.map(|r| ("target_package", p.id, r))),
        );

        let known_recipes: HashSet<Uuid> = ERecipe::find()
            .filter(recipe::Column::Id.is_in(recipe_refs.iter().map(|(_, _, r)| *r)))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();

        for &(entity, id, recipe) in &recipe_refs {
            if !known_recipes.contains(&recipe) {
                violations.push(Violation::DanglingRecipe { entity, id, recipe });
            }
        }

        let mut by_order: BTreeMap<i32, Vec<Uuid>> = BTreeMap::new();
        for task in &tasks {
            if let Some(order) = task.order {
                by_order.entry(order).or_default().push(task.id);
            }

            if let Err(StoreError::InvalidTaskState(reason)) = validate_task_state(&task_record(task)) {
                violations.push(Violation::InconsistentTask {
                    task: task.id,
                    reason: reason.to_string(),
                });
            }
        }

        violations.extend(
            by_order
                .into_iter()
                .filter(|(_, ids)| ids.len() > 1)
                .map(|(order, tasks)| Violation::DuplicateOrder { order, tasks }),
        );

        let task_ids: HashSet<Uuid> = tasks.iter().map(|t| t.id).collect();
        let task_edges = ETaskDependency::find()
            .filter(
                Condition::any()
                    .add(task_dependency::Column::Task.is_in(task_ids.iter().copied()))
                    .add(task_dependency::Column::DependsOn.is_in(task_ids.iter().copied())),
            )
            .all(&*self.db)
            .await?;

        let task_builds: HashMap<Uuid, Uuid> = ETask::find()
            .filter(
                task::Column::Id.is_in(
                    task_edges
                        .iter()
                        .flat_map(|e| [e.task, e.depends_on])
                        .collect::<HashSet<_>>(),
                ),
            )
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|t| (t.id, t.build))
            .collect();

        for edge in &task_edges {
            if edge.task == edge.depends_on {
                violations.push(Violation::SelfEdge {
                    table: "task_dependency",
                    id: edge.id,
                });
                continue;
            }

            match (task_builds.get(&edge.task), task_builds.get(&edge.depends_on)) {
                (Some(a), Some(b)) if a == b => {}
                (Some(_), Some(_)) => violations.push(Violation::CrossBuildEdge {
                    table: "task_dependency",
                    from: edge.task,
                    to: edge.depends_on,
                }),
                _ => violations.push(Violation::DanglingEdge {
                    table: "task_dependency",
                    from: edge.task,
                    to: edge.depends_on,
                }),
            }
        }

        let package_ids: HashSet<Uuid> = target_packages.iter().map(|p| p.id).collect();
        let package_edges = ETargetPackageDependency::find()
            .filter(
                Condition::any()
                    .add(target_package_dependency::Column::Package.is_in(package_ids.iter().copied()))
                    .add(
                        target_package_dependency::Column::DependsOn
                            .is_in(package_ids.iter().copied()),
                    ),
            )
            .all(&*self.db)
            .await?;

        for edge in &package_edges {
            if edge.package == edge.depends_on {
                violations.push(Violation::SelfEdge {
                    table: "target_package_dependency",
                    id: edge.id,
                });
            } else if !package_ids.contains(&edge.package) || !package_ids.contains(&edge.depends_on) {
                let endpoints_exist = ETargetPackage::find()
                    .filter(target_package::Column::Id.is_in([edge.package, edge.depends_on]))
                    .all(&*self.db)
                    .await?
                    .len()
                    == 2;

                violations.push(if endpoints_exist {
                    Violation::CrossBuildEdge {
                        table: "target_package_dependency",
                        from: edge.package,
                        to: edge.depends_on,
                    }
                } else {
                    Violation::DanglingEdge {
                        table: "target_package_dependency",
                        from: edge.package,
                        to: edge.depends_on,
                    }
                });
            }
        }

        let recipe_edges = ERecipeDependency::find()
            .filter(recipe_dependency::Column::Recipe.is_in(known_recipes.iter().copied()))
            .all(&*self.db)
            .await?;

        violations.extend(
            recipe_edges
                .iter()
                .filter(|e| e.recipe == e.depends_on)
                .map(|e| Violation::SelfEdge {
                    table: "recipe_dependency",
                    id: e.id,
                }),
        );

        for (level, stored) in [
            (LogLevel::Error, build_row.errors_no),
            (LogLevel::Warning, build_row.warnings_no),
        ] {
            let recorded = count_level(&*self.db, build, level).await?;

            if i64::from(stored) != recorded as i64 {
                violations.push(Violation::CounterMismatch {
                    level,
                    stored,
                    recorded,
                });
            }
        }

        if violations.is_empty() {
            info!("Build passed integrity check");
        } else {
            warn!(violations = violations.len(), "Build failed integrity check");
        }

        Ok(IntegrityReport { build, violations })
    }
}
