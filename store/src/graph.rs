/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Transitive closures over the dependency edge tables.
//!
//! None of the edge tables is guaranteed to be acyclic. Every traversal keeps
//! a visited set and expands one frontier per query, so each node is fetched
//! at most once regardless of cycles. The start node is never part of its own
//! closure.

use entity::build_package_dependency::BuildPackageDependencyType;
use entity::recipe_dependency::RecipeDependencyType;
use entity::target_package_dependency::TargetPackageDependencyType;
use entity::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::ids::{BuildPackageId, RecipeId, TargetPackageId, TaskId};
use crate::task::execution_order;
use crate::types::*;
use crate::ProvenanceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// Everything the start node depends on.
    Dependencies,
    /// Everything that depends on the start node.
    Dependents,
}

#[derive(Debug, Clone, Copy)]
enum EdgeTable {
    Task,
    Recipe(Option<RecipeDependencyType>),
    TargetPackage(Option<TargetPackageDependencyType>),
}

/// Closure over the name-based build package dependencies.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SoftClosure {
    pub packages: Vec<MBuildPackage>,
    /// Dependency names with no package of that name in the build.
    pub unresolved: Vec<String>,
}

impl ProvenanceStore {
    async fn neighbours(
        &self,
        table: EdgeTable,
        direction: Direction,
        frontier: Vec<Uuid>,
    ) -> StoreResult<Vec<Uuid>> {
        let forward = direction == Direction::Dependencies;

        Ok(match table {
            EdgeTable::Task => {
                let from = if forward {
                    task_dependency::Column::Task
                } else {
                    task_dependency::Column::DependsOn
                };

                ETaskDependency::find()
                    .filter(from.is_in(frontier))
                    .all(&*self.db)
                    .await?
                    .into_iter()
                    .map(|edge| if forward { edge.depends_on } else { edge.task })
                    .collect()
            }
            EdgeTable::Recipe(dep_type) => {
                let from = if forward {
                    recipe_dependency::Column::Recipe
                } else {
                    recipe_dependency::Column::DependsOn
                };

                let mut query = ERecipeDependency::find().filter(from.is_in(frontier));
                if let Some(dep_type) = dep_type {
                    query = query.filter(recipe_dependency::Column::DepType.eq(dep_type));
                }

                query
                    .all(&*self.db)
                    .await?
                    .into_iter()
                    .map(|edge| if forward { edge.depends_on } else { edge.recipe })
                    .collect()
            }
            EdgeTable::TargetPackage(dep_type) => {
                let from = if forward {
                    target_package_dependency::Column::Package
                } else {
                    target_package_dependency::Column::DependsOn
                };

                let mut query = ETargetPackageDependency::find().filter(from.is_in(frontier));
                if let Some(dep_type) = dep_type {
                    query = query.filter(target_package_dependency::Column::DepType.eq(dep_type));
                }

                query
                    .all(&*self.db)
                    .await?
                    .into_iter()
                    .map(|edge| if forward { edge.depends_on } else { edge.package })
                    .collect()
            }
        })
    }

    async fn traverse(
        &self,
        table: EdgeTable,
        direction: Direction,
        start: Uuid,
    ) -> StoreResult<Vec<Uuid>> {
        let mut visited = HashSet::from([start]);
        let mut reached = Vec::new();
        let mut frontier = vec![start];

        while !frontier.is_empty() {
            let next = self.neighbours(table, direction, frontier).await?;
            frontier = Vec::new();

            for id in next {
                if visited.insert(id) {
                    reached.push(id);
                    frontier.push(id);
                }
            }
        }

        Ok(reached)
    }

    /// Tasks transitively reachable from `task`, in execution order.
    pub async fn task_closure(&self, task: TaskId, direction: Direction) -> StoreResult<Vec<MTask>> {
        self.get_task(task).await?;

        let reached = self
            .traverse(EdgeTable::Task, direction, task.as_uuid())
            .await?;

        let mut tasks = ETask::find()
            .filter(task::Column::Id.is_in(reached))
            .all(&*self.db)
            .await?;

        tasks.sort_by(execution_order);
        Ok(tasks)
    }

    /// Recipes transitively reachable from `recipe`, optionally following
    /// only one dependency type.
    pub async fn recipe_closure(
        &self,
        recipe: RecipeId,
        direction: Direction,
        dep_type: Option<RecipeDependencyType>,
    ) -> StoreResult<Vec<MRecipe>> {
        self.get_recipe(recipe).await?;

        let reached = self
            .traverse(EdgeTable::Recipe(dep_type), direction, recipe.as_uuid())
            .await?;

        Ok(ERecipe::find()
            .filter(recipe::Column::Id.is_in(reached))
            .order_by_asc(recipe::Column::Name)
            .order_by_asc(recipe::Column::Version)
            .all(&*self.db)
            .await?)
    }

    pub async fn target_package_closure(
        &self,
        package: TargetPackageId,
        direction: Direction,
        dep_type: Option<TargetPackageDependencyType>,
    ) -> StoreResult<Vec<MTargetPackage>> {
        self.get_target_package(package).await?;

        let reached = self
            .traverse(EdgeTable::TargetPackage(dep_type), direction, package.as_uuid())
            .await?;

        Ok(ETargetPackage::find()
            .filter(target_package::Column::Id.is_in(reached))
            .order_by_asc(target_package::Column::Name)
            .all(&*self.db)
            .await?)
    }

    /// Follows name-based dependencies of a build package through the packages
    /// of the same build.
    ///
    /// Names are matched against package names. An empty `dep_types` follows
    /// every dependency type. Walking towards dependencies, names that match
    /// no package are collected in [`SoftClosure::unresolved`].
    pub async fn build_package_closure(
        &self,
        package: BuildPackageId,
        direction: Direction,
        dep_types: &[BuildPackageDependencyType],
    ) -> StoreResult<SoftClosure> {
        let start = self.get_build_package(package).await?;

        let packages = EBuildPackage::find()
            .filter(build_package::Column::Build.eq(start.build))
            .all(&*self.db)
            .await?;

        let mut visited = HashSet::from([start.id]);
        let mut reached = Vec::new();
        let mut unresolved = BTreeSet::new();
        let mut frontier = vec![start];

        while !frontier.is_empty() {
            let mut next = Vec::new();

            match direction {
                Direction::Dependencies => {
                    let mut query = EBuildPackageDependency::find().filter(
                        build_package_dependency::Column::Package
                            .is_in(frontier.iter().map(|p| p.id)),
                    );
                    if !dep_types.is_empty() {
                        query = query.filter(
                            build_package_dependency::Column::DepType.is_in(dep_types.iter().copied()),
                        );
                    }

                    for edge in query.all(&*self.db).await? {
                        let matches: Vec<_> = packages
                            .iter()
                            .filter(|p| p.name == edge.depends_on)
                            .collect();

                        if matches.is_empty() {
                            unresolved.insert(edge.depends_on);
                        }

                        next.extend(matches.into_iter().cloned());
                    }
                }
                Direction::Dependents => {
                    let names: BTreeSet<String> = frontier.iter().map(|p| p.name.clone()).collect();
                    let mut query = EBuildPackageDependency::find().filter(
                        build_package_dependency::Column::DependsOn.is_in(names),
                    );
                    if !dep_types.is_empty() {
                        query = query.filter(
                            build_package_dependency::Column::DepType.is_in(dep_types.iter().copied()),
                        );
                    }

                    let sources: HashSet<Uuid> = query
                        .all(&*self.db)
                        .await?
                        .into_iter()
                        .map(|edge| edge.package)
                        .collect();

                    next.extend(packages.iter().filter(|p| sources.contains(&p.id)).cloned());
                }
            }

            frontier = Vec::new();
            for package in next {
                if visited.insert(package.id) {
                    reached.push(package.clone());
                    frontier.push(package);
                }
            }
        }

        reached.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        Ok(SoftClosure {
            packages: reached,
            unresolved: unresolved.into_iter().collect(),
        })
    }
}
