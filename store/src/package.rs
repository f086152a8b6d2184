/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Package and file inventory.
//!
//! Build packages belong to a build directly and name their runtime
//! dependencies as free text. Target packages belong to a target and point at
//! other target packages of the same build.

use async_stream::try_stream;
use entity::build_package_dependency::BuildPackageDependencyType;
use entity::target_package_dependency::TargetPackageDependencyType;
use entity::*;
use futures::Stream;
use futures::TryStreamExt;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::Serialize;
use tracing::debug;

use crate::build::{find_build, open_build};
use crate::error::{is_unique_violation, StoreError, StoreResult};
use crate::ids::*;
use crate::types::*;
use crate::ProvenanceStore;

/// Package whose files are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PackageRef {
    Build(BuildPackageId),
    Target(TargetPackageId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: String,
    pub size: i64,
}

/// Lazy listing of the files of one package, ordered by path.
///
/// Every call to [`FileListing::stream`] starts again from the first file and
/// fetches one page per round trip.
#[derive(Debug, Clone)]
pub struct FileListing<'a> {
    db: &'a DatabaseConnection,
    package: PackageRef,
    page_size: u64,
}

impl<'a> FileListing<'a> {
    pub fn package(&self) -> PackageRef {
        self.package
    }

    pub fn stream(&self) -> impl Stream<Item = StoreResult<FileRecord>> + '_ {
        try_stream! {
            match self.package {
                PackageRef::Build(package) => {
                    let mut pages = EBuildFile::find()
                        .filter(build_file::Column::BuildPackage.eq(package))
                        .order_by_asc(build_file::Column::Path)
                        .order_by_asc(build_file::Column::Id)
                        .paginate(self.db, self.page_size);

                    while let Some(files) = pages.fetch_and_next().await.map_err(StoreError::from)? {
                        for file in files {
                            yield FileRecord { path: file.path, size: file.size };
                        }
                    }
                }
                PackageRef::Target(package) => {
                    let mut pages = ETargetFile::find()
                        .filter(target_file::Column::TargetPackage.eq(package))
                        .order_by_asc(target_file::Column::Path)
                        .order_by_asc(target_file::Column::Id)
                        .paginate(self.db, self.page_size);

                    while let Some(files) = pages.fetch_and_next().await.map_err(StoreError::from)? {
                        for file in files {
                            yield FileRecord { path: file.path, size: file.size };
                        }
                    }
                }
            }
        }
    }

    /// Drains a fresh stream into memory.
    pub async fn collect(&self) -> StoreResult<Vec<FileRecord>> {
        self.stream().try_collect().await
    }
}

async fn target_package_build<C: ConnectionTrait>(
    db: &C,
    package: TargetPackageId,
) -> StoreResult<(MTargetPackage, BuildId)> {
    let package_row = ETargetPackage::find_by_id(package.as_uuid())
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found("target_package", package))?;

    let target = ETarget::find_by_id(package_row.target)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found("target", package_row.target))?;

    Ok((package_row, BuildId::from_uuid(target.build)))
}

async fn check_recipe<C: ConnectionTrait>(db: &C, recipe: Option<RecipeId>) -> StoreResult<()> {
    if let Some(recipe) = recipe {
        if ERecipe::find_by_id(recipe.as_uuid()).one(db).await?.is_none() {
            return Err(StoreError::invalid_reference("recipe", recipe, "does not exist"));
        }
    }

    Ok(())
}

impl ProvenanceStore {
    pub async fn add_build_package(
        &self,
        build: BuildId,
        recipe: Option<RecipeId>,
        new_package: NewBuildPackage,
    ) -> StoreResult<BuildPackageId> {
        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        open_build(&txn, build).await?;
        check_recipe(&txn, recipe).await?;

        let id = BuildPackageId::generate();
        let apackage = ABuildPackage {
            id: Set(id.as_uuid()),
            build: Set(build.as_uuid()),
            recipe: Set(recipe.map(|r| r.as_uuid())),
            name: Set(new_package.name),
            version: Set(new_package.version),
            revision: Set(new_package.revision),
            summary: Set(new_package.summary),
            description: Set(new_package.description),
            size: Set(new_package.size),
            section: Set(new_package.section),
            license: Set(new_package.license),
        };

        let package = apackage.insert(&txn).await?;
        txn.commit().await?;

        debug!(build_id = %build, package_id = %id, name = %package.name, "Build package recorded");
        Ok(id)
    }

    /// Records a runtime dependency of a build package by name. The name is
    /// kept as given and is not required to match any tracked package.
    pub async fn add_build_package_dependency(
        &self,
        package: BuildPackageId,
        depends_on: &str,
        dep_type: BuildPackageDependencyType,
    ) -> StoreResult<BuildPackageDependencyId> {
        let build = BuildId::from_uuid(self.get_build_package(package).await?.build);

        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        open_build(&txn, build).await?;

        if EBuildPackage::find_by_id(package.as_uuid()).one(&txn).await?.is_none() {
            return Err(StoreError::not_found("build_package", package));
        }

        let id = BuildPackageDependencyId::generate();
        let aedge = ABuildPackageDependency {
            id: Set(id.as_uuid()),
            package: Set(package.as_uuid()),
            depends_on: Set(depends_on.to_string()),
            dep_type: Set(dep_type),
        };

        aedge.insert(&txn).await?;
        txn.commit().await?;

        debug!(build_id = %build, %package, depends_on, dep_type = %dep_type, "Build package dependency recorded");
        Ok(id)
    }

    pub async fn add_build_file(
        &self,
        package: BuildPackageId,
        path: &str,
        size: i64,
    ) -> StoreResult<BuildFileId> {
        let build = BuildId::from_uuid(self.get_build_package(package).await?.build);

        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        open_build(&txn, build).await?;

        if EBuildPackage::find_by_id(package.as_uuid()).one(&txn).await?.is_none() {
            return Err(StoreError::not_found("build_package", package));
        }

        let id = BuildFileId::generate();
        let afile = ABuildFile {
            id: Set(id.as_uuid()),
            build_package: Set(package.as_uuid()),
            path: Set(path.to_string()),
            size: Set(size),
        };

        afile.insert(&txn).await?;
        txn.commit().await?;
        Ok(id)
    }

    pub async fn add_target_package(
        &self,
        target: TargetId,
        recipe: Option<RecipeId>,
        new_package: NewTargetPackage,
    ) -> StoreResult<TargetPackageId> {
        let build = BuildId::from_uuid(self.get_target(target).await?.build);

        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        open_build(&txn, build).await?;

        if ETarget::find_by_id(target.as_uuid()).one(&txn).await?.is_none() {
            return Err(StoreError::not_found("target", target));
        }

        check_recipe(&txn, recipe).await?;

        let id = TargetPackageId::generate();
        let apackage = ATargetPackage {
            id: Set(id.as_uuid()),
            target: Set(target.as_uuid()),
            recipe: Set(recipe.map(|r| r.as_uuid())),
            name: Set(new_package.name),
            version: Set(new_package.version),
            size: Set(new_package.size),
        };

        let package = apackage.insert(&txn).await?;
        txn.commit().await?;

        debug!(build_id = %build, %target, package_id = %id, name = %package.name, "Target package recorded");
        Ok(id)
    }

    /// Adds the edge `package -> depends_on`. Both packages must be installed
    /// into targets of the same build.
    pub async fn add_target_package_dependency(
        &self,
        package: TargetPackageId,
        depends_on: TargetPackageId,
        dep_type: TargetPackageDependencyType,
    ) -> StoreResult<TargetPackageDependencyId> {
        if package == depends_on {
            return Err(StoreError::SelfDependency {
                entity: "target_package",
                id: package.as_uuid(),
            });
        }

        let (_, build) = match target_package_build(&*self.db, package).await {
            Ok(found) => found,
            Err(StoreError::NotFound { .. }) => {
                return Err(StoreError::invalid_reference(
                    "target_package",
                    package,
                    "does not exist",
                ));
            }
            Err(e) => return Err(e),
        };

        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        open_build(&txn, build).await?;

        for endpoint in [package, depends_on] {
            match target_package_build(&txn, endpoint).await {
                Ok((_, endpoint_build)) if endpoint_build == build => {}
                Ok(_) => {
                    return Err(StoreError::invalid_reference(
                        "target_package",
                        endpoint,
                        "belongs to a different build",
                    ));
                }
                Err(StoreError::NotFound { .. }) => {
                    return Err(StoreError::invalid_reference(
                        "target_package",
                        endpoint,
                        "does not exist",
                    ));
                }
                Err(e) => return Err(e),
            }
        }

        let duplicate = StoreError::DuplicateEdge {
            entity: "target_package_dependency",
            from: package.as_uuid(),
            to: depends_on.as_uuid(),
        };

        let existing = ETargetPackageDependency::find()
            .filter(target_package_dependency::Column::Package.eq(package))
            .filter(target_package_dependency::Column::DependsOn.eq(depends_on))
            .filter(target_package_dependency::Column::DepType.eq(dep_type))
            .one(&txn)
            .await?;

        if existing.is_some() {
            return Err(duplicate);
        }

        let id = TargetPackageDependencyId::generate();
        let aedge = ATargetPackageDependency {
            id: Set(id.as_uuid()),
            package: Set(package.as_uuid()),
            depends_on: Set(depends_on.as_uuid()),
            dep_type: Set(dep_type),
        };

        aedge.insert(&txn).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate
            } else {
                e.into()
            }
        })?;

        txn.commit().await?;

        debug!(build_id = %build, %package, %depends_on, dep_type = %dep_type, "Target package dependency recorded");
        Ok(id)
    }

    pub async fn add_target_file(
        &self,
        package: TargetPackageId,
        path: &str,
        size: i64,
    ) -> StoreResult<TargetFileId> {
        let (_, build) = target_package_build(&*self.db, package).await?;

        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        open_build(&txn, build).await?;
        target_package_build(&txn, package).await?;

        let id = TargetFileId::generate();
        let afile = ATargetFile {
            id: Set(id.as_uuid()),
            target_package: Set(package.as_uuid()),
            path: Set(path.to_string()),
            size: Set(size),
        };

        afile.insert(&txn).await?;
        txn.commit().await?;
        Ok(id)
    }

    pub async fn get_build_package(&self, package: BuildPackageId) -> StoreResult<MBuildPackage> {
        EBuildPackage::find_by_id(package.as_uuid())
            .one(&*self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("build_package", package))
    }

    pub async fn get_target_package(&self, package: TargetPackageId) -> StoreResult<MTargetPackage> {
        ETargetPackage::find_by_id(package.as_uuid())
            .one(&*self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("target_package", package))
    }

    pub async fn list_build_packages(&self, build: BuildId) -> StoreResult<Vec<MBuildPackage>> {
        find_build(&*self.db, build).await?;

        Ok(EBuildPackage::find()
            .filter(build_package::Column::Build.eq(build))
            .order_by_asc(build_package::Column::Name)
            .order_by_asc(build_package::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn list_target_packages(&self, target: TargetId) -> StoreResult<Vec<MTargetPackage>> {
        self.get_target(target).await?;

        Ok(ETargetPackage::find()
            .filter(target_package::Column::Target.eq(target))
            .order_by_asc(target_package::Column::Name)
            .order_by_asc(target_package::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn list_build_package_dependencies(
        &self,
        package: BuildPackageId,
    ) -> StoreResult<Vec<MBuildPackageDependency>> {
        self.get_build_package(package).await?;

        Ok(EBuildPackageDependency::find()
            .filter(build_package_dependency::Column::Package.eq(package))
            .order_by_asc(build_package_dependency::Column::DepType)
            .order_by_asc(build_package_dependency::Column::DependsOn)
            .all(&*self.db)
            .await?)
    }

    pub async fn list_target_package_dependencies(
        &self,
        package: TargetPackageId,
    ) -> StoreResult<Vec<MTargetPackageDependency>> {
        self.get_target_package(package).await?;

        Ok(ETargetPackageDependency::find()
            .filter(target_package_dependency::Column::Package.eq(package))
            .order_by_asc(target_package_dependency::Column::DepType)
            .all(&*self.db)
            .await?)
    }

    /// Lazy, restartable listing of the files of a package ordered by path.
    pub async fn list_files(&self, package: PackageRef) -> StoreResult<FileListing<'_>> {
        match package {
            PackageRef::Build(id) => {
                self.get_build_package(id).await?;
            }
            PackageRef::Target(id) => {
                self.get_target_package(id).await?;
            }
        }

        Ok(FileListing {
            db: &*self.db,
            package,
            page_size: self.page_size,
        })
    }
}
