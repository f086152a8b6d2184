/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Layer and recipe catalog.
//!
//! Catalog rows are shared by all builds and are only ever appended. Adding
//! a layer, layer version or recipe that already exists under the same key
//! returns the existing id.

use entity::recipe_dependency::RecipeDependencyType;
use entity::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::{debug, info};

use crate::error::{is_unique_violation, StoreError, StoreResult};
use crate::ids::{LayerId, LayerVersionId, RecipeDependencyId, RecipeId};
use crate::types::*;
use crate::ProvenanceStore;

impl ProvenanceStore {
    pub async fn add_layer(&self, new_layer: NewLayer) -> StoreResult<LayerId> {
        let _guard = self.catalog.lock().await;

        let existing = ELayer::find()
            .filter(layer::Column::Name.eq(new_layer.name.clone()))
            .filter(layer::Column::LocalPath.eq(new_layer.local_path.clone()))
            .filter(layer::Column::LayerIndexUrl.eq(new_layer.layer_index_url.clone()))
            .one(&*self.db)
            .await?;

        if let Some(existing) = existing {
            return Ok(LayerId::from_uuid(existing.id));
        }

        let id = LayerId::generate();
        let alayer = ALayer {
            id: Set(id.as_uuid()),
            name: Set(new_layer.name),
            local_path: Set(new_layer.local_path),
            layer_index_url: Set(new_layer.layer_index_url),
        };

        let layer = alayer.insert(&*self.db).await?;

        info!(layer_id = %id, name = %layer.name, "Layer registered");
        Ok(id)
    }

    pub async fn add_layer_version(
        &self,
        layer: LayerId,
        new_version: NewLayerVersion,
    ) -> StoreResult<LayerVersionId> {
        let _guard = self.catalog.lock().await;
        let txn = self.db.begin().await?;

        if ELayer::find_by_id(layer.as_uuid()).one(&txn).await?.is_none() {
            return Err(StoreError::invalid_reference("layer", layer, "does not exist"));
        }

        let existing = ELayerVersion::find()
            .filter(layer_version::Column::Layer.eq(layer))
            .filter(layer_version::Column::Branch.eq(new_version.branch.clone()))
            .filter(layer_version::Column::Commit.eq(new_version.commit.clone()))
            .filter(layer_version::Column::Priority.eq(new_version.priority))
            .one(&txn)
            .await?;

        if let Some(existing) = existing {
            return Ok(LayerVersionId::from_uuid(existing.id));
        }

        let id = LayerVersionId::generate();
        let aversion = ALayerVersion {
            id: Set(id.as_uuid()),
            layer: Set(layer.as_uuid()),
            branch: Set(new_version.branch),
            commit: Set(new_version.commit),
            priority: Set(new_version.priority),
        };

        aversion.insert(&txn).await?;
        txn.commit().await?;

        debug!(%layer, layer_version_id = %id, "Layer version registered");
        Ok(id)
    }

    /// Registers a recipe under `layer_version`.
    ///
    /// Recipes are keyed by name, version, layer version and file path. A
    /// recipe with a different file path under the same name, version and
    /// layer version is stored as a separate row rather than merged.
    pub async fn add_recipe(
        &self,
        layer_version: LayerVersionId,
        new_recipe: NewRecipe,
    ) -> StoreResult<RecipeId> {
        let _guard = self.catalog.lock().await;
        let txn = self.db.begin().await?;

        if ELayerVersion::find_by_id(layer_version.as_uuid())
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(StoreError::invalid_reference(
                "layer_version",
                layer_version,
                "does not exist",
            ));
        }

        let existing = ERecipe::find()
            .filter(recipe::Column::Name.eq(new_recipe.name.clone()))
            .filter(recipe::Column::Version.eq(new_recipe.version.clone()))
            .filter(recipe::Column::LayerVersion.eq(layer_version))
            .filter(recipe::Column::FilePath.eq(new_recipe.file_path.clone()))
            .one(&txn)
            .await?;

        if let Some(existing) = existing {
            return Ok(RecipeId::from_uuid(existing.id));
        }

        let id = RecipeId::generate();
        let arecipe = ARecipe {
            id: Set(id.as_uuid()),
            name: Set(new_recipe.name),
            version: Set(new_recipe.version),
            layer_version: Set(layer_version.as_uuid()),
            summary: Set(new_recipe.summary),
            description: Set(new_recipe.description),
            section: Set(new_recipe.section),
            license: Set(new_recipe.license),
            licensing_info: Set(new_recipe.licensing_info),
            homepage: Set(new_recipe.homepage),
            bugtracker: Set(new_recipe.bugtracker),
            file_path: Set(new_recipe.file_path),
        };

        let recipe = arecipe.insert(&txn).await?;
        txn.commit().await?;

        debug!(recipe_id = %id, name = %recipe.name, version = %recipe.version, "Recipe registered");
        Ok(id)
    }

    pub async fn get_layer(&self, layer: LayerId) -> StoreResult<MLayer> {
        ELayer::find_by_id(layer.as_uuid())
            .one(&*self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("layer", layer))
    }

    pub async fn get_layer_version(&self, layer_version: LayerVersionId) -> StoreResult<MLayerVersion> {
        ELayerVersion::find_by_id(layer_version.as_uuid())
            .one(&*self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("layer_version", layer_version))
    }

    pub async fn get_recipe(&self, recipe: RecipeId) -> StoreResult<MRecipe> {
        ERecipe::find_by_id(recipe.as_uuid())
            .one(&*self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("recipe", recipe))
    }

    /// Recipes named `name`, optionally narrowed to one version.
    pub async fn find_recipes(&self, name: &str, version: Option<&str>) -> StoreResult<Vec<MRecipe>> {
        let mut query = ERecipe::find().filter(recipe::Column::Name.eq(name));

        if let Some(version) = version {
            query = query.filter(recipe::Column::Version.eq(version));
        }

        Ok(query
            .order_by_asc(recipe::Column::Version)
            .order_by_asc(recipe::Column::FilePath)
            .all(&*self.db)
            .await?)
    }

    pub async fn add_recipe_dependency(
        &self,
        recipe: RecipeId,
        depends_on: RecipeId,
        dep_type: RecipeDependencyType,
    ) -> StoreResult<RecipeDependencyId> {
        if recipe == depends_on {
            return Err(StoreError::SelfDependency {
                entity: "recipe",
                id: recipe.as_uuid(),
            });
        }

        let txn = self.db.begin().await?;

        for endpoint in [recipe, depends_on] {
            if ERecipe::find_by_id(endpoint.as_uuid()).one(&txn).await?.is_none() {
                return Err(StoreError::invalid_reference("recipe", endpoint, "does not exist"));
            }
        }

        let duplicate = StoreError::DuplicateEdge {
            entity: "recipe_dependency",
            from: recipe.as_uuid(),
            to: depends_on.as_uuid(),
        };

        let existing = ERecipeDependency::find()
            .filter(recipe_dependency::Column::Recipe.eq(recipe))
            .filter(recipe_dependency::Column::DependsOn.eq(depends_on))
            .filter(recipe_dependency::Column::DepType.eq(dep_type))
            .one(&txn)
            .await?;

        if existing.is_some() {
            return Err(duplicate);
        }

        let id = RecipeDependencyId::generate();
        let aedge = ARecipeDependency {
            id: Set(id.as_uuid()),
            recipe: Set(recipe.as_uuid()),
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

        debug!(%recipe, %depends_on, dep_type = %dep_type, "Recipe dependency recorded");
        Ok(id)
    }

    /// Outgoing dependency edges of a recipe.
    pub async fn list_recipe_dependencies(&self, recipe: RecipeId) -> StoreResult<Vec<MRecipeDependency>> {
        self.get_recipe(recipe).await?;

        Ok(ERecipeDependency::find()
            .filter(recipe_dependency::Column::Recipe.eq(recipe))
            .order_by_asc(recipe_dependency::Column::DepType)
            .order_by_asc(recipe_dependency::Column::DependsOn)
            .all(&*self.db)
            .await?)
    }
}
