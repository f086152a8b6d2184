/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub name: String,
    pub version: String,
    pub layer_version: Uuid,
    pub summary: String,
    pub description: String,
    pub section: String,
    pub license: String,
    pub licensing_info: String,
    pub homepage: String,
    pub bugtracker: String,
    pub file_path: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::layer_version::Entity",
        from = "Column::LayerVersion",
        to = "super::layer_version::Column::Id"
    )]
    LayerVersion,
}

impl ActiveModelBehavior for ActiveModel {}
