/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    DeriveActiveEnum,
    EnumIter,
    Deserialize,
    Serialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum RecipeDependencyType {
    #[sea_orm(num_value = 0)]
    Depends,
    #[sea_orm(num_value = 1)]
    RDepends,
}

labelled_enum!(RecipeDependencyType {
    Depends => "depends",
    RDepends => "rdepends",
});

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "recipe_dependency")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub recipe: Uuid,
    pub depends_on: Uuid,
    pub dep_type: RecipeDependencyType,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Recipe,
    DependsOn,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Recipe => Entity::belongs_to(super::recipe::Entity)
                .from(Column::Recipe)
                .to(super::recipe::Column::Id)
                .into(),
            Self::DependsOn => Entity::belongs_to(super::recipe::Entity)
                .from(Column::DependsOn)
                .to(super::recipe::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
