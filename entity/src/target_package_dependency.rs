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
pub enum TargetPackageDependencyType {
    #[sea_orm(num_value = 0)]
    Depends,
    #[sea_orm(num_value = 1)]
    RDepends,
    #[sea_orm(num_value = 2)]
    Recommends,
}

labelled_enum!(TargetPackageDependencyType {
    Depends => "depends",
    RDepends => "rdepends",
    Recommends => "recommends",
});

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "target_package_dependency")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub package: Uuid,
    pub depends_on: Uuid,
    pub dep_type: TargetPackageDependencyType,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Package,
    DependsOn,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Package => Entity::belongs_to(super::target_package::Entity)
                .from(Column::Package)
                .to(super::target_package::Column::Id)
                .into(),
            Self::DependsOn => Entity::belongs_to(super::target_package::Entity)
                .from(Column::DependsOn)
                .to(super::target_package::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
