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
pub enum BuildPackageDependencyType {
    #[sea_orm(num_value = 0)]
    RDepends,
    #[sea_orm(num_value = 1)]
    RProvides,
    #[sea_orm(num_value = 2)]
    RRecommends,
    #[sea_orm(num_value = 3)]
    RSuggests,
    #[sea_orm(num_value = 4)]
    RReplaces,
    #[sea_orm(num_value = 5)]
    RConflicts,
}

labelled_enum!(BuildPackageDependencyType {
    RDepends => "rdepends",
    RProvides => "rprovides",
    RRecommends => "rrecommends",
    RSuggests => "rsuggests",
    RReplaces => "rreplaces",
    RConflicts => "rconflicts",
});

/// Runtime relation from a build package to another package named by string.
/// The name is kept as written and never resolved to a row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "build_package_dependency")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub package: Uuid,
    pub depends_on: String,
    pub dep_type: BuildPackageDependencyType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::build_package::Entity",
        from = "Column::Package",
        to = "super::build_package::Column::Id"
    )]
    Package,
}

impl ActiveModelBehavior for ActiveModel {}
