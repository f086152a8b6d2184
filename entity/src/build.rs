/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
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
pub enum BuildOutcome {
    #[sea_orm(num_value = 0)]
    Succeeded,
    #[sea_orm(num_value = 1)]
    Failed,
    #[sea_orm(num_value = 2)]
    InProgress,
}

labelled_enum!(BuildOutcome {
    Succeeded => "Succeeded",
    Failed => "Failed",
    InProgress => "In Progress",
});

impl BuildOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BuildOutcome::InProgress)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "build")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub machine: String,
    pub image_fstypes: String,
    pub distro: String,
    pub distro_version: String,
    pub started_on: NaiveDateTime,
    pub completed_on: Option<NaiveDateTime>,
    pub outcome: BuildOutcome,
    pub errors_no: i32,
    pub warnings_no: i32,
    pub cooker_log_path: String,
    pub build_name: String,
    pub bitbake_version: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
