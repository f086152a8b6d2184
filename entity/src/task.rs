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
    Default,
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
pub enum TaskOutcome {
    #[sea_orm(num_value = 0)]
    Succeeded,
    #[sea_orm(num_value = 1)]
    Covered,
    #[sea_orm(num_value = 2)]
    Sstate,
    #[sea_orm(num_value = 3)]
    Existing,
    #[sea_orm(num_value = 4)]
    Failed,
    #[default]
    #[sea_orm(num_value = 5)]
    NotAvailable,
}

labelled_enum!(TaskOutcome {
    Succeeded => "Succeeded",
    Covered => "Covered",
    Sstate => "Sstate",
    Existing => "Existing",
    Failed => "Failed",
    NotAvailable => "Not Available",
});

/// Shared-state cache lookup result of a task.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum SstateResult {
    #[default]
    #[sea_orm(num_value = 0)]
    NotApplicable,
    /// No cached object was found.
    #[sea_orm(num_value = 1)]
    Missing,
    /// A cached object existed but restoring it failed.
    #[sea_orm(num_value = 2)]
    Failed,
    #[sea_orm(num_value = 3)]
    Restored,
}

labelled_enum!(SstateResult {
    NotApplicable => "Not Applicable",
    Missing => "Missing",
    Failed => "Failed",
    Restored => "Restored",
});

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum ScriptType {
    #[default]
    #[sea_orm(num_value = 0)]
    NotApplicable,
    #[sea_orm(num_value = 1)]
    NoExec,
    #[sea_orm(num_value = 2)]
    Python,
    #[sea_orm(num_value = 3)]
    Shell,
}

labelled_enum!(ScriptType {
    NotApplicable => "N/A",
    NoExec => "NoExec",
    Python => "Python",
    Shell => "Shell",
});

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "task")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub build: Uuid,
    /// Execution position within the build. `None` marks an unordered task.
    pub order: Option<i32>,
    /// `true` when the task ran, `false` when its output was prebuilt.
    pub task_executed: bool,
    pub outcome: TaskOutcome,
    pub sstate_checksum: String,
    pub path_to_sstate_obj: String,
    pub recipe: Uuid,
    pub task_name: String,
    pub source_url: String,
    pub work_directory: String,
    pub script_type: ScriptType,
    pub line_number: i32,
    pub disk_io: Option<i64>,
    /// Hundredths of a percent.
    pub cpu_usage: Option<i32>,
    /// Seconds.
    pub elapsed_time: Option<f64>,
    pub sstate_result: SstateResult,
    pub message: String,
    pub logfile: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::build::Entity",
        from = "Column::Build",
        to = "super::build::Column::Id"
    )]
    Build,
    #[sea_orm(
        belongs_to = "super::recipe::Entity",
        from = "Column::Recipe",
        to = "super::recipe::Column::Id"
    )]
    Recipe,
}

impl ActiveModelBehavior for ActiveModel {}
