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
pub enum LogLevel {
    #[sea_orm(num_value = 0)]
    Info,
    #[sea_orm(num_value = 1)]
    Warning,
    #[sea_orm(num_value = 2)]
    Error,
}

labelled_enum!(LogLevel {
    Info => "info",
    Warning => "warn",
    Error => "error",
});

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "log_message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub build: Uuid,
    /// Insertion position within the build, starting at 1.
    pub sequence: i32,
    pub level: LogLevel,
    pub message: String,
    pub pathname: String,
    pub lineno: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::build::Entity",
        from = "Column::Build",
        to = "super::build::Column::Id"
    )]
    Build,
}

impl ActiveModelBehavior for ActiveModel {}
