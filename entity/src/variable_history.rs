/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "variable_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub variable: Uuid,
    /// Insertion position within the variable, starting at 1.
    pub sequence: i32,
    pub file_name: String,
    pub line_number: Option<i32>,
    pub operation: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::variable::Entity",
        from = "Column::Variable",
        to = "super::variable::Column::Id"
    )]
    Variable,
}

impl ActiveModelBehavior for ActiveModel {}
