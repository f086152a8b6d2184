/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Per-build configuration variables and the provenance of their values.

use entity::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::debug;

use crate::build::{find_build, open_build};
use crate::error::{is_unique_violation, StoreError, StoreResult};
use crate::ids::{BuildId, VariableHistoryId, VariableId};
use crate::types::*;
use crate::ProvenanceStore;

impl ProvenanceStore {
    /// Records the final value of a variable for a build. Each variable is
    /// written once per build.
    pub async fn set_variable(
        &self,
        build: BuildId,
        name: &str,
        value: &str,
        changed: bool,
        metadata: VariableMetadata,
    ) -> StoreResult<VariableId> {
        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        open_build(&txn, build).await?;

        let duplicate = StoreError::DuplicateVariable {
            build,
            name: name.to_string(),
        };

        let existing = EVariable::find()
            .filter(variable::Column::Build.eq(build))
            .filter(variable::Column::VariableName.eq(name))
            .one(&txn)
            .await?;

        if existing.is_some() {
            return Err(duplicate);
        }

        let id = VariableId::generate();
        let avariable = AVariable {
            id: Set(id.as_uuid()),
            build: Set(build.as_uuid()),
            variable_name: Set(name.to_string()),
            variable_value: Set(value.to_string()),
            changed: Set(changed),
            human_readable_name: Set(metadata.human_readable_name),
            description: Set(metadata.description),
        };

        avariable.insert(&txn).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate
            } else {
                e.into()
            }
        })?;

        txn.commit().await?;

        debug!(build_id = %build, variable = name, changed, "Variable recorded");
        Ok(id)
    }

    /// Appends one assignment record to the provenance of a variable. Records
    /// are numbered in call order.
    pub async fn append_variable_history(
        &self,
        variable: VariableId,
        file_name: &str,
        line_number: Option<i32>,
        operation: &str,
    ) -> StoreResult<VariableHistoryId> {
        let build = BuildId::from_uuid(self.get_variable(variable).await?.build);

        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        open_build(&txn, build).await?;

        if EVariable::find_by_id(variable.as_uuid()).one(&txn).await?.is_none() {
            return Err(StoreError::not_found("variable", variable));
        }

        let recorded = EVariableHistory::find()
            .filter(variable_history::Column::Variable.eq(variable))
            .count(&txn)
            .await?;

        let id = VariableHistoryId::generate();
        let ahistory = AVariableHistory {
            id: Set(id.as_uuid()),
            variable: Set(variable.as_uuid()),
            sequence: Set(recorded as i32 + 1),
            file_name: Set(file_name.to_string()),
            line_number: Set(line_number),
            operation: Set(operation.to_string()),
        };

        ahistory.insert(&txn).await?;
        txn.commit().await?;

        debug!(build_id = %build, %variable, file_name, operation, "Variable history appended");
        Ok(id)
    }

    pub async fn get_variable(&self, variable: VariableId) -> StoreResult<MVariable> {
        EVariable::find_by_id(variable.as_uuid())
            .one(&*self.db)
            .await?
            .ok_or_else(|| StoreError::not_found("variable", variable))
    }

    /// Looks a variable up by name. An unknown name is `None`, an unknown
    /// build is an error.
    pub async fn find_variable(&self, build: BuildId, name: &str) -> StoreResult<Option<MVariable>> {
        find_build(&*self.db, build).await?;

        Ok(EVariable::find()
            .filter(variable::Column::Build.eq(build))
            .filter(variable::Column::VariableName.eq(name))
            .one(&*self.db)
            .await?)
    }

    pub async fn list_variables(&self, build: BuildId) -> StoreResult<Vec<MVariable>> {
        find_build(&*self.db, build).await?;

        Ok(EVariable::find()
            .filter(variable::Column::Build.eq(build))
            .order_by_asc(variable::Column::VariableName)
            .all(&*self.db)
            .await?)
    }

    /// Assignment records of a variable in the order they were appended.
    pub async fn variable_history(&self, variable: VariableId) -> StoreResult<Vec<MVariableHistory>> {
        self.get_variable(variable).await?;

        Ok(EVariableHistory::find()
            .filter(variable_history::Column::Variable.eq(variable))
            .order_by_asc(variable_history::Column::Sequence)
            .all(&*self.db)
            .await?)
    }
}
