/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use entity::build::BuildOutcome;
use entity::log_message::LogLevel;
use sea_orm::{DbErr, SqlErr};
use uuid::Uuid;

use crate::ids::BuildId;

/// Failures surfaced by the provenance store.
///
/// Integrity violations are always returned to the caller; a rejected write
/// leaves no rows behind.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("invalid reference: {entity} {id} {reason}")]
    InvalidReference {
        entity: &'static str,
        id: Uuid,
        reason: &'static str,
    },

    #[error("task order {order} is already used in build {build}")]
    DuplicateOrder { build: BuildId, order: i32 },

    #[error("{entity} edge {from} -> {to} already exists")]
    DuplicateEdge {
        entity: &'static str,
        from: Uuid,
        to: Uuid,
    },

    #[error("variable '{name}' is already recorded for build {build}")]
    DuplicateVariable { build: BuildId, name: String },

    #[error("{entity} {id} cannot depend on itself")]
    SelfDependency { entity: &'static str, id: Uuid },

    #[error("build {build} cannot move from {from} to {to}")]
    InvalidStateTransition {
        build: BuildId,
        from: BuildOutcome,
        to: BuildOutcome,
    },

    #[error("build {build} is finalized ({outcome}) and accepts no further writes")]
    BuildFinalized {
        build: BuildId,
        outcome: BuildOutcome,
    },

    #[error("value '{value}' is outside the domain of {field}")]
    InvalidEnumValue { field: &'static str, value: String },

    #[error("build {build} declares {declared} {level} messages but {recorded} are recorded")]
    CounterMismatch {
        build: BuildId,
        level: LogLevel,
        declared: i32,
        recorded: u64,
    },

    #[error("inconsistent task state: {0}")]
    InvalidTaskState(&'static str),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<Uuid>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_reference(entity: &'static str, id: impl Into<Uuid>, reason: &'static str) -> Self {
        StoreError::InvalidReference {
            entity,
            id: id.into(),
            reason,
        }
    }

    /// `true` for both rejected finalize calls and writes on a finalized build.
    pub fn is_state_violation(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidStateTransition { .. } | StoreError::BuildFinalized { .. }
        )
    }
}

/// Whether a database error is a unique index violation.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
