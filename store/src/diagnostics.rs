/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Build-scoped diagnostic messages.

use entity::log_message::LogLevel;
use entity::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use tracing::debug;

use crate::build::{find_build, open_build};
use crate::error::StoreResult;
use crate::ids::{BuildId, LogMessageId};
use crate::types::*;
use crate::ProvenanceStore;

pub(crate) async fn count_level<C: ConnectionTrait>(
    db: &C,
    build: BuildId,
    level: LogLevel,
) -> StoreResult<u64> {
    Ok(ELogMessage::find()
        .filter(log_message::Column::Build.eq(build))
        .filter(log_message::Column::Level.eq(level))
        .count(db)
        .await?)
}

impl ProvenanceStore {
    /// Appends a message to a build.
    ///
    /// Errors and warnings bump the build's `errors_no` / `warnings_no` in the
    /// same transaction as the insert.
    pub async fn log_message(
        &self,
        build: BuildId,
        level: LogLevel,
        message: &str,
        pathname: &str,
        lineno: Option<i32>,
    ) -> StoreResult<LogMessageId> {
        let _guard = self.locks.acquire(build).await;
        let txn = self.db.begin().await?;
        let current = open_build(&txn, build).await?;

        let recorded = ELogMessage::find()
            .filter(log_message::Column::Build.eq(build))
            .count(&txn)
            .await?;

        let id = LogMessageId::generate();
        let amessage = ALogMessage {
            id: Set(id.as_uuid()),
            build: Set(build.as_uuid()),
            sequence: Set(recorded as i32 + 1),
            level: Set(level),
            message: Set(message.to_string()),
            pathname: Set(pathname.to_string()),
            lineno: Set(lineno),
        };

        amessage.insert(&txn).await?;

        match level {
            LogLevel::Error => {
                let errors = current.errors_no + 1;
                let mut abuild: ABuild = current.into();
                abuild.errors_no = Set(errors);
                abuild.update(&txn).await?;
            }
            LogLevel::Warning => {
                let warnings = current.warnings_no + 1;
                let mut abuild: ABuild = current.into();
                abuild.warnings_no = Set(warnings);
                abuild.update(&txn).await?;
            }
            LogLevel::Info => {}
        }

        txn.commit().await?;

        debug!(build_id = %build, level = %level, "Log message recorded");
        Ok(id)
    }

    /// Number of messages of `level` recorded for a build.
    pub async fn count_by_level(&self, build: BuildId, level: LogLevel) -> StoreResult<u64> {
        find_build(&*self.db, build).await?;
        count_level(&*self.db, build, level).await
    }

    /// Messages of a build in insertion order, optionally only one level.
    pub async fn list_log_messages(
        &self,
        build: BuildId,
        level: Option<LogLevel>,
    ) -> StoreResult<Vec<MLogMessage>> {
        find_build(&*self.db, build).await?;

        let mut query = ELogMessage::find().filter(log_message::Column::Build.eq(build));

        if let Some(level) = level {
            query = query.filter(log_message::Column::Level.eq(level));
        }

        Ok(query
            .order_by_asc(log_message::Column::Sequence)
            .all(&*self.db)
            .await?)
    }
}
