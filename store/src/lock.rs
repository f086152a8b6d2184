/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Per-build write serialization.
//!
//! Writers scoped to the same build queue on one async mutex so that a
//! finalize can never interleave with a task, log or variable write of that
//! build. Builds never share a mutex.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::ids::BuildId;

#[derive(Debug, Default)]
pub struct BuildLocks {
    locks: Mutex<HashMap<BuildId, Arc<AsyncMutex<()>>>>,
}

impl BuildLocks {
    pub async fn acquire(&self, build: BuildId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(build).or_default())
        };

        lock.lock_owned().await
    }

    /// Drops the mutex of a build that accepts no more writes. Writers still
    /// holding the old mutex observe the terminal state in the database.
    pub fn release(&self, build: BuildId) {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&build);
    }

    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
