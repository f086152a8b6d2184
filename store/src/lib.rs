/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Build provenance store.
//!
//! Records which recipes and tasks a build ran, the packages and files it
//! produced, the dependency edges between them, the configuration variables
//! in effect and the diagnostics emitted, and answers integrity-preserving
//! queries over that graph.
//!
//! All writes go through [`ProvenanceStore`], which validates references and
//! uniqueness itself inside one transaction per call and serializes writes
//! per build against that build's finalize.

pub mod build;
pub mod catalog;
pub mod consts;
pub mod database;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod ids;
pub mod input;
pub mod integrity;
pub mod lock;
pub mod package;
pub mod query;
pub mod task;
pub mod types;
pub mod variable;

pub use error::{StoreError, StoreResult};
pub use ids::*;

use anyhow::Result;
use database::connect_db;
use lock::BuildLocks;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use types::StoreConfig;

#[derive(Debug, Clone)]
pub struct ProvenanceStore {
    db: Arc<DatabaseConnection>,
    locks: Arc<BuildLocks>,
    catalog: Arc<Mutex<()>>,
    page_size: u64,
}

impl ProvenanceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        ProvenanceStore {
            db: Arc::new(db),
            locks: Arc::new(BuildLocks::default()),
            catalog: Arc::new(Mutex::new(())),
            page_size: consts::DEFAULT_PAGE_SIZE,
        }
    }

    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let db = connect_db(config).await?;
        Ok(Self::new(db).with_page_size(config.page_size))
    }

    /// Number of rows fetched per round trip by lazy listings.
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}
