/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;
use tracing::log::LevelFilter;

use super::consts::{ACQUIRE_TIMEOUT, CONNECT_TIMEOUT};
use super::types::StoreConfig;

pub fn database_url(config: &StoreConfig) -> Result<String> {
    if let Some(file) = &config.database_url_file {
        Ok(std::fs::read_to_string(file)
            .context("Failed to read database url from file")?
            .trim()
            .to_string())
    } else if let Some(url) = &config.database_url {
        Ok(url.clone())
    } else {
        anyhow::bail!("No database url provided")
    }
}

pub async fn connect_db(config: &StoreConfig) -> Result<DatabaseConnection> {
    let db_url = database_url(config)?;

    let mut opt = ConnectOptions::new(db_url);

    // Only enable SQL logging at debug level
    if config.log_level == "debug" {
        opt.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    } else {
        opt.sqlx_logging(false);
    }

    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(CONNECT_TIMEOUT)
        .acquire_timeout(ACQUIRE_TIMEOUT);

    let db = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;

    info!(backend = ?db.get_database_backend(), "Database ready");
    Ok(db)
}
