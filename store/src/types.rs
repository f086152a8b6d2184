/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::consts::{DEFAULT_MAX_CONNECTIONS, DEFAULT_PAGE_SIZE};
use super::input::greater_than_zero;
use clap::Args;
use entity::task::{ScriptType, SstateResult, TaskOutcome};
use entity::*;
use serde::{Deserialize, Serialize};

#[derive(Args, Debug, Clone)]
pub struct StoreConfig {
    #[arg(long, env = "PROVENANCE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "PROVENANCE_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "PROVENANCE_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "PROVENANCE_MAX_CONNECTIONS", value_parser = greater_than_zero::<u32>, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
    #[arg(long, env = "PROVENANCE_PAGE_SIZE", value_parser = greater_than_zero::<u64>, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u64,
}

/// Descriptive attributes of a build, supplied when it starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBuild {
    pub machine: String,
    #[serde(default)]
    pub image_fstypes: String,
    #[serde(default)]
    pub distro: String,
    #[serde(default)]
    pub distro_version: String,
    #[serde(default)]
    pub cooker_log_path: String,
    #[serde(default)]
    pub build_name: String,
    #[serde(default)]
    pub bitbake_version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTarget {
    pub target: String,
    #[serde(default)]
    pub is_image: bool,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: i64,
}

/// Everything recorded about one task run besides its build, recipe and order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRecord {
    pub task_name: String,
    pub task_executed: bool,
    pub outcome: TaskOutcome,
    pub sstate_checksum: String,
    pub path_to_sstate_obj: String,
    pub sstate_result: SstateResult,
    pub script_type: ScriptType,
    pub source_url: String,
    pub work_directory: String,
    pub line_number: i32,
    pub disk_io: Option<i64>,
    /// Hundredths of a percent.
    pub cpu_usage: Option<i32>,
    /// Seconds.
    pub elapsed_time: Option<f64>,
    pub message: String,
    pub logfile: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLayer {
    pub name: String,
    #[serde(default)]
    pub local_path: String,
    #[serde(default)]
    pub layer_index_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLayerVersion {
    pub branch: String,
    pub commit: String,
    #[serde(default)]
    pub priority: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewRecipe {
    pub name: String,
    pub version: String,
    pub summary: String,
    pub description: String,
    pub section: String,
    pub license: String,
    pub licensing_info: String,
    pub homepage: String,
    pub bugtracker: String,
    pub file_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBuildPackage {
    pub name: String,
    pub version: String,
    pub revision: String,
    pub summary: String,
    pub description: String,
    pub size: i64,
    pub section: String,
    pub license: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTargetPackage {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub size: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableMetadata {
    pub human_readable_name: String,
    pub description: String,
}

pub type EBuild = build::Entity;
pub type EBuildFile = build_file::Entity;
pub type EBuildPackage = build_package::Entity;
pub type EBuildPackageDependency = build_package_dependency::Entity;
pub type ELayer = layer::Entity;
pub type ELayerVersion = layer_version::Entity;
pub type ELogMessage = log_message::Entity;
pub type ERecipe = recipe::Entity;
pub type ERecipeDependency = recipe_dependency::Entity;
pub type ETarget = target::Entity;
pub type ETargetFile = target_file::Entity;
pub type ETargetPackage = target_package::Entity;
pub type ETargetPackageDependency = target_package_dependency::Entity;
pub type ETask = task::Entity;
pub type ETaskDependency = task_dependency::Entity;
pub type EVariable = variable::Entity;
pub type EVariableHistory = variable_history::Entity;

pub type MBuild = build::Model;
pub type MBuildFile = build_file::Model;
pub type MBuildPackage = build_package::Model;
pub type MBuildPackageDependency = build_package_dependency::Model;
pub type MLayer = layer::Model;
pub type MLayerVersion = layer_version::Model;
pub type MLogMessage = log_message::Model;
pub type MRecipe = recipe::Model;
pub type MRecipeDependency = recipe_dependency::Model;
pub type MTarget = target::Model;
pub type MTargetFile = target_file::Model;
pub type MTargetPackage = target_package::Model;
pub type MTargetPackageDependency = target_package_dependency::Model;
pub type MTask = task::Model;
pub type MTaskDependency = task_dependency::Model;
pub type MVariable = variable::Model;
pub type MVariableHistory = variable_history::Model;

pub type ABuild = build::ActiveModel;
pub type ABuildFile = build_file::ActiveModel;
pub type ABuildPackage = build_package::ActiveModel;
pub type ABuildPackageDependency = build_package_dependency::ActiveModel;
pub type ALayer = layer::ActiveModel;
pub type ALayerVersion = layer_version::ActiveModel;
pub type ALogMessage = log_message::ActiveModel;
pub type ARecipe = recipe::ActiveModel;
pub type ARecipeDependency = recipe_dependency::ActiveModel;
pub type ATarget = target::ActiveModel;
pub type ATargetFile = target_file::ActiveModel;
pub type ATargetPackage = target_package::ActiveModel;
pub type ATargetPackageDependency = target_package_dependency::ActiveModel;
pub type ATask = task::ActiveModel;
pub type ATaskDependency = task_dependency::ActiveModel;
pub type AVariable = variable::ActiveModel;
pub type AVariableHistory = variable_history::ActiveModel;
