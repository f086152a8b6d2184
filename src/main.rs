/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use entity::build_package_dependency::BuildPackageDependencyType;
use entity::log_message::LogLevel;
use entity::recipe_dependency::RecipeDependencyType;
use entity::target_package_dependency::TargetPackageDependencyType;
use futures::{TryStreamExt, pin_mut};
use serde::Serialize;
use store::graph::Direction;
use store::input::parse_enum;
use store::package::PackageRef;
use store::types::StoreConfig;
use store::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Query and maintain a build provenance database.
#[derive(Parser, Debug)]
#[command(name = "provenance", author = "Wavelens", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: StoreConfig,
    #[command(subcommand)]
    cmd: MainCommands,
}

#[derive(Subcommand, Debug)]
enum MainCommands {
    /// Apply pending schema migrations and exit
    Migrate,
    /// List builds, newest first
    Builds,
    /// Show a build with its targets and task outcomes
    Show { build: BuildId },
    /// List the tasks of a build in execution order
    Tasks { build: BuildId },
    /// Task outcome and shared-state cache statistics
    Summary { build: BuildId },
    /// List diagnostics of a build
    Log {
        build: BuildId,
        #[arg(short, long)]
        level: Option<String>,
    },
    /// List variables of a build, or the assignment history of one
    Variables {
        build: BuildId,
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Variables and package versions that changed between two builds
    Diff { before: BuildId, after: BuildId },
    /// Transitive dependencies of a task, recipe or package
    Closure {
        #[command(subcommand)]
        cmd: ClosureCommands,
        /// Walk towards dependents instead of dependencies
        #[arg(short, long, global = true)]
        reverse: bool,
    },
    /// List the files of a package ordered by path
    Files {
        #[command(subcommand)]
        cmd: FilesCommands,
    },
    /// Check the stored invariants of a build
    Verify { build: BuildId },
    /// Delete a build and everything it owns
    Delete { build: BuildId },
}

#[derive(Subcommand, Debug)]
enum ClosureCommands {
    Task {
        task: TaskId,
    },
    Recipe {
        recipe: RecipeId,
        #[arg(short = 't', long)]
        dep_type: Option<String>,
    },
    TargetPackage {
        package: TargetPackageId,
        #[arg(short = 't', long)]
        dep_type: Option<String>,
    },
    BuildPackage {
        package: BuildPackageId,
        #[arg(short = 't', long)]
        dep_type: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum FilesCommands {
    BuildPackage { package: BuildPackageId },
    TargetPackage { package: TargetPackageId },
}

#[derive(Serialize)]
struct BuildOverview {
    build: types::MBuild,
    targets: Vec<types::MTarget>,
    tasks: query::TaskOutcomeSummary,
}

#[derive(Serialize)]
struct Summary {
    tasks: query::TaskOutcomeSummary,
    sstate: query::SstateSummary,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = ProvenanceStore::connect(&cli.config)
        .await
        .context("Failed to open provenance store")?;

    match cli.cmd {
        MainCommands::Migrate => {
            info!("Schema is up to date");
        }
        MainCommands::Builds => print_json(&store.list_builds().await?)?,
        MainCommands::Show { build } => print_json(&BuildOverview {
            build: store.get_build(build).await?,
            targets: store.list_targets(build).await?,
            tasks: store.task_outcome_summary(build).await?,
        })?,
        MainCommands::Tasks { build } => print_json(&store.list_tasks(build).await?)?,
        MainCommands::Summary { build } => print_json(&Summary {
            tasks: store.task_outcome_summary(build).await?,
            sstate: store.sstate_summary(build).await?,
        })?,
        MainCommands::Log { build, level } => {
            let level = level
                .map(|l| parse_enum::<LogLevel>("level", &l))
                .transpose()?;
            print_json(&store.list_log_messages(build, level).await?)?
        }
        MainCommands::Variables { build, name } => match name {
            Some(name) => {
                let variable = store
                    .find_variable(build, &name)
                    .await?
                    .with_context(|| format!("Variable {} not recorded for build {}", name, build))?;
                print_json(&store.variable_history(VariableId::from_uuid(variable.id)).await?)?
            }
            None => print_json(&store.list_variables(build).await?)?,
        },
        MainCommands::Diff { before, after } => {
            print_json(&store.compare_builds(before, after).await?)?
        }
        MainCommands::Closure { cmd, reverse } => {
            let direction = if reverse {
                Direction::Dependents
            } else {
                Direction::Dependencies
            };

            match cmd {
                ClosureCommands::Task { task } => {
                    print_json(&store.task_closure(task, direction).await?)?
                }
                ClosureCommands::Recipe { recipe, dep_type } => {
                    let dep_type = dep_type
                        .map(|t| parse_enum::<RecipeDependencyType>("dep_type", &t))
                        .transpose()?;
                    print_json(&store.recipe_closure(recipe, direction, dep_type).await?)?
                }
                ClosureCommands::TargetPackage { package, dep_type } => {
                    let dep_type = dep_type
                        .map(|t| parse_enum::<TargetPackageDependencyType>("dep_type", &t))
                        .transpose()?;
                    print_json(
                        &store
                            .target_package_closure(package, direction, dep_type)
                            .await?,
                    )?
                }
                ClosureCommands::BuildPackage { package, dep_type } => {
                    let dep_types = dep_type
                        .iter()
                        .map(|t| parse_enum::<BuildPackageDependencyType>("dep_type", t))
                        .collect::<StoreResult<Vec<_>>>()?;
                    print_json(
                        &store
                            .build_package_closure(package, direction, &dep_types)
                            .await?,
                    )?
                }
            }
        }
        MainCommands::Files { cmd } => {
            let package = match cmd {
                FilesCommands::BuildPackage { package } => PackageRef::Build(package),
                FilesCommands::TargetPackage { package } => PackageRef::Target(package),
            };

            let listing = store.list_files(package).await?;
            let files = listing.stream();
            pin_mut!(files);

            while let Some(file) = files.try_next().await? {
                println!("{}\t{}", file.size, file.path);
            }
        }
        MainCommands::Verify { build } => {
            let report = store.verify_integrity(build).await?;
            print_json(&report)?;

            if !report.is_ok() {
                anyhow::bail!(
                    "Build {} violates {} invariant(s)",
                    build,
                    report.violations.len()
                );
            }
        }
        MainCommands::Delete { build } => {
            let deleted = store.delete_build(build).await?;
            print_json(&deleted)?;
        }
    }

    Ok(())
}
