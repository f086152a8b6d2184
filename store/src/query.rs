/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Aggregate read queries.

use entity::task::{SstateResult, TaskOutcome};
use entity::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::build::find_build;
use crate::error::StoreResult;
use crate::ids::BuildId;
use crate::types::*;
use crate::ProvenanceStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskOutcomeSummary {
    pub total: u64,
    pub executed: u64,
    pub unordered: u64,
    pub outcomes: BTreeMap<TaskOutcome, u64>,
}

impl TaskOutcomeSummary {
    pub fn count(&self, outcome: TaskOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SstateSummary {
    pub results: BTreeMap<SstateResult, u64>,
    /// `restored / (restored + missing + failed)`, `None` without any lookup.
    pub hit_ratio: Option<f64>,
}

impl SstateSummary {
    pub fn count(&self, result: SstateResult) -> u64 {
        self.results.get(&result).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ChangeKind {
    Added,
    Removed,
    Changed,
}

/// A named value that differs between two builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub name: String,
    pub kind: ChangeKind,
    pub before: Option<String>,
    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildComparison {
    pub variables: Vec<Change>,
    pub packages: Vec<Change>,
}

impl BuildComparison {
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.packages.is_empty()
    }
}

fn diff(before: BTreeMap<String, String>, mut after: BTreeMap<String, String>) -> Vec<Change> {
    let mut changes = Vec::new();

    for (name, old) in before {
        match after.remove(&name) {
            Some(new) if new == old => {}
            Some(new) => changes.push(Change {
                name,
                kind: ChangeKind::Changed,
                before: Some(old),
                after: Some(new),
            }),
            None => changes.push(Change {
                name,
                kind: ChangeKind::Removed,
                before: Some(old),
                after: None,
            }),
        }
    }

    changes.extend(after.into_iter().map(|(name, new)| Change {
        name,
        kind: ChangeKind::Added,
        before: None,
        after: Some(new),
    }));

    changes.sort_by(|a, b| a.name.cmp(&b.name));
    changes
}

fn package_version(package: &MBuildPackage) -> String {
    if package.revision.is_empty() {
        package.version.clone()
    } else {
        format!("{}-{}", package.version, package.revision)
    }
}

impl ProvenanceStore {
    pub async fn task_outcome_summary(&self, build: BuildId) -> StoreResult<TaskOutcomeSummary> {
        find_build(&*self.db, build).await?;

        let tasks = ETask::find()
            .filter(task::Column::Build.eq(build))
            .all(&*self.db)
            .await?;

        let mut summary = TaskOutcomeSummary::default();
        for task in tasks {
            summary.total += 1;
            summary.executed += u64::from(task.task_executed);
            summary.unordered += u64::from(task.order.is_none());
            *summary.outcomes.entry(task.outcome).or_default() += 1;
        }

        Ok(summary)
    }

    pub async fn sstate_summary(&self, build: BuildId) -> StoreResult<SstateSummary> {
        find_build(&*self.db, build).await?;

        let tasks = ETask::find()
            .filter(task::Column::Build.eq(build))
            .all(&*self.db)
            .await?;

        let mut summary = SstateSummary::default();
        for task in tasks {
            *summary.results.entry(task.sstate_result).or_default() += 1;
        }

        let hits = summary.count(SstateResult::Restored);
        let lookups =
            hits + summary.count(SstateResult::Missing) + summary.count(SstateResult::Failed);

        if lookups > 0 {
            summary.hit_ratio = Some(hits as f64 / lookups as f64);
        }

        Ok(summary)
    }

    /// Variables and build package versions that differ from `before` to
    /// `after`, each sorted by name.
    pub async fn compare_builds(&self, before: BuildId, after: BuildId) -> StoreResult<BuildComparison> {
        let variables = |vars: Vec<MVariable>| {
            vars.into_iter()
                .map(|v| (v.variable_name, v.variable_value))
                .collect::<BTreeMap<_, _>>()
        };

        let packages = |pkgs: Vec<MBuildPackage>| {
            pkgs.iter()
                .map(|p| (p.name.clone(), package_version(p)))
                .collect::<BTreeMap<_, _>>()
        };

        Ok(BuildComparison {
            variables: diff(
                variables(self.list_variables(before).await?),
                variables(self.list_variables(after).await?),
            ),
            packages: diff(
                packages(self.list_build_packages(before).await?),
                packages(self.list_build_packages(after).await?),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_diff_reports_each_kind_once() {
        let before = map(&[("DISTRO", "poky"), ("MACHINE", "qemux86"), ("TCLIBC", "glibc")]);
        let after = map(&[("DISTRO", "poky"), ("MACHINE", "qemuarm"), ("INIT_MANAGER", "systemd")]);

        let changes = diff(before, after);

        assert_eq!(
            changes
                .iter()
                .map(|c| (c.name.as_str(), c.kind))
                .collect::<Vec<_>>(),
            vec![
                ("INIT_MANAGER", ChangeKind::Added),
                ("MACHINE", ChangeKind::Changed),
                ("TCLIBC", ChangeKind::Removed),
            ]
        );
        assert_eq!(changes[1].before.as_deref(), Some("qemux86"));
        assert_eq!(changes[1].after.as_deref(), Some("qemuarm"));
    }

    #[test]
    fn test_identical_maps_have_no_changes() {
        let vars = map(&[("MACHINE", "qemux86")]);
        assert!(diff(vars.clone(), vars).is_empty());
    }
}
