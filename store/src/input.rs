/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Validation of values handed over by the ingestion pipeline.

use entity::task::{SstateResult, TaskOutcome};
use sea_orm::ActiveEnum;

use crate::error::{StoreError, StoreResult};
use crate::types::TaskRecord;

pub fn greater_than_zero<
    T: std::str::FromStr + std::cmp::PartialOrd + std::fmt::Display + Default,
>(
    s: &str,
) -> Result<T, String> {
    let num: T = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number", s))?;

    if num > T::default() {
        Ok(num)
    } else {
        Err(format!("`{}` is not larger than 0", s))
    }
}

/// Maps a legacy integer encoding onto its enumerated column type.
///
/// ```
/// use entity::log_message::LogLevel;
/// use store::input::decode_enum;
///
/// assert_eq!(decode_enum::<LogLevel>("level", 2).unwrap(), LogLevel::Error);
/// assert!(decode_enum::<LogLevel>("level", 3).is_err());
/// ```
pub fn decode_enum<E>(field: &'static str, raw: i32) -> StoreResult<E>
where
    E: ActiveEnum<Value = i32>,
{
    E::try_from_value(&raw).map_err(|_| StoreError::InvalidEnumValue {
        field,
        value: raw.to_string(),
    })
}

/// Parses an enumerated column from its label, e.g. `"rdepends"`.
pub fn parse_enum<E>(field: &'static str, label: &str) -> StoreResult<E>
where
    E: std::str::FromStr,
{
    label.parse().map_err(|_| StoreError::InvalidEnumValue {
        field,
        value: label.to_string(),
    })
}

/// Checks that the execution flag, outcome and sstate result of a task
/// describe one coherent story:
///
/// - an executed task did not come from the sstate cache, so its
///   `sstate_result` is `NotApplicable`;
/// - `Sstate` and `Existing` outcomes mean the task was not executed;
/// - a `Restored` sstate result only goes with the `Sstate` outcome.
pub fn validate_task_state(record: &TaskRecord) -> StoreResult<()> {
    if record.task_executed && record.sstate_result != SstateResult::NotApplicable {
        return Err(StoreError::InvalidTaskState(
            "executed task must have sstate result NotApplicable",
        ));
    }

    if record.task_executed
        && matches!(record.outcome, TaskOutcome::Sstate | TaskOutcome::Existing)
    {
        return Err(StoreError::InvalidTaskState(
            "task restored from sstate or existing output cannot be executed",
        ));
    }

    if record.sstate_result == SstateResult::Restored && record.outcome != TaskOutcome::Sstate {
        return Err(StoreError::InvalidTaskState(
            "restored sstate result requires outcome Sstate",
        ));
    }

    if record.cpu_usage.is_some_and(|cpu| cpu < 0) {
        return Err(StoreError::InvalidTaskState("cpu usage cannot be negative"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::build_package_dependency::BuildPackageDependencyType;

    fn record(executed: bool, outcome: TaskOutcome, sstate: SstateResult) -> TaskRecord {
        TaskRecord {
            task_name: "do_compile".to_string(),
            task_executed: executed,
            outcome,
            sstate_result: sstate,
            ..Default::default()
        }
    }

    #[test]
    fn test_greater_than_zero() {
        assert_eq!(greater_than_zero::<u32>("4"), Ok(4));
        assert!(greater_than_zero::<u32>("0").is_err());
        assert!(greater_than_zero::<u64>("many").is_err());
    }

    #[test]
    fn test_decode_enum_rejects_out_of_domain() {
        let err = decode_enum::<TaskOutcome>("outcome", 9).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidEnumValue { field: "outcome", .. }
        ));
        assert_eq!(
            decode_enum::<SstateResult>("sstate_result", 1).unwrap(),
            SstateResult::Missing
        );
    }

    #[test]
    fn test_parse_enum_label() {
        assert_eq!(
            parse_enum::<BuildPackageDependencyType>("dep_type", "rprovides").unwrap(),
            BuildPackageDependencyType::RProvides
        );
        assert!(parse_enum::<BuildPackageDependencyType>("dep_type", "provides").is_err());
    }

    #[test]
    fn test_task_state_combinations() {
        assert!(validate_task_state(&record(true, TaskOutcome::Succeeded, SstateResult::NotApplicable)).is_ok());
        assert!(validate_task_state(&record(false, TaskOutcome::Sstate, SstateResult::Restored)).is_ok());
        assert!(validate_task_state(&record(false, TaskOutcome::Existing, SstateResult::NotApplicable)).is_ok());
        assert!(validate_task_state(&record(false, TaskOutcome::Covered, SstateResult::Missing)).is_ok());

        assert!(validate_task_state(&record(true, TaskOutcome::Succeeded, SstateResult::Missing)).is_err());
        assert!(validate_task_state(&record(true, TaskOutcome::Sstate, SstateResult::NotApplicable)).is_err());
        assert!(validate_task_state(&record(false, TaskOutcome::Succeeded, SstateResult::Restored)).is_err());
    }
}
