//! Collapsing of overlapping and adjacent intervals.
//!
//! Intervals are grouped by `(employee_id, project_id)`. Within a group,
//! intervals that overlap or touch (the next one starts on or before the day
//! after the current one ends) become a single covering interval.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::WorkInterval;

/// An interval that is disjoint from, and not adjacent to, every other merged
/// interval with the same employee and project.
///
/// Only [`merge_intervals`] creates these, so downstream stages can rely on
/// the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MergedInterval(WorkInterval);

impl MergedInterval {
    pub const fn employee_id(&self) -> i64 {
        self.0.employee_id
    }

    pub const fn project_id(&self) -> i64 {
        self.0.project_id
    }

    pub const fn date_from(&self) -> NaiveDate {
        self.0.date_from
    }

    pub const fn date_to(&self) -> NaiveDate {
        self.0.date_to
    }

    pub const fn as_interval(&self) -> &WorkInterval {
        &self.0
    }
}

impl From<MergedInterval> for WorkInterval {
    fn from(merged: MergedInterval) -> Self {
        merged.0
    }
}

/// Merge intervals per employee/project.
///
/// Output is ordered by `(employee_id, project_id, date_from)`.
pub fn merge_intervals(intervals: &[WorkInterval]) -> Vec<MergedInterval> {
    let mut groups: BTreeMap<(i64, i64), Vec<WorkInterval>> = BTreeMap::new();
    for interval in intervals {
        groups
            .entry((interval.employee_id, interval.project_id))
            .or_default()
            .push(*interval);
    }

    groups
        .into_values()
        .flat_map(merge_group)
        .map(MergedInterval)
        .collect()
}

/// Greedy merge of one employee/project group.
fn merge_group(mut group: Vec<WorkInterval>) -> Vec<WorkInterval> {
    group.sort_by_key(|interval| (interval.date_from, interval.date_to));

    group.into_iter().fold(Vec::new(), |mut merged, next| {
        match merged.last().copied() {
            Some(current) if touches(&current, &next) => {
                let widened = WorkInterval {
                    date_to: current.date_to.max(next.date_to),
                    ..current
                };
                let last = merged.len() - 1;
                merged[last] = widened;
            }
            _ => merged.push(next),
        }
        merged
    })
}

/// `next` starts no later than the day after `current` ends.
fn touches(current: &WorkInterval, next: &WorkInterval) -> bool {
    current
        .date_to
        .succ_opt()
        .is_none_or(|day_after| next.date_from <= day_after)
}
