//! Pairwise overlap between employees on shared projects.
//!
//! # Algorithm
//!
//! 1. Group merged intervals by project.
//! 2. Sort each project's intervals by start date.
//! 3. For every `i < j`, stop scanning `j` once `j` starts after `i` ends
//!    (nothing later can overlap `i`); otherwise record the inclusive
//!    overlap.
//! 4. Sum overlaps per normalized pair across projects.
//!
//! The winner is the pair with the greatest total. Ties go to the lowest
//! `(low, high)` pair so results do not depend on iteration order.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::merge::MergedInterval;

/// Two distinct employees, smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EmployeePair {
    low: i64,
    high: i64,
}

impl EmployeePair {
    /// Build a normalized pair. Returns `None` if both ids are the same.
    pub fn new(a: i64, b: i64) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub const fn low(&self) -> i64 {
        self.low
    }

    pub const fn high(&self) -> i64 {
        self.high
    }
}

impl fmt::Display for EmployeePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.low, self.high)
    }
}

/// Days two employees overlapped on one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairProjectOverlap {
    pub employee_low: i64,
    pub employee_high: i64,
    pub project_id: i64,
    /// Inclusive day count, always at least 1.
    pub days_overlap: i64,
}

impl PairProjectOverlap {
    pub fn pair(&self) -> EmployeePair {
        EmployeePair {
            low: self.employee_low,
            high: self.employee_high,
        }
    }
}

/// Every overlap found, plus per-pair totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairOverlaps {
    /// One row per (pair, merged-interval match) in discovery order.
    pub rows: Vec<PairProjectOverlap>,
    /// Summed days per pair, ordered by pair.
    pub totals: BTreeMap<EmployeePair, i64>,
}

impl PairOverlaps {
    /// Pair with the greatest total; ties go to the lowest pair.
    pub fn winner(&self) -> Option<(EmployeePair, i64)> {
        self.totals
            .iter()
            .fold(None, |best: Option<(EmployeePair, i64)>, (&pair, &total)| {
                match best {
                    Some((_, best_total)) if best_total >= total => best,
                    _ => Some((pair, total)),
                }
            })
    }

    /// Rows belonging to `pair`.
    pub fn rows_for(&self, pair: EmployeePair) -> impl Iterator<Item = &PairProjectOverlap> {
        self.rows.iter().filter(move |row| row.pair() == pair)
    }
}

/// Compute overlaps for every pair of employees sharing a project.
pub fn aggregate_overlaps(merged: &[MergedInterval]) -> PairOverlaps {
    let mut by_project: BTreeMap<i64, Vec<MergedInterval>> = BTreeMap::new();
    for interval in merged {
        by_project
            .entry(interval.project_id())
            .or_default()
            .push(*interval);
    }

    let mut overlaps = PairOverlaps::default();
    for (project_id, mut intervals) in by_project {
        intervals.sort_by_key(|i| (i.date_from(), i.employee_id(), i.date_to()));
        scan_project(project_id, &intervals, &mut overlaps);
    }
    overlaps
}

/// Intervals must be sorted by `date_from`.
fn scan_project(project_id: i64, intervals: &[MergedInterval], overlaps: &mut PairOverlaps) {
    for (i, a) in intervals.iter().enumerate() {
        for b in &intervals[i + 1..] {
            if b.date_from() > a.date_to() {
                break;
            }

            let Some(days) = overlap_days(a, b) else {
                continue;
            };
            // Merged intervals of one employee never overlap each other.
            let Some(pair) = EmployeePair::new(a.employee_id(), b.employee_id()) else {
                continue;
            };

            overlaps.rows.push(PairProjectOverlap {
                employee_low: pair.low,
                employee_high: pair.high,
                project_id,
                days_overlap: days,
            });
            *overlaps.totals.entry(pair).or_insert(0) += days;
        }
    }
}

/// Inclusive day count of the intersection, or `None` if disjoint.
pub fn overlap_days(a: &MergedInterval, b: &MergedInterval) -> Option<i64> {
    let start = a.date_from().max(b.date_from());
    let end = a.date_to().min(b.date_to());
    if end < start {
        return None;
    }
    Some((end - start).num_days() + 1)
}
