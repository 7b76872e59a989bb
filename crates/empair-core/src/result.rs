//! Final answer packaging.

use serde::Serialize;

use crate::overlap::{PairOverlaps, PairProjectOverlap};

/// The pair that worked together longest and where they did it.
///
/// `employee_low == employee_high == 0` with an empty breakdown means no two
/// employees ever overlapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LongestPair {
    pub employee_low: i64,
    pub employee_high: i64,
    /// Sorted by project id.
    pub breakdown: Vec<PairProjectOverlap>,
}

impl LongestPair {
    /// The "no overlapping pair" value.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.breakdown.is_empty()
    }

    /// Sum of the breakdown's day counts.
    pub fn total_days(&self) -> i64 {
        self.breakdown.iter().map(|row| row.days_overlap).sum()
    }
}

/// Pick the winning pair out of `overlaps` and collect its project rows.
pub fn assemble(overlaps: &PairOverlaps) -> LongestPair {
    let Some((pair, _)) = overlaps.winner() else {
        return LongestPair::none();
    };

    let mut breakdown: Vec<PairProjectOverlap> = overlaps.rows_for(pair).copied().collect();
    breakdown.sort_by_key(|row| row.project_id);

    LongestPair {
        employee_low: pair.low(),
        employee_high: pair.high(),
        breakdown,
    }
}
