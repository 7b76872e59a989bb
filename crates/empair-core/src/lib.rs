//! Core domain logic for finding the longest-working employee pair.
//!
//! This crate contains the pipeline stages:
//! - Parsing: validating raw CSV rows into typed work intervals
//! - Merging: collapsing overlapping/adjacent intervals per employee and project
//! - Overlap: pairwise shared days per project, summed per pair
//! - Result: the winning pair and its per-project breakdown
//!
//! Every stage is a pure function of its input; nothing here performs I/O.

pub mod date;
mod merge;
mod overlap;
mod parse;
mod record;
mod result;

pub use date::{DateMatch, SUPPORTED_FORMATS, parse_date};
pub use merge::{MergedInterval, merge_intervals};
pub use overlap::{EmployeePair, PairOverlaps, PairProjectOverlap, aggregate_overlaps, overlap_days};
pub use parse::{ParsedRow, ParserConfig, RecordParser};
pub use record::{Field, ParseError, WorkInterval};
pub use result::{LongestPair, assemble};

/// Parse raw lines with the default configuration.
pub fn parse<I, S>(lines: I) -> Result<Vec<WorkInterval>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RecordParser::default().parse(lines)
}

/// Find the pair of employees with the most shared days across projects.
///
/// Never fails: if no two employees overlap, returns [`LongestPair::none`].
pub fn compute_longest_pair(intervals: &[WorkInterval]) -> LongestPair {
    let merged = merge_intervals(intervals);
    let overlaps = aggregate_overlaps(&merged);
    assemble(&overlaps)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_pipeline_finds_longest_pair() {
        let lines = [
            "EmpID, ProjectID, DateFrom, DateTo",
            "143, 12, 2013-11-01, 2014-01-05",
            "218, 10, 2012-05-16, 2014-01-01",
            "143, 10, 2009-01-01, 2011-04-27",
            "218, 12, 2013-12-01, 2014-02-01",
            "300, 10, 2011-01-01, 2011-01-31",
        ];
        let intervals = parse(lines).unwrap();
        let result = compute_longest_pair(&intervals);

        assert_eq!((result.employee_low, result.employee_high), (143, 218));
        assert_eq!(
            result.breakdown,
            vec![PairProjectOverlap {
                employee_low: 143,
                employee_high: 218,
                project_id: 12,
                days_overlap: 36,
            }]
        );
        assert_eq!(result.total_days(), 36);
    }

    #[test]
    fn test_adjacent_rows_merge_before_overlap() {
        // employee 1's two adjacent stints count as one, so no double counting
        let intervals = [
            WorkInterval {
                employee_id: 1,
                project_id: 5,
                date_from: date(2024, 1, 1),
                date_to: date(2024, 1, 10),
            },
            WorkInterval {
                employee_id: 1,
                project_id: 5,
                date_from: date(2024, 1, 5),
                date_to: date(2024, 1, 20),
            },
            WorkInterval {
                employee_id: 2,
                project_id: 5,
                date_from: date(2024, 1, 1),
                date_to: date(2024, 1, 31),
            },
        ];
        let result = compute_longest_pair(&intervals);
        assert_eq!(result.total_days(), 20);
        assert_eq!(result.breakdown.len(), 1);
    }

    #[test]
    fn test_no_records_yield_sentinel() {
        assert_eq!(compute_longest_pair(&[]), LongestPair::none());
    }

    #[test]
    fn test_winner_total_matches_breakdown_sum() {
        let lines = [
            "1,1,2020-01-01,2020-12-31",
            "2,1,2020-06-01,2021-06-30",
            "1,2,2021-01-01,2021-03-31",
            "2,2,2021-02-01,2021-02-28",
            "3,1,2020-01-01,2020-01-31",
        ];
        let intervals = parse(lines).unwrap();
        let merged = merge_intervals(&intervals);
        let overlaps = aggregate_overlaps(&merged);
        let result = assemble(&overlaps);

        let (pair, total) = overlaps.winner().unwrap();
        assert_eq!(pair, EmployeePair::new(1, 2).unwrap());
        assert_eq!(result.total_days(), total);
        assert_eq!(total, 214 + 28);
    }
}
