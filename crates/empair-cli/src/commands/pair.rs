//! Pair command: the longest-working pair and its project breakdown.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use empair_core::{LongestPair, PairProjectOverlap, WorkInterval, compute_longest_pair};
use serde::Serialize;

use super::input::load_rows;
use crate::Config;

/// Formats the human-readable result.
pub fn format_result(result: &LongestPair) -> String {
    let mut output = String::new();

    if result.is_none() {
        writeln!(output, "No pair of employees worked together on a common project.").unwrap();
        return output;
    }

    writeln!(
        output,
        "Longest working pair: {}, {} ({} days)",
        result.employee_low,
        result.employee_high,
        result.total_days()
    )
    .unwrap();
    writeln!(output).unwrap();
    writeln!(
        output,
        "{:<12}{:<12}{:<11}{}",
        "Employee #1", "Employee #2", "Project ID", "Days worked"
    )
    .unwrap();
    for row in &result.breakdown {
        writeln!(
            output,
            "{:<12}{:<12}{:<11}{}",
            row.employee_low, row.employee_high, row.project_id, row.days_overlap
        )
        .unwrap();
    }

    output
}

/// JSON result structure.
#[derive(Debug, Serialize)]
pub struct JsonResult<'a> {
    pub employee_low: i64,
    pub employee_high: i64,
    pub total_days: i64,
    pub breakdown: &'a [PairProjectOverlap],
}

/// Formats the result as JSON.
pub fn format_result_json(result: &LongestPair) -> Result<String> {
    let json = JsonResult {
        employee_low: result.employee_low,
        employee_high: result.employee_high,
        total_days: result.total_days(),
        breakdown: &result.breakdown,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Runs the pair command.
pub fn run<W: Write>(writer: &mut W, input: &Path, config: &Config, json: bool) -> Result<()> {
    let intervals: Vec<WorkInterval> = load_rows(input, config)?
        .into_iter()
        .map(|row| row.interval)
        .collect();

    let result = compute_longest_pair(&intervals);
    if result.is_none() {
        tracing::debug!(records = intervals.len(), "no overlapping pair");
    } else {
        tracing::debug!(
            employee_low = result.employee_low,
            employee_high = result.employee_high,
            total_days = result.total_days(),
            "found longest pair"
        );
    }

    if json {
        writeln!(writer, "{}", format_result_json(&result)?)?;
    } else {
        write!(writer, "{}", format_result(&result))?;
    }
    Ok(())
}
