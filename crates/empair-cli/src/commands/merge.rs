//! Merge command for inspecting normalized assignments.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use empair_core::{MergedInterval, WorkInterval, merge_intervals};

use super::input::load_rows;
use crate::Config;

/// Formats merged intervals as a table.
pub fn format_merged(merged: &[MergedInterval]) -> String {
    let mut output = String::new();

    if merged.is_empty() {
        writeln!(output, "No assignments.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<8}{:<11}{:<12}{:<12}{}",
        "EmpID", "ProjectID", "DateFrom", "DateTo", "Days"
    )
    .unwrap();
    for interval in merged {
        let interval = interval.as_interval();
        writeln!(
            output,
            "{:<8}{:<11}{:<12}{:<12}{}",
            interval.employee_id,
            interval.project_id,
            interval.date_from.format("%Y-%m-%d").to_string(),
            interval.date_to.format("%Y-%m-%d").to_string(),
            interval.days()
        )
        .unwrap();
    }

    output
}

pub fn run<W: Write>(writer: &mut W, input: &Path, config: &Config, json: bool) -> Result<()> {
    let intervals: Vec<WorkInterval> = load_rows(input, config)?
        .into_iter()
        .map(|row| row.interval)
        .collect();

    let merged = merge_intervals(&intervals);
    tracing::debug!(
        records = intervals.len(),
        merged = merged.len(),
        "merged assignments"
    );

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&merged)?)?;
    } else {
        write!(writer, "{}", format_merged(&merged))?;
    }
    Ok(())
}
