//! Validate command for checking an input file.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use empair_core::ParsedRow;

use super::input::load_rows;
use crate::Config;

/// Counts gathered from a successful parse.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub records: usize,
    pub open_ended: usize,
    pub fallback_dates: usize,
    pub employees: usize,
    pub projects: usize,
}

impl ValidationSummary {
    pub fn from_rows(rows: &[ParsedRow]) -> Self {
        let mut employees: Vec<i64> = rows.iter().map(|r| r.interval.employee_id).collect();
        employees.sort_unstable();
        employees.dedup();

        let mut projects: Vec<i64> = rows.iter().map(|r| r.interval.project_id).collect();
        projects.sort_unstable();
        projects.dedup();

        Self {
            records: rows.len(),
            open_ended: rows.iter().filter(|r| r.open_ended).count(),
            fallback_dates: rows.iter().filter(|r| r.fallback_dates).count(),
            employees: employees.len(),
            projects: projects.len(),
        }
    }
}

pub fn run<W: Write>(writer: &mut W, input: &Path, config: &Config) -> Result<()> {
    let rows = load_rows(input, config)?;
    let summary = ValidationSummary::from_rows(&rows);

    for row in rows.iter().filter(|r| r.fallback_dates) {
        tracing::debug!(line = row.line, "date read by fallback parser");
    }

    writeln!(writer, "Input is valid")?;
    writeln!(writer, "Records:     {}", summary.records)?;
    writeln!(writer, "Employees:   {}", summary.employees)?;
    writeln!(writer, "Projects:    {}", summary.projects)?;
    writeln!(writer, "Open-ended:  {}", summary.open_ended)?;
    writeln!(writer, "Loose dates: {}", summary.fallback_dates)?;

    Ok(())
}
