//! Typed work records and the errors raised while building them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One employee's assignment to a project over a closed date range.
///
/// Both ends are inclusive and `date_from <= date_to` always holds for values
/// produced by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkInterval {
    pub employee_id: i64,
    pub project_id: i64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl WorkInterval {
    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.date_to - self.date_from).num_days() + 1
    }
}

/// The four columns of an input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    EmpId,
    ProjectId,
    DateFrom,
    DateTo,
}

impl Field {
    /// Column name as it appears in the header row.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmpId => "EmpID",
            Self::ProjectId => "ProjectID",
            Self::DateFrom => "DateFrom",
            Self::DateTo => "DateTo",
        }
    }

    /// All columns in input order.
    pub const ALL: [Self; 4] = [Self::EmpId, Self::ProjectId, Self::DateFrom, Self::DateTo];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reasons an input row is rejected.
///
/// Every variant names the 1-based physical line it was found on (blank lines
/// count), so callers can point the user at the offending row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The row did not split into exactly four columns.
    #[error("line {line}: row must contain exactly 4 columns, found {found}")]
    MalformedRow { line: usize, found: usize },

    /// A column was empty after trimming.
    #[error("line {line}: {field} is missing")]
    MissingField { line: usize, field: Field },

    /// An id column was not an integer.
    #[error("line {line}: {field} must be a number, got '{value}'")]
    NonNumericId {
        line: usize,
        field: Field,
        value: String,
    },

    /// `DateFrom` was the literal `NULL`.
    #[error("line {line}: DateFrom cannot be NULL")]
    NullDateFrom { line: usize },

    /// No known date format matched.
    #[error("line {line}: unsupported date format for {field}: '{value}'")]
    UnsupportedDateFormat {
        line: usize,
        field: Field,
        value: String,
    },

    /// A parsed date fell outside the accepted year window.
    #[error("line {line}: {field} '{value}' is outside allowed range ({min_year}-{max_year})")]
    DateOutOfRange {
        line: usize,
        field: Field,
        value: NaiveDate,
        min_year: i32,
        max_year: i32,
    },

    /// `DateFrom` came after `DateTo`.
    #[error("line {line}: invalid date range: {from} > {to}")]
    InvalidDateRange {
        line: usize,
        from: NaiveDate,
        to: NaiveDate,
    },

    /// The same (employee, project, from, to) tuple appeared twice.
    #[error("line {line}: duplicate row (first seen on line {first_line})")]
    DuplicateRow { line: usize, first_line: usize },
}

impl ParseError {
    /// Line the error was raised on.
    pub const fn line(&self) -> usize {
        match self {
            Self::MalformedRow { line, .. }
            | Self::MissingField { line, .. }
            | Self::NonNumericId { line, .. }
            | Self::NullDateFrom { line }
            | Self::UnsupportedDateFormat { line, .. }
            | Self::DateOutOfRange { line, .. }
            | Self::InvalidDateRange { line, .. }
            | Self::DuplicateRow { line, .. } => *line,
        }
    }

    /// Column the error refers to, if it is tied to a single one.
    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::MissingField { field, .. }
            | Self::NonNumericId { field, .. }
            | Self::UnsupportedDateFormat { field, .. }
            | Self::DateOutOfRange { field, .. } => Some(*field),
            Self::NullDateFrom { .. } => Some(Field::DateFrom),
            Self::MalformedRow { .. } | Self::InvalidDateRange { .. } | Self::DuplicateRow { .. } => {
                None
            }
        }
    }
}
