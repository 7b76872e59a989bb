//! Row validation and parsing.
//!
//! Turns raw comma-separated lines into [`WorkInterval`]s. Parsing stops at
//! the first invalid row; rules are checked in a fixed order so the reported
//! error is always the first one a reader would notice on that line.

use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::parse_date;
use crate::record::{Field, ParseError, WorkInterval};

/// Literal that marks an open-ended or absent date.
const NULL_TOKEN: &str = "NULL";

/// Tunables for row validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// First-column value identifying the header row (case-insensitive).
    /// Default: `EmpID`.
    pub header_token: String,

    /// Earliest accepted year for either date.
    /// Default: 1900.
    pub min_year: i32,

    /// How many years past the current one a date may fall in.
    /// Default: 1.
    pub max_years_ahead: i32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_token: Field::EmpId.as_str().to_string(),
            min_year: 1900,
            max_years_ahead: 1,
        }
    }
}

/// A validated row together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    /// 1-based physical line number.
    pub line: usize,
    pub interval: WorkInterval,
    /// `DateTo` was `NULL` and was replaced by today's date.
    pub open_ended: bool,
    /// At least one date needed the lenient fallback parser.
    pub fallback_dates: bool,
}

/// Validates raw rows into work intervals.
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    config: ParserConfig,
    today: Option<NaiveDate>,
}

impl RecordParser {
    pub const fn new(config: ParserConfig) -> Self {
        Self {
            config,
            today: None,
        }
    }

    /// Pin the date used for `NULL` substitution and the year bound.
    ///
    /// Without this the local date is read when parsing starts.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Parse lines into intervals, in input order.
    pub fn parse<I, S>(&self, lines: I) -> Result<Vec<WorkInterval>, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self
            .parse_rows(lines)?
            .into_iter()
            .map(|row| row.interval)
            .collect())
    }

    /// Parse lines, keeping line numbers and how each row was read.
    pub fn parse_rows<I, S>(&self, lines: I) -> Result<Vec<ParsedRow>, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let mut state = ParseState {
            config: &self.config,
            today,
            max_year: today.year().saturating_add(self.config.max_years_ahead),
            header_seen: false,
            seen: HashMap::new(),
        };

        let mut rows = Vec::new();
        for (idx, line) in lines.into_iter().enumerate() {
            if let Some(row) = state.parse_line(idx + 1, line.as_ref())? {
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

type RowKey = (i64, i64, NaiveDate, NaiveDate);

struct ParseState<'a> {
    config: &'a ParserConfig,
    today: NaiveDate,
    max_year: i32,
    header_seen: bool,
    /// Composite key to the line it was first seen on.
    seen: HashMap<RowKey, usize>,
}

/// A date column after NULL handling and format recognition.
struct DateValue {
    date: NaiveDate,
    fallback: bool,
}

impl ParseState<'_> {
    fn parse_line(&mut self, line: usize, raw: &str) -> Result<Option<ParsedRow>, ParseError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();

        if !self.header_seen
            && !self.config.header_token.is_empty()
            && parts[0].eq_ignore_ascii_case(&self.config.header_token)
        {
            self.header_seen = true;
            return Ok(None);
        }

        let &[emp, project, from, to] = parts.as_slice() else {
            return Err(ParseError::MalformedRow {
                line,
                found: parts.len(),
            });
        };

        if let Some((field, _)) = Field::ALL
            .into_iter()
            .zip([emp, project, from, to])
            .find(|(_, value)| value.is_empty())
        {
            return Err(ParseError::MissingField { line, field });
        }

        let employee_id = parse_id(line, Field::EmpId, emp)?;
        let project_id = parse_id(line, Field::ProjectId, project)?;

        if from.eq_ignore_ascii_case(NULL_TOKEN) {
            return Err(ParseError::NullDateFrom { line });
        }
        let date_from = parse_date_field(line, Field::DateFrom, from)?;

        let open_ended = to.eq_ignore_ascii_case(NULL_TOKEN);
        let date_to = if open_ended {
            DateValue {
                date: self.today,
                fallback: false,
            }
        } else {
            parse_date_field(line, Field::DateTo, to)?
        };

        self.check_year(line, Field::DateFrom, date_from.date)?;
        self.check_year(line, Field::DateTo, date_to.date)?;

        if date_from.date > date_to.date {
            return Err(ParseError::InvalidDateRange {
                line,
                from: date_from.date,
                to: date_to.date,
            });
        }

        let key = (employee_id, project_id, date_from.date, date_to.date);
        if let Some(&first_line) = self.seen.get(&key) {
            return Err(ParseError::DuplicateRow { line, first_line });
        }
        self.seen.insert(key, line);

        Ok(Some(ParsedRow {
            line,
            interval: WorkInterval {
                employee_id,
                project_id,
                date_from: date_from.date,
                date_to: date_to.date,
            },
            open_ended,
            fallback_dates: date_from.fallback || date_to.fallback,
        }))
    }

    fn check_year(&self, line: usize, field: Field, date: NaiveDate) -> Result<(), ParseError> {
        let year = date.year();
        if year < self.config.min_year || year > self.max_year {
            return Err(ParseError::DateOutOfRange {
                line,
                field,
                value: date,
                min_year: self.config.min_year,
                max_year: self.max_year,
            });
        }
        Ok(())
    }
}

fn parse_id(line: usize, field: Field, value: &str) -> Result<i64, ParseError> {
    value.parse().map_err(|_| ParseError::NonNumericId {
        line,
        field,
        value: value.to_string(),
    })
}

fn parse_date_field(line: usize, field: Field, value: &str) -> Result<DateValue, ParseError> {
    parse_date(value)
        .map(|(date, matched)| DateValue {
            date,
            fallback: matched.is_fallback(),
        })
        .ok_or_else(|| ParseError::UnsupportedDateFormat {
            line,
            field,
            value: value.to_string(),
        })
}
