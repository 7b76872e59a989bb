//! Date recognition for input rows.
//!
//! Dates are first matched against a fixed, ordered list of exact formats.
//! The first format whose shape fits wins, so ambiguous values such as
//! `03/04/2024` resolve month-first. Only when no exact format matches is a
//! lenient fallback tried (ISO date-times, single-digit components, month
//! names, two-digit years). Fallback patterns are also shape-checked before
//! chrono sees them.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Exact formats in priority order, in the notation users see in messages.
pub const SUPPORTED_FORMATS: [&str; 8] = [
    "yyyy-MM-dd",
    "dd-MM-yyyy",
    "MM/dd/yyyy",
    "dd/MM/yyyy",
    "yyyy/MM/dd",
    "dd.MM.yyyy",
    "M/d/yyyy",
    "d.M.yyyy",
];

/// How a date value was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMatch {
    /// Matched one of [`SUPPORTED_FORMATS`].
    Exact(&'static str),
    /// Matched only the lenient fallback parser.
    Fallback,
}

impl DateMatch {
    pub const fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback)
    }
}

struct ExactFormat {
    name: &'static str,
    shape: Regex,
    pattern: &'static str,
}

/// Shape regexes enforce digit counts; chrono alone accepts unpadded fields.
static EXACT_FORMATS: LazyLock<Vec<ExactFormat>> = LazyLock::new(|| {
    let shapes = [
        (r"^\d{4}-\d{2}-\d{2}$", "%Y-%m-%d"),
        (r"^\d{2}-\d{2}-\d{4}$", "%d-%m-%Y"),
        (r"^\d{2}/\d{2}/\d{4}$", "%m/%d/%Y"),
        (r"^\d{2}/\d{2}/\d{4}$", "%d/%m/%Y"),
        (r"^\d{4}/\d{2}/\d{2}$", "%Y/%m/%d"),
        (r"^\d{2}\.\d{2}\.\d{4}$", "%d.%m.%Y"),
        (r"^\d{1,2}/\d{1,2}/\d{4}$", "%m/%d/%Y"),
        (r"^\d{1,2}\.\d{1,2}\.\d{4}$", "%d.%m.%Y"),
    ];

    SUPPORTED_FORMATS
        .into_iter()
        .zip(shapes)
        .map(|(name, (shape, pattern))| ExactFormat {
            name,
            shape: Regex::new(shape).unwrap(),
            pattern,
        })
        .collect()
});

/// Years written as two digits fall in the century ending here.
const TWO_DIGIT_YEAR_MAX: i32 = 2049;

/// How a fallback shape is turned into a date.
#[derive(Clone, Copy)]
enum FallbackKind {
    Date(&'static str),
    DateTime(&'static str),
    /// `Jan 2024`: first day of the month.
    MonthYear,
    /// `M/d/yy` with the year expanded into [`TWO_DIGIT_YEAR_MAX`]'s century.
    ShortYear,
}

struct FallbackFormat {
    shape: Regex,
    kind: FallbackKind,
}

impl FallbackFormat {
    fn apply(&self, input: &str) -> Option<NaiveDate> {
        match self.kind {
            FallbackKind::Date(pattern) => NaiveDate::parse_from_str(input, pattern).ok(),
            FallbackKind::DateTime(pattern) => NaiveDateTime::parse_from_str(input, pattern)
                .ok()
                .map(|dt| dt.date()),
            FallbackKind::MonthYear => {
                NaiveDate::parse_from_str(&format!("1 {input}"), "%d %b %Y").ok()
            }
            FallbackKind::ShortYear => {
                let caps = self.shape.captures(input)?;
                let month = caps[1].parse().ok()?;
                let day = caps[2].parse().ok()?;
                let year = expand_two_digit_year(caps[3].parse().ok()?);
                NaiveDate::from_ymd_opt(year, month, day)
            }
        }
    }
}

/// Every fallback is anchored to a shape so chrono never reads a day or
/// month as the year.
static FALLBACK_FORMATS: LazyLock<Vec<FallbackFormat>> = LazyLock::new(|| {
    let shapes = [
        (
            r"^\d{4}-\d{1,2}-\d{1,2}T\d{1,2}:\d{2}:\d{2}(\.\d+)?$",
            FallbackKind::DateTime("%Y-%m-%dT%H:%M:%S%.f"),
        ),
        (
            r"^\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{2}:\d{2}(\.\d+)?$",
            FallbackKind::DateTime("%Y-%m-%d %H:%M:%S%.f"),
        ),
        (r"^\d{4}-\d{1,2}-\d{1,2}T\d{1,2}:\d{2}$", FallbackKind::DateTime("%Y-%m-%dT%H:%M")),
        (r"^\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{2}$", FallbackKind::DateTime("%Y-%m-%d %H:%M")),
        (r"^\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2}:\d{2}$", FallbackKind::DateTime("%m/%d/%Y %H:%M:%S")),
        (r"^\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2}$", FallbackKind::DateTime("%m/%d/%Y %H:%M")),
        (r"^\d{4}-\d{1,2}-\d{1,2}$", FallbackKind::Date("%Y-%m-%d")),
        (r"^\d{4}/\d{1,2}/\d{1,2}$", FallbackKind::Date("%Y/%m/%d")),
        (r"^\d{4}\.\d{1,2}\.\d{1,2}$", FallbackKind::Date("%Y.%m.%d")),
        (r"^\d{1,2}/\d{1,2}/\d{4}$", FallbackKind::Date("%m/%d/%Y")),
        (r"^\d{1,2}-\d{1,2}-\d{4}$", FallbackKind::Date("%m-%d-%Y")),
        (r"^(\d{1,2})/(\d{1,2})/(\d{2})$", FallbackKind::ShortYear),
        (r"^[A-Za-z]+ \d{1,2}, \d{4}$", FallbackKind::Date("%b %d, %Y")),
        (r"^[A-Za-z]+ \d{1,2} \d{4}$", FallbackKind::Date("%b %d %Y")),
        (r"^\d{1,2} [A-Za-z]+ \d{4}$", FallbackKind::Date("%d %b %Y")),
        (r"^\d{1,2}-[A-Za-z]+-\d{4}$", FallbackKind::Date("%d-%b-%Y")),
        (r"^[A-Za-z]+, [A-Za-z]+ \d{1,2}, \d{4}$", FallbackKind::Date("%A, %b %d, %Y")),
        (r"^[A-Za-z]+ \d{4}$", FallbackKind::MonthYear),
    ];

    shapes
        .into_iter()
        .map(|(shape, kind)| FallbackFormat {
            shape: Regex::new(shape).unwrap(),
            kind,
        })
        .collect()
});

const fn expand_two_digit_year(yy: i32) -> i32 {
    let year = 2000 + yy;
    if year > TWO_DIGIT_YEAR_MAX {
        year - 100
    } else {
        year
    }
}

/// Parse a date using the exact formats, then the fallback parser.
///
/// Surrounding whitespace is ignored. Returns `None` if nothing matches.
pub fn parse_date(input: &str) -> Option<(NaiveDate, DateMatch)> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for format in EXACT_FORMATS.iter() {
        if !format.shape.is_match(input) {
            continue;
        }
        if let Ok(date) = NaiveDate::parse_from_str(input, format.pattern) {
            return Some((date, DateMatch::Exact(format.name)));
        }
    }

    parse_fallback(input).map(|date| (date, DateMatch::Fallback))
}

fn parse_fallback(input: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }

    FALLBACK_FORMATS
        .iter()
        .filter(|format| format.shape.is_match(input))
        .find_map(|format| format.apply(input))
}
