//! Shared input handling for commands.

use std::fmt::Write as _;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use empair_core::{ParseError, ParsedRow, RecordParser, SUPPORTED_FORMATS};

use crate::Config;

/// Reads the whole input into lines. A path of `-` reads stdin.
pub fn read_lines(input: &Path) -> Result<Vec<String>> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?
    };

    // Spreadsheet exports often start with a byte order mark
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    Ok(content.lines().map(String::from).collect())
}

/// Reads and validates the input, naming the source on failure.
pub fn load_rows(input: &Path, config: &Config) -> Result<Vec<ParsedRow>> {
    let lines = read_lines(input)?;
    tracing::debug!(input = %input.display(), lines = lines.len(), "read input");

    let parser = RecordParser::new(config.parser_config());
    let rows = parser
        .parse_rows(&lines)
        .map_err(|err| describe_error(input, err))?;

    tracing::debug!(records = rows.len(), "parsed input");
    Ok(rows)
}

fn describe_error(input: &Path, err: ParseError) -> anyhow::Error {
    let mut message = format!("invalid input in {}", display_name(input));
    if matches!(err, ParseError::UnsupportedDateFormat { .. }) {
        let _ = write!(
            message,
            " (supported date formats: {})",
            SUPPORTED_FORMATS.join(", ")
        );
    }
    anyhow::Error::new(err).context(message)
}

fn display_name(input: &Path) -> String {
    if input == Path::new("-") {
        "stdin".to_string()
    } else {
        input.display().to_string()
    }
}
