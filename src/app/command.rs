//! Command parsing for the fxplore session.
//!
//! Turns one line of user input into a [Command]. Filter values (sizes, kinds, dates)
//! are validated here, the listing core only ever sees parsed [FilterCriteria](crate::core::FilterCriteria) values.

use crate::core::filter::KindFilter;

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use thiserror::Error;

const KIB: u64 = 1024;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Help text printed by the `help` command.
pub const HELP_TEXT: &str = r#"Commands:
  q                         Quit
  u                         Go up one directory
  cd <path>                 Change directory (relative paths and ~ supported)
  <name>                    Enter a directory or open a file with the default application
  filter size <min>-<max>   Show entries with a size in [min, max], e.g. 10K-1M
  filter size <max>         Show entries up to <max>, e.g. 1G
  filter type f|d           Show only files (f) or directories (d)
  filter date <from>..<to>  Show entries modified in [from, to], either side optional
                            Dates: YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS"
  search <term>             Case-insensitive name search (empty term clears it)
  clear filter              Reset all filters
  help, ?                   Show this help (an entry with that name is opened instead)
"#;

/// Errors for malformed command arguments.
/// The criteria are left unchanged when one of these is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("invalid size '{0}' (expected e.g. 512, 10K, 2M, 1G)")]
    InvalidSize(String),
    #[error("invalid size range '{0}': minimum exceeds maximum")]
    InvertedSizeRange(String),
    #[error("invalid type '{0}' (expected f or d)")]
    InvalidKind(String),
    #[error("invalid date '{0}' (expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)")]
    InvalidDate(String),
    #[error("invalid date range '{0}': start is after end")]
    InvertedDateRange(String),
    #[error("missing argument for '{0}'")]
    MissingArgument(&'static str),
}

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Up,
    Refresh,
    Help,
    ChangeDir(String),
    FilterSize { min: Option<u64>, max: Option<u64> },
    FilterKind(KindFilter),
    FilterDate { min: Option<i64>, max: Option<i64> },
    Search(String),
    ClearFilter,
    /// Anything unrecognised is taken as an entry name of the current directory.
    Open(String),
}

impl Command {
    /// Parses one input line (without its line terminator).
    pub fn parse(input: &str) -> Result<Command, CommandError> {
        if input.trim().is_empty() {
            return Ok(Command::Refresh);
        }
        if input.eq_ignore_ascii_case("q") {
            return Ok(Command::Quit);
        }
        if input.eq_ignore_ascii_case("u") {
            return Ok(Command::Up);
        }
        if input.eq_ignore_ascii_case("clear filter") {
            return Ok(Command::ClearFilter);
        }
        if input.eq_ignore_ascii_case("help") || input == "?" {
            return Ok(Command::Help);
        }

        if let Some(path) = strip_keyword(input, "cd ") {
            let path = path.trim();
            if path.is_empty() {
                return Err(CommandError::MissingArgument("cd"));
            }
            return Ok(Command::ChangeDir(path.to_string()));
        }
        if let Some(spec) = strip_keyword(input, "filter size ") {
            let (min, max) = parse_size_range(spec)?;
            return Ok(Command::FilterSize { min, max });
        }
        if let Some(spec) = strip_keyword(input, "filter type ") {
            return parse_kind(spec).map(Command::FilterKind);
        }
        if let Some(spec) = strip_keyword(input, "filter date ") {
            let (min, max) = parse_date_range(spec)?;
            return Ok(Command::FilterDate { min, max });
        }
        if let Some(term) = strip_keyword(input, "search ") {
            return Ok(Command::Search(term.to_string()));
        }

        Ok(Command::Open(input.to_string()))
    }
}

/// Strips `keyword` from the start of `input`, ignoring ASCII case.
fn strip_keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let head = input.get(..keyword.len())?;
    if head.eq_ignore_ascii_case(keyword) {
        Some(&input[keyword.len()..])
    } else {
        None
    }
}

/// Parses a size like `512`, `10K`, `2m` or `1G`. Suffixes are powers of 1024.
pub fn parse_size(text: &str) -> Result<u64, CommandError> {
    let text = text.trim();
    let invalid = || CommandError::InvalidSize(text.to_string());

    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (digits, suffix) = text.split_at(split);
    if digits.is_empty() {
        return Err(invalid());
    }
    let value: u64 = digits.parse().map_err(|_| invalid())?;

    let multiplier = match suffix {
        "" => 1,
        "k" | "K" => KIB,
        "m" | "M" => KIB * KIB,
        "g" | "G" => KIB * KIB * KIB,
        _ => return Err(invalid()),
    };
    value.checked_mul(multiplier).ok_or_else(invalid)
}

/// Parses the argument of `filter size`.
///
/// `A-B` is the inclusive range [A, B], either side may be left empty.
/// A single value `B` means [0, B].
pub fn parse_size_range(spec: &str) -> Result<(Option<u64>, Option<u64>), CommandError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(CommandError::MissingArgument("filter size"));
    }

    let Some((low, high)) = spec.split_once('-') else {
        return Ok((Some(0), Some(parse_size(spec)?)));
    };

    let min = optional(low, parse_size)?;
    let max = optional(high, parse_size)?;
    if min.is_none() && max.is_none() {
        return Err(CommandError::InvalidSize(spec.to_string()));
    }
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        return Err(CommandError::InvertedSizeRange(spec.to_string()));
    }
    Ok((min, max))
}

/// Parses the argument of `filter type`: the first letter decides, `f` or `d`.
pub fn parse_kind(spec: &str) -> Result<KindFilter, CommandError> {
    let spec = spec.trim();
    spec.chars()
        .next()
        .and_then(KindFilter::from_letter)
        .ok_or_else(|| CommandError::InvalidKind(spec.to_string()))
}

/// Which end of a range a bare date stands for.
#[derive(Debug, Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// Parses a local date or date-time into unix seconds.
/// A bare date is the first second of that day as a start bound and the last one as an end bound.
fn parse_date(text: &str, bound: Bound) -> Result<i64, CommandError> {
    let text = text.trim();
    let invalid = || CommandError::InvalidDate(text.to_string());

    let naive = match NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT) {
        Ok(dt) => dt,
        Err(_) => {
            let date = NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid())?;
            let time = match bound {
                Bound::Start => date.and_hms_opt(0, 0, 0),
                Bound::End => date.and_hms_opt(23, 59, 59),
            };
            time.ok_or_else(invalid)?
        }
    };

    let local = Local.from_local_datetime(&naive);
    let resolved = match bound {
        Bound::Start => local.earliest(),
        Bound::End => local.latest(),
    };
    resolved.map(|dt| dt.timestamp()).ok_or_else(invalid)
}

/// Parses the argument of `filter date`.
///
/// `FROM..TO` is inclusive, either side may be left empty. A single date without `..`
/// selects that whole day.
pub fn parse_date_range(spec: &str) -> Result<(Option<i64>, Option<i64>), CommandError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(CommandError::MissingArgument("filter date"));
    }

    let (min, max) = match spec.split_once("..") {
        Some((from, to)) => (
            optional(from, |s| parse_date(s, Bound::Start))?,
            optional(to, |s| parse_date(s, Bound::End))?,
        ),
        None => (
            Some(parse_date(spec, Bound::Start)?),
            Some(parse_date(spec, Bound::End)?),
        ),
    };

    if min.is_none() && max.is_none() {
        return Err(CommandError::InvalidDate(spec.to_string()));
    }
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        return Err(CommandError::InvertedDateRange(spec.to_string()));
    }
    Ok((min, max))
}

/// Runs `parse` on `text` unless it is blank.
fn optional<T>(
    text: &str,
    parse: impl FnOnce(&str) -> Result<T, CommandError>,
) -> Result<Option<T>, CommandError> {
    if text.trim().is_empty() {
        Ok(None)
    } else {
        parse(text).map(Some)
    }
}
