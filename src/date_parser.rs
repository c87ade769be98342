//! Normalizes whatever lands in a date column into a calendar date.
//!
//! Accepted inputs:
//! - a real date-time cell, truncated to its calendar day
//! - text or numbers of the form `day/month/year`, where the separator may be
//!   `/`, `-` or `.`
//!
//! Everything else, including impossible calendar dates such as `31/02/2025`,
//! parses to `None`. Unparseable input is never an error.

use crate::cell::CellValue;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SEPARATOR_REGEX: Regex = Regex::new(r"[-.]").unwrap();
}

/// Parses a cell into a canonical date.
pub fn parse_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Date(dt) => Some(dt.date()),
        v if v.is_empty() => None,
        other => parse_date_str(&other.to_string()),
    }
}

/// Parses `day/month/year` text. Day-month-year order is fixed and the year
/// is taken as written, so `1/1/25` is year 25.
pub fn parse_date_str(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }

    let normalized = SEPARATOR_REGEX.replace_all(text, "/");
    let parts: Vec<&str> = normalized.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let day = parts[0].trim().parse::<u32>().ok()?;
    let month = parts[1].trim().parse::<u32>().ok()?;
    let year = parts[2].trim().parse::<i32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}
