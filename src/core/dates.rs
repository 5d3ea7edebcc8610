//! Date rendering: "9th April 2025"

use crate::types::CellValue;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Datetime layouts tried after a native value, first match wins
const DATETIME_FORMATS: &[&str] = &["%d-%m-%Y %H:%M:%S"];

/// Date-only layouts, tried after `DATETIME_FORMATS`
const DATE_FORMATS: &[&str] = &["%d %B %Y"];

/// Layouts produced by other exporters (pandas, ISO); lowest priority
const FALLBACK_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S"];
const FALLBACK_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y"];

/// Day number with its English ordinal suffix
pub fn ordinal(day: u32) -> String {
    let suffix = if (11..=13).contains(&(day % 100)) {
        "th"
    } else {
        match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", day, suffix)
}

pub fn render(date: NaiveDate) -> String {
    format!("{} {}", ordinal(date.day()), date.format("%B %Y"))
}

/// chrono's `%Y` takes 1 to 4 digits and `%B` takes abbreviations; the
/// layouts here want a four-digit year and a full month name.
fn matches_layout(text: &str, fmt: &str, date: NaiveDate) -> bool {
    let year = date.format("%Y").to_string();
    let four_digit_year =
        year.len() == 4 && text.split(|c: char| !c.is_ascii_digit()).any(|tok| tok == year);
    let full_month = !fmt.contains("%B")
        || text
            .to_lowercase()
            .contains(&date.format("%B").to_string().to_lowercase());
    four_digit_year && full_month
}

/// Parse free text against the accepted layouts
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let datetime = |formats: &[&str]| {
        formats.iter().find_map(|fmt| {
            NaiveDateTime::parse_from_str(text, fmt)
                .ok()
                .map(|dt| dt.date())
                .filter(|date| matches_layout(text, fmt, *date))
        })
    };
    let date = |formats: &[&str]| {
        formats.iter().find_map(|fmt| {
            NaiveDate::parse_from_str(text, fmt)
                .ok()
                .filter(|date| matches_layout(text, fmt, *date))
        })
    };

    datetime(DATETIME_FORMATS)
        .or_else(|| date(DATE_FORMATS))
        .or_else(|| datetime(FALLBACK_DATETIME_FORMATS))
        .or_else(|| date(FALLBACK_DATE_FORMATS))
}

/// Format a text date; blank gives `""`, unparseable text is returned as-is
pub fn format_date_str(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    match parse_date(text) {
        Some(date) => render(date),
        None => {
            tracing::debug!(value = text, "unrecognised date, keeping original text");
            text.to_string()
        }
    }
}

/// Format a cell that should hold a date
pub fn format_date(value: Option<&CellValue>) -> String {
    match value {
        None | Some(CellValue::Empty) => String::new(),
        Some(CellValue::DateTime(dt)) => render(dt.date()),
        Some(other) => format_date_str(&other.as_text()),
    }
}

/// Start/end rendered as one line, collapsed when both fall on the same day
pub fn date_line(start: Option<&CellValue>, end: Option<&CellValue>) -> String {
    let start = format_date(start);
    let end = format_date(end);
    match (start.is_empty(), end.is_empty()) {
        (false, false) if start == end => start,
        (false, false) => format!("{} - {}", start, end),
        (false, true) => start,
        (true, false) => end,
        (true, true) => String::new(),
    }
}
