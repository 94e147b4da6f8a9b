//! Field normalizer: best-effort canonical display forms for loosely typed
//! input. Every function echoes its input when it cannot interpret it.
//!
//! These run when a field loses focus, never per keystroke.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTH_NAMES: &[(&str, u32)] = &[
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sep", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%B %d %Y", "%d %B %Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

static MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{3}\s[0-9]{4}$").expect("valid regex"));

static LOOSE_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2})[/\-]([0-9]{4})|([0-9]{4})[/\-]([0-9]{1,2})|([A-Za-z]+)\s+([0-9]{4})")
        .expect("valid regex")
});

static URL_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));

static FOUR_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}").expect("valid regex"));

/// Formats a date as `Mon YYYY` ("Jan 2020").
pub fn format_date(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let trimmed = input.trim();
    if MONTH_YEAR.is_match(trimmed) {
        return trimmed.to_string();
    }

    if let Some(date) = parse_generic_date(trimmed) {
        return month_year(date.month(), date.year()).unwrap_or_else(|| input.to_string());
    }

    let Some(caps) = LOOSE_MONTH_YEAR.captures(input) else {
        return input.to_string();
    };

    let parsed = if let (Some(m), Some(y)) = (caps.get(1), caps.get(2)) {
        number_pair(m.as_str(), y.as_str())
    } else if let (Some(y), Some(m)) = (caps.get(3), caps.get(4)) {
        number_pair(m.as_str(), y.as_str())
    } else if let (Some(name), Some(y)) = (caps.get(5), caps.get(6)) {
        month_from_name(name.as_str()).zip(y.as_str().parse::<i32>().ok())
    } else {
        None
    };

    parsed
        .and_then(|(month, year)| month_year(month, year))
        .unwrap_or_else(|| input.to_string())
}

/// Formats a North American number as `(XXX) XXX-XXXX`, or
/// `+1 (XXX) XXX-XXXX` when an 11-digit number leads with the country code.
pub fn format_phone_number(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        11 if digits.starts_with('1') => {
            format!("+1 ({}) {}-{}", &digits[1..4], &digits[4..7], &digits[7..])
        }
        _ => input.to_string(),
    }
}

/// Adds an `https://` scheme to anything that looks like a bare host/path.
pub fn format_url(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    if URL_SCHEME.is_match(input) {
        return input.to_string();
    }
    if input.contains('.') && !input.chars().any(char::is_whitespace) {
        return format!("https://{input}");
    }
    input.to_string()
}

/// Reduces a graduation date to its four-digit year.
pub fn format_year(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let trimmed = input.trim();
    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.to_string();
    }

    FOUR_DIGITS
        .find(input)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| input.to_string())
}

fn parse_generic_date(s: &str) -> Option<NaiveDate> {
    let date = DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        })?;

    // Keep the output re-parseable as `Mon YYYY`.
    (1000..=9999).contains(&date.year()).then_some(date)
}

fn number_pair(month: &str, year: &str) -> Option<(u32, i32)> {
    Some((month.parse().ok()?, year.parse().ok()?))
}

/// `None` for words that are not month names, so the date is echoed as typed
/// instead of falling back to January.
fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, m)| *m)
}

fn month_year(month: u32, year: i32) -> Option<String> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_ABBREVIATIONS
        .get(index)
        .map(|abbrev| format!("{abbrev} {year}"))
}

/// Which normalizer to run on a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Date,
    Phone,
    Url,
    Year,
}

impl FieldKind {
    pub fn normalize(self, input: &str) -> String {
        match self {
            FieldKind::Date => format_date(input),
            FieldKind::Phone => format_phone_number(input),
            FieldKind::Url => format_url(input),
            FieldKind::Year => format_year(input),
        }
    }
}

/// A draft field that gets normalized when it loses focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "camelCase")]
pub enum BlurField {
    Phone,
    Linkedin,
    Github,
    StartDate {
        #[serde(rename = "experienceId")]
        experience_id: String,
    },
    EndDate {
        #[serde(rename = "experienceId")]
        experience_id: String,
    },
    Year {
        #[serde(rename = "educationId")]
        education_id: String,
    },
}

/// Normalizes one field of `data`. Returns the replacement value only when
/// normalization changed something, so callers can skip no-op updates.
pub fn apply_blur(data: &ResumeData, field: &BlurField) -> Option<ResumeData> {
    let mut next = data.clone();
    let target: &mut String = match field {
        BlurField::Phone => &mut next.personal_info.phone,
        BlurField::Linkedin => &mut next.personal_info.linkedin,
        BlurField::Github => &mut next.personal_info.github,
        BlurField::StartDate { experience_id } => {
            &mut next
                .experience
                .iter_mut()
                .find(|e| &e.id == experience_id)?
                .start_date
        }
        BlurField::EndDate { experience_id } => {
            &mut next
                .experience
                .iter_mut()
                .find(|e| &e.id == experience_id)?
                .end_date
        }
        BlurField::Year { education_id } => {
            &mut next
                .education
                .iter_mut()
                .find(|e| &e.id == education_id)?
                .year
        }
    };

    let kind = match field {
        BlurField::Phone => FieldKind::Phone,
        BlurField::Linkedin | BlurField::Github => FieldKind::Url,
        BlurField::StartDate { .. } | BlurField::EndDate { .. } => FieldKind::Date,
        BlurField::Year { .. } => FieldKind::Year,
    };

    let formatted = kind.normalize(target);
    if formatted == *target {
        return None;
    }
    *target = formatted;
    Some(next)
}
