//! Small formatting helpers shared by the view renderers and the CLI.

use chrono::{DateTime, NaiveDate};

/// Maximum number of characters of an image description shown in the gallery
pub const DESCRIPTION_LIMIT: usize = 150;

/// Format an upstream date string as e.g. "November 26, 2011".
///
/// Accepts plain `YYYY-MM-DD` dates as well as RFC 3339 timestamps (the image
/// library's `date_created`). Missing or empty input yields "N/A"; anything
/// unparseable is shown as-is.
pub fn format_date(date: Option<&str>) -> String {
    let Some(raw) = date.map(str::trim).filter(|s| !s.is_empty()) else {
        return "N/A".to_string();
    };

    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()));

    match parsed {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Format a count with thousands separators (695670 -> "695,670")
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Cut a description down to [`DESCRIPTION_LIMIT`] characters, appending "..."
/// when anything was dropped.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_LIMIT {
        return text.to_string();
    }

    let mut out: String = text.chars().take(DESCRIPTION_LIMIT).collect();
    out.push_str("...");
    out
}
