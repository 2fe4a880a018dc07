use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::workflows::priorities::DocsStatus;

const APPROVED_SPELLINGS: &[&str] = &["Approved", "Maid is already verified and accepted"];
const REJECTED_SPELLINGS: &[&str] = &["Rejected", "NA", ""];

/// Spreadsheet flags are only set by an explicit "Yes".
pub(crate) fn flag(value: Option<&str>) -> bool {
    value.is_some_and(|value| value.trim().eq_ignore_ascii_case("yes"))
}

/// "Yes" / "No" / blank, where blank is neither.
pub(crate) fn tri_state(value: Option<&str>) -> Option<bool> {
    let value = value?.trim();
    if value.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if value.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

pub(crate) fn number(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Whole, non-negative numbers only; spreadsheets often export `3` as `3.0`.
pub(crate) fn whole_number(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if let Ok(number) = trimmed.parse::<u32>() {
        return Some(number);
    }
    let number = trimmed.parse::<f64>().ok()?;
    let whole = number.is_finite() && number >= 0.0 && number.fract() == 0.0;
    if whole && number <= f64::from(u32::MAX) {
        Some(number as u32)
    } else {
        None
    }
}

pub(crate) fn docs_status(value: Option<&str>) -> DocsStatus {
    let value = value.map(str::trim).unwrap_or_default();
    if APPROVED_SPELLINGS.contains(&value) {
        DocsStatus::Approved
    } else if REJECTED_SPELLINGS.contains(&value) {
        DocsStatus::Rejected
    } else {
        DocsStatus::Unknown
    }
}

pub(crate) fn date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    ["%Y-%m-%d", "%d/%m/%Y"]
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Header cells exported from spreadsheets: trimmed, byte-order mark removed.
pub(crate) fn header(value: &str) -> String {
    value.replace('\u{feff}', "").trim().to_string()
}

pub(crate) fn is_unnamed(header: &str) -> bool {
    header.is_empty() || header.starts_with("Unnamed")
}
