//! Per-field semantic rules and the severity table.

use std::sync::LazyLock;

use regex::Regex;

use leads_model::CanonicalField;

/// Permissive `local@domain.tld` shape.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// `H:MM` or `HH:MM`.
static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("invalid time regex"));

/// Valid WhatsApp number length bounds, digits only, inclusive.
pub const WHATSAPP_MIN_DIGITS: usize = 10;
pub const WHATSAPP_MAX_DIGITS: usize = 13;

/// How a field-level failure affects its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSeverity {
    /// The row is dropped with a single error.
    Fatal,
    /// The error is recorded; the row is still imported.
    Advisory,
}

/// Per-field severity table.
///
/// Kept as data rather than inlined branching so adding a canonical field
/// (or relaxing the status rule) does not touch validator control flow.
#[must_use]
pub const fn severity(field: CanonicalField) -> FieldSeverity {
    match field {
        CanonicalField::Name | CanonicalField::Status => FieldSeverity::Fatal,
        CanonicalField::Email
        | CanonicalField::Whatsapp
        | CanonicalField::Category
        | CanonicalField::Source
        | CanonicalField::Description
        | CanonicalField::PaymentAmount
        | CanonicalField::IntegrationStartTime => FieldSeverity::Advisory,
    }
}

/// Trims a name and drops the single trailing hyphen some spreadsheet
/// exports append. Applies to the name only.
#[must_use]
pub fn clean_name(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_suffix('-')
        .map_or(trimmed, str::trim)
        .to_string()
}

/// Checks e-mail shape. Returns an error message for invalid shapes; the
/// caller still stores the raw value (longstanding behavior, kept
/// deliberately).
#[must_use]
pub fn check_email(raw: &str) -> Option<String> {
    if EMAIL_REGEX.is_match(raw.trim()) {
        None
    } else {
        Some(format!("invalid email: {raw}"))
    }
}

/// Normalizes a phone value to digits only and checks length bounds.
///
/// Handles scientific-notation artifacts (`1.234E+10` from spreadsheet
/// exports) by round-tripping through a float parse before stripping.
/// Returns the digits (when any) and an error message when the digit
/// count falls outside the valid range.
#[must_use]
pub fn normalize_whatsapp(raw: &str) -> (Option<String>, Option<String>) {
    let trimmed = raw.trim();
    let expanded = if trimmed.contains(['e', 'E'])
        && let Ok(value) = trimmed.replace(',', ".").parse::<f64>()
    {
        format!("{value:.0}")
    } else {
        trimmed.to_string()
    };

    let digits: String = expanded.chars().filter(char::is_ascii_digit).collect();
    let error = if (WHATSAPP_MIN_DIGITS..=WHATSAPP_MAX_DIGITS).contains(&digits.len()) {
        None
    } else {
        Some(format!(
            "whatsapp number must have {WHATSAPP_MIN_DIGITS} to {WHATSAPP_MAX_DIGITS} digits, got {}",
            digits.len()
        ))
    };
    let value = if digits.is_empty() { None } else { Some(digits) };
    (value, error)
}

/// Parses a currency-ish amount: strips everything outside `[0-9,.-]`,
/// converts a decimal comma to a dot, and parses. Unparsable values
/// become `None` silently; negative values carry an error.
#[must_use]
pub fn parse_amount(raw: &str) -> (Option<f64>, Option<String>) {
    let cleaned: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, ',' | '.' | '-'))
        .collect();
    let Ok(value) = cleaned.replace(',', ".").parse::<f64>() else {
        return (None, None);
    };
    let error = (value < 0.0).then(|| format!("payment amount cannot be negative: {value}"));
    (Some(value), error)
}

/// Validates a time-of-day value and reformats it to zero-padded `HH:MM`.
/// Invalid values become `None` with an error.
#[must_use]
pub fn normalize_time(raw: &str) -> (Option<String>, Option<String>) {
    let trimmed = raw.trim();
    if let Some(captures) = TIME_REGEX.captures(trimmed)
        && let (Ok(hour), Ok(minute)) = (captures[1].parse::<u32>(), captures[2].parse::<u32>())
        && hour <= 23
        && minute <= 59
    {
        return (Some(format!("{hour:02}:{minute:02}")), None);
    }
    (None, Some(format!("invalid start time (expected HH:MM): {raw}")))
}
