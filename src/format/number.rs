use once_cell::sync::Lazy;
use regex::Regex;

/// Thousands separator used by money fields (`2.500.000`).
pub const GROUPING_SEPARATOR: char = '.';

static GROUPED_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(\.\d{3})*$").expect("grouped integer pattern"));

static PLAIN_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("plain decimal pattern"));

/// Keeps only ASCII digits. Money fields carry magnitude only, so every other
/// character (grouping, decimals, symbols) is dropped.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Normalizes free-form percentage text into a plain `123.45` numeric string.
///
/// When both `,` and `.` appear, whichever occurs last is the decimal point and
/// every occurrence of the other one is discarded as grouping. A lone separator
/// kind is taken as the decimal point. Only the first decimal point survives.
pub fn extract_percentage_digits(text: &str) -> String {
    let compact: String = text
        .chars()
        .filter(|ch| *ch != '%' && !ch.is_whitespace())
        .collect();

    let normalized = match (compact.rfind(','), compact.rfind('.')) {
        (Some(comma), Some(period)) if comma > period => {
            compact.replace('.', "").replacen(',', ".", 1)
        }
        (Some(_), Some(_)) => compact.replace(',', ""),
        (Some(_), None) => compact.replacen(',', ".", 1),
        _ => compact,
    };

    let mut out = String::with_capacity(normalized.len());
    let mut seen_point = false;
    for ch in normalized.chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
        } else if ch == '.' && !seen_point {
            out.push('.');
            seen_point = true;
        }
    }
    out
}

/// Parses a non-negative decimal out of percentage-style text. Returns `None`
/// when no digits remain.
pub fn parse_percentage_number(text: &str) -> Option<f64> {
    let numeric = extract_percentage_digits(text);
    if !numeric.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    numeric.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses the leading plain decimal of `text` (`"2500000.00"`, `"12.5 COP"`),
/// the way server-rendered values arrive on an edit view.
pub fn parse_leading_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let mut end = 0;
    let mut seen_point = false;
    for (idx, ch) in trimmed.char_indices() {
        if ch.is_ascii_digit() {
            end = idx + 1;
        } else if ch == '.' && !seen_point {
            seen_point = true;
        } else {
            break;
        }
    }
    let candidate = &trimmed[..end];
    if !candidate.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    candidate.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Renders a money amount: rounded to an integer and grouped with `.`.
/// Absent, zero and negative amounts render as an empty string.
pub fn format_money(parsed: Option<f64>) -> String {
    match parsed {
        Some(value) if value.is_finite() => {
            let rounded = value.round();
            if rounded <= 0.0 {
                return String::new();
            }
            group_digit_string(&format!("{rounded:.0}"))
        }
        _ => String::new(),
    }
}

/// Renders a percentage with a trailing `%`.
pub fn format_percentage(parsed: Option<f64>) -> String {
    let bare = format_percentage_bare(parsed);
    if bare.is_empty() {
        bare
    } else {
        format!("{bare}%")
    }
}

/// Renders a percentage without the `%` suffix. Whole numbers drop their
/// fractional part; anything else keeps its shortest decimal representation.
pub fn format_percentage_bare(parsed: Option<f64>) -> String {
    match parsed {
        Some(value) if value.is_finite() && value >= 0.0 => {
            // -0.0 passes the comparison above
            let value = value.abs();
            if value.fract() == 0.0 {
                format!("{value:.0}")
            } else {
                value.to_string()
            }
        }
        _ => String::new(),
    }
}

/// True when `text` is already a grouped integer such as `250`, `1.000` or
/// `2.500.000`.
pub fn is_already_grouped_integer(text: &str) -> bool {
    GROUPED_INTEGER.is_match(text)
}

/// True when `text` is a bare `123` or `12.5` with nothing around it.
pub fn is_plain_decimal(text: &str) -> bool {
    PLAIN_DECIMAL.is_match(text)
}

/// Groups a run of digits with [`GROUPING_SEPARATOR`]. Leading zeros are
/// dropped, an all-zero run collapses to `"0"` and an empty run stays empty.
pub fn group_digit_string(digits: &str) -> String {
    if digits.is_empty() {
        return String::new();
    }
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return "0".to_string();
    }
    group_digits(significant, GROUPING_SEPARATOR)
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Reformats a server-rendered money value for an editable or read-only view.
///
/// Returns `None` when the field should be left as it is: empty, already
/// grouped, or without a positive integer part. Anything after the first `.`
/// is treated as server decimals and ignored (`"2500000.00"` is two and a half
/// million, not two hundred and fifty).
pub fn normalize_money_value(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || is_already_grouped_integer(trimmed) {
        return None;
    }
    let integer_part = trimmed.split('.').next().unwrap_or_default();
    let digits = digits_only(integer_part);
    if digits.bytes().all(|b| b == b'0') {
        return None;
    }
    Some(group_digit_string(&digits))
}

/// Reformats a server-rendered percentage for an editable view. Values that
/// already carry `%` and negative values are left alone.
pub fn normalize_percentage_value(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('%') || is_negative(trimmed) {
        return None;
    }
    let rendered = format_percentage(parse_percentage_number(trimmed));
    (!rendered.is_empty()).then_some(rendered)
}

/// Reformats a percentage shown in a read-only view, where the `%` sign lives
/// outside the value.
pub fn normalize_percentage_display(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || is_plain_decimal(trimmed) || is_negative(trimmed) {
        return None;
    }
    let rendered = format_percentage_bare(parse_percentage_number(trimmed));
    (!rendered.is_empty()).then_some(rendered)
}

// digit extraction drops the sign, so it has to be checked on the raw text
fn is_negative(trimmed: &str) -> bool {
    trimmed.starts_with('-')
}
