//! Text conversions for money and percentage fields.

pub mod number;

pub use number::{
    digits_only, extract_percentage_digits, format_money, format_percentage,
    format_percentage_bare, group_digit_string, is_already_grouped_integer,
    normalize_money_value, normalize_percentage_display, normalize_percentage_value,
    parse_leading_decimal, parse_percentage_number, GROUPING_SEPARATOR,
};

use serde::{Deserialize, Serialize};

/// How a parsed number is rendered back into a field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DisplayMode {
    /// Whole amount grouped with `.`, no decimals.
    Money,
    /// Whole or decimal value followed by `%`.
    Percentage,
    /// As [`DisplayMode::Percentage`] without the sign, for read-only views.
    PercentageBare,
}

impl DisplayMode {
    pub fn render(self, parsed: Option<f64>) -> String {
        match self {
            DisplayMode::Money => format_money(parsed),
            DisplayMode::Percentage => format_percentage(parsed),
            DisplayMode::PercentageBare => format_percentage_bare(parsed),
        }
    }

    /// Rewrites server-rendered text into this mode, or `None` when the text is
    /// already in final form or carries nothing to show.
    pub fn normalize(self, text: &str) -> Option<String> {
        match self {
            DisplayMode::Money => normalize_money_value(text),
            DisplayMode::Percentage => normalize_percentage_value(text),
            DisplayMode::PercentageBare => normalize_percentage_display(text),
        }
    }
}
