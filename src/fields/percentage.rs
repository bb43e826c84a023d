use crate::format::{
    extract_percentage_digits, format_percentage, normalize_percentage_value,
    parse_percentage_number,
};

use super::{EditState, FieldKind, LiveField};

/// Percentage input. Typing is filtered but never reformatted; the `%` form is
/// applied on blur and removed on focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PercentageField {
    state: EditState,
}

impl PercentageField {
    /// Wraps an input that already holds `initial`, formatting it unless it
    /// already carries a `%` or is negative.
    pub fn attach(initial: &str) -> Self {
        let value = normalize_percentage_value(initial).unwrap_or_else(|| initial.to_string());
        Self {
            state: EditState::new(value),
        }
    }
}

impl LiveField for PercentageField {
    fn kind(&self) -> FieldKind {
        FieldKind::Percentage
    }

    fn state(&self) -> &EditState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EditState {
        &mut self.state
    }

    fn admits(&self, ch: char) -> bool {
        match ch {
            '0'..='9' | '%' => true,
            ',' | '.' => !self.state.value.contains([',', '.']),
            _ => false,
        }
    }

    fn on_input(&mut self) {}

    fn on_focus(&mut self) {
        let numeric = extract_percentage_digits(&self.state.value);
        if !numeric.is_empty() {
            self.state.replace(numeric);
        }
    }

    fn on_blur(&mut self) {
        let rendered = format_percentage(parse_percentage_number(&self.state.value));
        self.state.replace(rendered);
    }

    fn submit_value(&self) -> String {
        extract_percentage_digits(&self.state.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_allows_one_decimal_separator() {
        let mut field = PercentageField::default();
        assert!(field.type_char('1'));
        assert!(field.type_char('2'));
        assert!(field.type_char(','));
        assert!(!field.type_char('.'));
        assert!(!field.type_char(','));
        assert!(field.type_char('5'));
        assert!(!field.type_char('x'));
        assert_eq!(field.value(), "12,5");
    }

    #[test]
    fn blur_formats_and_focus_restores_plain_number() {
        let mut field = PercentageField::default();
        field.type_text("12,5");
        field.on_blur();
        assert_eq!(field.value(), "12.5%");
        field.on_focus();
        assert_eq!(field.value(), "12.5");
        field.on_blur();
        assert_eq!(field.value(), "12.5%");
    }

    #[test]
    fn whole_numbers_lose_their_decimals() {
        let mut field = PercentageField::attach("");
        field.type_text("8.0");
        field.on_blur();
        assert_eq!(field.value(), "8%");
    }

    #[test]
    fn blur_without_digits_clears() {
        let mut field = PercentageField::default();
        field.type_text("%");
        field.on_blur();
        assert_eq!(field.value(), "");
    }

    #[test]
    fn attach_respects_existing_sign() {
        assert_eq!(PercentageField::attach("12.00").value(), "12%");
        assert_eq!(PercentageField::attach("7,5%").value(), "7,5%");
        assert_eq!(PercentageField::attach("7,5%").submit_value(), "7.5");
    }

    #[test]
    fn attach_keeps_negative_values() {
        assert_eq!(PercentageField::attach("-5").value(), "-5");
        assert_eq!(PercentageField::attach(" -2,5").value(), " -2,5");
    }
}
