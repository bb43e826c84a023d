use crate::format::{
    digits_only, format_money, group_digit_string, is_already_grouped_integer,
    parse_leading_decimal, GROUPING_SEPARATOR,
};

use super::{EditState, FieldKind, LiveField};

/// Money input that regroups its digits on every keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoneyField {
    state: EditState,
}

impl MoneyField {
    /// Wraps an input that already holds `initial`. Plain server values such as
    /// `2500000.00` are rounded and grouped; grouped values are kept.
    pub fn attach(initial: &str) -> Self {
        let trimmed = initial.trim();
        let value = if trimmed.is_empty() || is_already_grouped_integer(trimmed) {
            initial.to_string()
        } else {
            match parse_leading_decimal(trimmed) {
                Some(amount) if amount > 0.0 => format_money(Some(amount)),
                _ => initial.to_string(),
            }
        };
        Self {
            state: EditState::new(value),
        }
    }
}

impl LiveField for MoneyField {
    fn kind(&self) -> FieldKind {
        FieldKind::Money
    }

    fn state(&self) -> &EditState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EditState {
        &mut self.state
    }

    fn on_input(&mut self) {
        let before_len = self.state.len();
        let caret = self.state.caret;
        let digits = digits_only(&self.state.value);
        if digits.is_empty() {
            self.state.replace(String::new());
            return;
        }

        let formatted = group_digit_string(&digits);
        let moved = formatted.chars().count() != before_len;
        self.state.value = formatted;
        if moved {
            // a separator appeared or vanished, so the old offset is stale
            self.state.caret = self.state.len();
        } else {
            self.state.move_caret(caret);
        }
    }

    fn on_focus(&mut self) {
        let digits = digits_only(&self.state.value);
        if !digits.is_empty() {
            self.state.replace(digits);
        }
    }

    fn on_blur(&mut self) {
        let digits = digits_only(&self.state.value);
        self.state.replace(group_digit_string(&digits));
    }

    fn submit_value(&self) -> String {
        self.state.value.replace(GROUPING_SEPARATOR, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_groups_live_and_blur_keeps_grouping() {
        let mut field = MoneyField::default();
        assert_eq!(field.type_text("2500000"), 7);
        assert_eq!(field.value(), "2.500.000");
        field.on_blur();
        assert_eq!(field.value(), "2.500.000");
        field.on_focus();
        assert_eq!(field.value(), "2500000");
    }

    #[test]
    fn caret_jumps_to_end_when_length_changes() {
        let mut field = MoneyField::attach("250");
        field.state_mut().move_caret(1);
        field.type_char('9');
        // "2950" becomes "2.950"
        assert_eq!(field.value(), "2.950");
        assert_eq!(field.caret(), 5);
    }

    #[test]
    fn caret_is_kept_when_length_is_stable() {
        let mut field = MoneyField::attach("1.000");
        field.state_mut().move_caret(1);
        field.type_char('5');
        // "15.000" keeps its six characters after regrouping
        assert_eq!(field.value(), "15.000");
        assert_eq!(field.caret(), 2);
    }

    #[test]
    fn letters_are_dropped_and_empty_input_clears() {
        let mut field = MoneyField::default();
        field.type_text("12a");
        assert_eq!(field.value(), "12");
        field.backspace();
        field.backspace();
        assert_eq!(field.value(), "");
        field.on_blur();
        assert_eq!(field.value(), "");
    }

    #[test]
    fn attach_formats_server_values_once() {
        assert_eq!(MoneyField::attach("2500000.00").value(), "2.500.000");
        assert_eq!(MoneyField::attach("2.500.000").value(), "2.500.000");
        assert_eq!(MoneyField::attach("0").value(), "0");
        assert_eq!(MoneyField::attach("").value(), "");
    }

    #[test]
    fn submit_strips_grouping() {
        let field = MoneyField::attach("2.500.000");
        assert_eq!(field.submit_value(), "2500000");
    }
}
