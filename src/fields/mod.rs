//! Headless models of the money and percentage inputs. Each field owns its
//! text and caret and reacts to the same events a browser input would see.

pub mod money;
pub mod percentage;

pub use money::MoneyField;
pub use percentage::PercentageField;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Money,
    Percentage,
}

/// Current text of an input and the caret position, counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditState {
    pub value: String,
    pub caret: usize,
}

impl EditState {
    /// Places the caret at the end of `value`.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let caret = value.chars().count();
        Self { value, caret }
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replaces the text and moves the caret to the end.
    pub fn replace(&mut self, value: impl Into<String>) {
        *self = Self::new(value);
    }

    pub fn move_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.len());
    }

    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.caret);
        self.value.insert(at, ch);
        self.caret += 1;
    }

    /// Deletes the character before the caret. Returns `false` at offset 0.
    pub fn delete_before_caret(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        let at = self.byte_offset(self.caret - 1);
        self.value.remove(at);
        self.caret -= 1;
        true
    }

    fn byte_offset(&self, caret: usize) -> usize {
        self.value
            .char_indices()
            .nth(caret)
            .map_or(self.value.len(), |(idx, _)| idx)
    }
}

/// Event contract shared by formatted inputs.
pub trait LiveField {
    fn kind(&self) -> FieldKind;

    fn state(&self) -> &EditState;

    fn state_mut(&mut self) -> &mut EditState;

    /// Character admission filter applied before a keystroke lands.
    fn admits(&self, _ch: char) -> bool {
        true
    }

    /// Runs after every change to the text.
    fn on_input(&mut self);

    fn on_focus(&mut self);

    fn on_blur(&mut self);

    /// Plain numeric string sent to the server.
    fn submit_value(&self) -> String;

    fn value(&self) -> &str {
        &self.state().value
    }

    fn caret(&self) -> usize {
        self.state().caret
    }

    /// Types one character at the caret. Returns `false` if it was rejected.
    fn type_char(&mut self, ch: char) -> bool {
        if !self.admits(ch) {
            return false;
        }
        self.state_mut().insert(ch);
        self.on_input();
        true
    }

    /// Types `text` one character at a time and returns how many were
    /// admitted.
    fn type_text(&mut self, text: &str) -> usize {
        text.chars().filter(|ch| self.type_char(*ch)).count()
    }

    fn backspace(&mut self) {
        if self.state_mut().delete_before_caret() {
            self.on_input();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EditState;

    #[test]
    fn edit_state_inserts_at_caret() {
        let mut state = EditState::new("1500");
        state.move_caret(1);
        state.insert('2');
        assert_eq!(state.value, "12500");
        assert_eq!(state.caret, 2);
    }

    #[test]
    fn backspace_at_start_is_ignored() {
        let mut state = EditState::new("7");
        state.move_caret(0);
        assert!(!state.delete_before_caret());
        state.move_caret(10);
        assert_eq!(state.caret, 1);
        assert!(state.delete_before_caret());
        assert!(state.is_empty());
    }
}
