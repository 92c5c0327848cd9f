//! Single-line text input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editable single-line buffer with a char-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars().filter(|c| !c.is_control()) {
            self.insert(ch);
        }
    }

    fn insert(&mut self, ch: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
    }

    fn delete(&mut self) {
        if self.cursor >= self.value.chars().count() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Applies an editing key. Returns false when the key isn't an edit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.value.chars().count(),
            KeyCode::Char(_) if ctrl => return false,
            KeyCode::Char(ch) => self.insert(ch),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.value.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.chars().count(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(field: &mut TextField, text: &str) {
        for ch in text.chars() {
            field.handle_key(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::default();
        type_str(&mut field, "Dunes");
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "Dune");
        assert_eq!(field.cursor(), 4);
    }

    #[test]
    fn test_insert_in_middle_multibyte() {
        let mut field = TextField::with_value("Émle");
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Left));
        type_str(&mut field, "i");
        assert_eq!(field.value(), "Émile");
        field.handle_key(key(KeyCode::Home));
        field.handle_key(key(KeyCode::Delete));
        assert_eq!(field.value(), "mile");
    }

    #[test]
    fn test_ctrl_u_clears_and_other_ctrl_keys_pass_through() {
        let mut field = TextField::with_value("secret");
        assert!(!field.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL)));
        assert_eq!(field.value(), "secret");
        assert!(field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(field.is_empty());
    }

    #[test]
    fn test_paste_skips_control_chars() {
        let mut field = TextField::default();
        field.insert_str("a@b.co\n");
        assert_eq!(field.value(), "a@b.co");
    }
}
