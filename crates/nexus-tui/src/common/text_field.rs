//! Single-line text input buffer.

/// Editable field with an optional length cap; the cursor is always at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    max_len: Option<usize>,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            value: String::new(),
            max_len: Some(max_len),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn push(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(max) = self.max_len
            && self.value.chars().count() >= max
        {
            return;
        }
        self.value.push(c);
    }

    /// Inserts pasted text, dropping newlines.
    pub fn paste(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' || c == '\r' {
                self.push(' ');
            } else {
                self.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    /// Ctrl+W: removes the last word and any trailing whitespace before it.
    pub fn delete_word(&mut self) {
        let trimmed = self.value.trim_end().len();
        self.value.truncate(trimmed);
        let cut = self
            .value
            .rfind(char::is_whitespace)
            .map_or(0, |idx| idx + 1);
        self.value.truncate(cut);
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_ignores_control_chars() {
        let mut field = TextField::new();
        field.push('a');
        field.push('\t');
        field.push('b');
        assert_eq!(field.value(), "ab");
    }

    #[test]
    fn test_max_len_caps_input() {
        let mut field = TextField::with_max_len(3);
        field.paste("abcdef");
        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut field = TextField::new();
        field.paste("one\ntwo");
        assert_eq!(field.value(), "one two");
    }

    #[test]
    fn test_delete_word() {
        let mut field = TextField::new();
        field.set("hello big world  ");
        field.delete_word();
        assert_eq!(field.value(), "hello big ");
        field.delete_word();
        assert_eq!(field.value(), "hello ");
        field.delete_word();
        assert_eq!(field.value(), "");
    }
}
