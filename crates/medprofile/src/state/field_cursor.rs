use medprofile_core::ProfileField;

/// Which form field has focus, and where the cursor sits in it.
///
/// `pos` counts characters, not bytes, so multi-byte input edits cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCursor {
    pub field: ProfileField,
    pub pos: usize,
}

impl Default for FieldCursor {
    fn default() -> Self {
        Self {
            field: ProfileField::FullName,
            pos: 0,
        }
    }
}

/// Byte offset of the `char_pos`-th character (or the end of `value`).
fn byte_offset(value: &str, char_pos: usize) -> usize {
    value
        .char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}

impl FieldCursor {
    /// Focus `field` with the cursor after its last character.
    pub fn focus(&mut self, field: ProfileField, value: &str) {
        self.field = field;
        self.pos = value.chars().count();
    }

    pub fn insert_char(&mut self, value: &mut String, c: char) {
        let at = byte_offset(value, self.pos);
        value.insert(at, c);
        self.pos += 1;
    }

    pub fn backspace(&mut self, value: &mut String) {
        if self.pos > 0 {
            self.pos -= 1;
            let at = byte_offset(value, self.pos);
            value.remove(at);
        }
    }

    pub fn delete(&mut self, value: &mut String) {
        if self.pos < value.chars().count() {
            let at = byte_offset(value, self.pos);
            value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    pub fn move_right(&mut self, value: &str) {
        if self.pos < value.chars().count() {
            self.pos += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.pos = 0;
    }

    pub fn move_end(&mut self, value: &str) {
        self.pos = value.chars().count();
    }

    /// Keep the cursor inside `value` after it changed underneath us.
    pub fn clamp(&mut self, value: &str) {
        self.pos = self.pos.min(value.chars().count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut cursor = FieldCursor::default();
        let mut value = String::new();
        for c in "Jne".chars() {
            cursor.insert_char(&mut value, c);
        }
        cursor.move_left();
        cursor.move_left();
        cursor.insert_char(&mut value, 'a');
        assert_eq!(value, "Jane");
        assert_eq!(cursor.pos, 2);

        cursor.backspace(&mut value);
        assert_eq!(value, "Jne");
        assert_eq!(cursor.pos, 1);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut cursor = FieldCursor::default();
        let mut value = "Zoë".to_string();
        cursor.move_end(&value);
        assert_eq!(cursor.pos, 3);
        cursor.backspace(&mut value);
        assert_eq!(value, "Zo");
        cursor.insert_char(&mut value, 'é');
        assert_eq!(value, "Zoé");
        cursor.move_home();
        cursor.delete(&mut value);
        assert_eq!(value, "oé");
    }

    #[test]
    fn test_bounds() {
        let mut cursor = FieldCursor::default();
        let mut value = "ab".to_string();
        cursor.backspace(&mut value);
        assert_eq!(value, "ab");
        cursor.move_left();
        assert_eq!(cursor.pos, 0);

        cursor.move_end(&value);
        cursor.delete(&mut value);
        assert_eq!(value, "ab");
        cursor.move_right(&value);
        assert_eq!(cursor.pos, 2);

        cursor.pos = 10;
        cursor.clamp(&value);
        assert_eq!(cursor.pos, 2);
    }

    #[test]
    fn test_focus_places_cursor_at_end() {
        let mut cursor = FieldCursor::default();
        cursor.focus(ProfileField::Allergies, "None");
        assert_eq!(cursor.field, ProfileField::Allergies);
        assert_eq!(cursor.pos, 4);
    }
}
