use crate::editor::content::{
    char_len, char_to_byte_idx, line_end, line_start, next_word_boundary,
    previous_word_boundary,
};
use crate::editor::{EditEvent, Selection};

/// A plain-text input surface.
///
/// Holds the raw text plus anchor and caret as char offsets and reports an
/// [`EditEvent`] after every change, the same way a platform text field
/// would. It knows nothing about styling.
#[derive(Clone, Debug, Default)]
pub struct TextField {
    text: String,
    anchor: usize,
    caret: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.anchor, self.caret)
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.caret
    }

    fn event(&self) -> EditEvent {
        EditEvent::new(self.text.clone(), self.selection())
    }

    /// Replaces the content, placing a collapsed caret at `caret` (clamped).
    pub fn reset(&mut self, text: &str, caret: usize) {
        self.text = text.to_string();
        self.caret = caret.min(char_len(text));
        self.anchor = self.caret;
    }

    pub fn insert_char(&mut self, ch: char) -> Option<EditEvent> {
        let mut buffer = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buffer))
    }

    pub fn newline(&mut self) -> Option<EditEvent> {
        self.insert_char('\n')
    }

    /// Inserts at the caret, replacing the selection if there is one.
    pub fn insert_str(&mut self, input: &str) -> Option<EditEvent> {
        if input.is_empty() && !self.has_selection() {
            return None;
        }
        let (start, end) = self.selection().ordered();
        self.replace_range(start, end, input);
        let caret = start + char_len(input);
        self.anchor = caret;
        self.caret = caret;
        Some(self.event())
    }

    pub fn backspace(&mut self) -> Option<EditEvent> {
        if self.has_selection() {
            return self.delete_selection();
        }
        if self.caret == 0 {
            return None;
        }
        let start = self.caret - 1;
        self.replace_range(start, self.caret, "");
        self.collapse_to(start);
        Some(self.event())
    }

    pub fn delete_forward(&mut self) -> Option<EditEvent> {
        if self.has_selection() {
            return self.delete_selection();
        }
        if self.caret >= char_len(&self.text) {
            return None;
        }
        self.replace_range(self.caret, self.caret + 1, "");
        Some(self.event())
    }

    pub fn delete_word_backward(&mut self) -> Option<EditEvent> {
        if self.has_selection() {
            return self.delete_selection();
        }
        let start = previous_word_boundary(&self.text, self.caret);
        if start == self.caret {
            return None;
        }
        self.replace_range(start, self.caret, "");
        self.collapse_to(start);
        Some(self.event())
    }

    fn delete_selection(&mut self) -> Option<EditEvent> {
        let (start, end) = self.selection().ordered();
        self.replace_range(start, end, "");
        self.collapse_to(start);
        Some(self.event())
    }

    pub fn move_left(&mut self, extend: bool) -> Option<EditEvent> {
        if !extend && self.has_selection() {
            let (start, _) = self.selection().ordered();
            return self.move_to(start, false);
        }
        self.move_to(self.caret.saturating_sub(1), extend)
    }

    pub fn move_right(&mut self, extend: bool) -> Option<EditEvent> {
        if !extend && self.has_selection() {
            let (_, end) = self.selection().ordered();
            return self.move_to(end, false);
        }
        let target = (self.caret + 1).min(char_len(&self.text));
        self.move_to(target, extend)
    }

    pub fn move_word_left(&mut self, extend: bool) -> Option<EditEvent> {
        let target = previous_word_boundary(&self.text, self.caret);
        self.move_to(target, extend)
    }

    pub fn move_word_right(&mut self, extend: bool) -> Option<EditEvent> {
        let target = next_word_boundary(&self.text, self.caret);
        self.move_to(target, extend)
    }

    pub fn move_home(&mut self, extend: bool) -> Option<EditEvent> {
        let target = line_start(&self.text, self.caret);
        self.move_to(target, extend)
    }

    pub fn move_end(&mut self, extend: bool) -> Option<EditEvent> {
        let target = line_end(&self.text, self.caret);
        self.move_to(target, extend)
    }

    /// Moves `delta` lines up (negative) or down, keeping the column where
    /// the target line is long enough. Moving past the first or last line
    /// lands on the start or end of the text.
    pub fn move_vertical(&mut self, delta: i32, extend: bool) -> Option<EditEvent> {
        if delta == 0 {
            return None;
        }
        let column = self.caret - line_start(&self.text, self.caret);
        let len = char_len(&self.text);
        let mut target = self.caret;
        for _ in 0..delta.unsigned_abs() {
            let current_start = line_start(&self.text, target);
            let current_end = line_end(&self.text, target);
            target = if delta < 0 {
                if current_start == 0 {
                    0
                } else {
                    let previous_start = line_start(&self.text, current_start - 1);
                    (previous_start + column).min(current_start - 1)
                }
            } else if current_end >= len {
                len
            } else {
                let next_start = current_end + 1;
                (next_start + column).min(line_end(&self.text, next_start))
            };
        }
        self.move_to(target, extend)
    }

    pub fn select_all(&mut self) -> Option<EditEvent> {
        let len = char_len(&self.text);
        if self.anchor == 0 && self.caret == len {
            return None;
        }
        self.anchor = 0;
        self.caret = len;
        Some(self.event())
    }

    fn move_to(&mut self, target: usize, extend: bool) -> Option<EditEvent> {
        let anchor = if extend { self.anchor } else { target };
        if target == self.caret && anchor == self.anchor {
            return None;
        }
        self.anchor = anchor;
        self.caret = target;
        Some(self.event())
    }

    fn collapse_to(&mut self, offset: usize) {
        self.anchor = offset;
        self.caret = offset;
    }

    fn replace_range(&mut self, start: usize, end: usize, replacement: &str) {
        let start_byte = char_to_byte_idx(&self.text, start);
        let end_byte = char_to_byte_idx(&self.text, end);
        self.text.replace_range(start_byte..end_byte, replacement);
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod input_tests;
