//! Char-offset helpers shared by the text field and the engine tests.
//!
//! Every offset here counts `char`s, never bytes.

/// Byte index of the `char_idx`-th char, or the text length past the end.
pub fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte_idx, _)| byte_idx)
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Word,
    Punctuation,
}

impl CharClass {
    fn of(ch: char) -> Self {
        if ch.is_whitespace() {
            CharClass::Whitespace
        } else if ch.is_alphanumeric() || ch == '_' {
            CharClass::Word
        } else {
            CharClass::Punctuation
        }
    }
}

fn classes(text: &str) -> Vec<CharClass> {
    text.chars().map(CharClass::of).collect()
}

/// Start of the word left of `offset`: whitespace first, then one word and
/// the punctuation glued to its front.
pub fn previous_word_boundary(text: &str, offset: usize) -> usize {
    let classes = classes(text);
    let mut idx = offset.min(classes.len());
    for class in [
        CharClass::Whitespace,
        CharClass::Word,
        CharClass::Punctuation,
    ] {
        while idx > 0 && classes[idx - 1] == class {
            idx -= 1;
        }
    }
    idx
}

/// Start of the next word right of `offset`, past trailing punctuation and
/// whitespace.
pub fn next_word_boundary(text: &str, offset: usize) -> usize {
    let classes = classes(text);
    let mut idx = offset.min(classes.len());
    for class in [
        CharClass::Word,
        CharClass::Punctuation,
        CharClass::Whitespace,
    ] {
        while idx < classes.len() && classes[idx] == class {
            idx += 1;
        }
    }
    idx
}

/// Offset of the first char on the line containing `offset`.
pub fn line_start(text: &str, offset: usize) -> usize {
    let mut start = 0;
    for (idx, ch) in text.chars().enumerate() {
        if idx >= offset {
            break;
        }
        if ch == '\n' {
            start = idx + 1;
        }
    }
    start
}

/// Offset of the newline ending the line containing `offset`, or the text
/// length on the last line.
pub fn line_end(text: &str, offset: usize) -> usize {
    let mut len = 0;
    for (idx, ch) in text.chars().enumerate() {
        if idx >= offset && ch == '\n' {
            return idx;
        }
        len = idx + 1;
    }
    len
}
