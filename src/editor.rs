use std::slice;

use tracing::{debug, warn};

pub mod content;
mod engine;
mod error;
mod format;
mod runs;

pub use engine::{EditOutcome, apply_edit, apply_edit_with_outcome};
pub use error::{EditError, EditErrorKind, InvalidEditReason};
pub use format::{Decoration, FontSize, FormatState, FormatToggle, Heading, Style, Weight};
pub use runs::{StyledRun, collect_runs};

/// Caret or selection as char offsets into a raw text.
///
/// `start` is where the selection was anchored and `end` where the caret is,
/// so `start > end` describes a selection made backwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Returns `(min, max)`.
    pub fn ordered(&self) -> (usize, usize) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyledChar {
    pub ch: char,
    pub style: Style,
}

impl StyledChar {
    pub fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

/// Ordered styled characters; the index of a character is its position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledDocument {
    chars: Vec<StyledChar>,
}

impl StyledDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps every char of `text` with the same style.
    pub fn from_text(text: &str, style: Style) -> Self {
        text.chars().map(|ch| StyledChar::new(ch, style)).collect()
    }

    pub(crate) fn from_vec(chars: Vec<StyledChar>) -> Self {
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StyledChar> {
        self.chars.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, StyledChar> {
        self.chars.iter()
    }

    pub fn as_slice(&self) -> &[StyledChar] {
        &self.chars
    }

    pub fn text(&self) -> String {
        self.chars.iter().map(|styled| styled.ch).collect()
    }

    pub fn runs(&self) -> Vec<StyledRun> {
        collect_runs(self)
    }
}

impl FromIterator<StyledChar> for StyledDocument {
    fn from_iter<I: IntoIterator<Item = StyledChar>>(iter: I) -> Self {
        Self {
            chars: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StyledDocument {
    type Item = &'a StyledChar;
    type IntoIter = slice::Iter<'a, StyledChar>;

    fn into_iter(self) -> Self::IntoIter {
        self.chars.iter()
    }
}

/// What a text input surface reports after every change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditEvent {
    pub text: String,
    pub selection: Selection,
}

impl EditEvent {
    pub fn new(text: impl Into<String>, selection: Selection) -> Self {
        Self {
            text: text.into(),
            selection,
        }
    }
}

/// Owns a document together with the raw text it mirrors and the format
/// toggles used for newly typed characters.
#[derive(Debug, Default)]
pub struct RichTextEditor {
    document: StyledDocument,
    text: String,
    selection: Selection,
    format: FormatState,
}

impl RichTextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &StyledDocument {
        &self.document
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn format(&self) -> &FormatState {
        &self.format
    }

    pub fn format_mut(&mut self) -> &mut FormatState {
        &mut self.format
    }

    pub fn apply_toggle(&mut self, toggle: FormatToggle) {
        self.format.apply(toggle);
        debug!(?toggle, format = ?self.format, "format toggled");
    }

    pub fn runs(&self) -> Vec<StyledRun> {
        self.document.runs()
    }

    /// Applies an event from the input surface.
    ///
    /// A non-collapsed selection held before the event marks the range that a
    /// change in text replaces. On error the previous document, text and
    /// selection stay in place.
    pub fn handle_edit(&mut self, event: &EditEvent) -> Result<EditOutcome, EditError> {
        match engine::apply_edit_from(
            &self.document,
            &self.text,
            &event.text,
            self.selection,
            event.selection,
            &self.format,
        ) {
            Ok((document, outcome)) => {
                self.document = document;
                if outcome != EditOutcome::Unchanged {
                    self.text.clone_from(&event.text);
                }
                self.selection = event.selection;
                Ok(outcome)
            }
            Err(err) => {
                warn!(%err, "rejected edit event");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod editor_tests;

#[cfg(test)]
#[path = "editor/format_tests.rs"]
mod format_tests;


#[cfg(test)]
#[path = "editor/runs_tests.rs"]
mod runs_tests;
