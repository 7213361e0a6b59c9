use std::fmt;

use super::Selection;

/// Error returned when an edit event cannot be applied to a document.
///
/// Both kinds point at an integration problem with whatever feeds edits into
/// the engine. The document passed in is never modified when one is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditError {
    kind: EditErrorKind,

    /// Selection reported with the rejected event.
    selection: Selection,

    /// Length in chars of the previous raw text.
    previous_len: usize,

    /// Length in chars of the new raw text.
    new_len: usize,
}

impl EditError {
    pub fn kind(&self) -> EditErrorKind {
        self.kind
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn previous_len(&self) -> usize {
        self.previous_len
    }

    pub fn new_len(&self) -> usize {
        self.new_len
    }

    pub(crate) fn invalid_edit(
        reason: InvalidEditReason,
        selection: Selection,
        previous_len: usize,
        new_len: usize,
    ) -> Self {
        Self {
            kind: EditErrorKind::InvalidEdit(reason),
            selection,
            previous_len,
            new_len,
        }
    }

    pub(crate) fn length_mismatch(
        document_len: usize,
        previous_len: usize,
        selection: Selection,
        new_len: usize,
    ) -> Self {
        Self {
            kind: EditErrorKind::LengthMismatch { document_len },
            selection,
            previous_len,
            new_len,
        }
    }
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EditErrorKind::InvalidEdit(InvalidEditReason::CursorOutOfBounds) => write!(
                f,
                "selection {}..{} out of bounds for text of {} chars",
                self.selection.start, self.selection.end, self.new_len
            ),
            EditErrorKind::InvalidEdit(InvalidEditReason::UnrecognizedShape) => write!(
                f,
                "unrecognized edit from {} to {} chars with selection {}..{}",
                self.previous_len, self.new_len, self.selection.start, self.selection.end
            ),
            EditErrorKind::LengthMismatch { document_len } => write!(
                f,
                "document holds {} chars but previous text has {}",
                document_len, self.previous_len
            ),
        }
    }
}

impl std::error::Error for EditError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum EditErrorKind {
    /// The event does not describe an edit the engine can apply.
    InvalidEdit(InvalidEditReason),

    /// The document and the previous raw text were out of sync going in.
    LengthMismatch { document_len: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidEditReason {
    /// A selection offset lies beyond the end of the new text.
    CursorOutOfBounds,

    /// The text change cannot be lined up with the reported selection.
    UnrecognizedShape,
}
