use tracing::debug;

use super::{
    EditError, FormatState, InvalidEditReason, Selection, Style, StyledChar, StyledDocument,
};

/// How an edit event was interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text is identical; only the caret or selection moved.
    Unchanged,
    /// `count` new chars now start at `at`.
    Inserted { at: usize, count: usize },
    /// `count` chars starting at `at` were removed.
    Deleted { at: usize, count: usize },
    /// `removed` old chars at `at` were replaced by `inserted` new ones.
    Replaced {
        at: usize,
        removed: usize,
        inserted: usize,
    },
}

/// Computes the document that mirrors `new_text` after an edit.
///
/// `previous` must describe `previous_text` char by char. Newly created
/// characters get `format.current_style()`; everything else keeps the style it
/// was created with and only moves. `previous` is left untouched, also on
/// error.
pub fn apply_edit(
    previous: &StyledDocument,
    previous_text: &str,
    new_text: &str,
    selection: Selection,
    format: &FormatState,
) -> Result<StyledDocument, EditError> {
    apply_edit_with_outcome(previous, previous_text, new_text, selection, format)
        .map(|(document, _)| document)
}

/// Same as [`apply_edit`], also reporting how the event was classified.
pub fn apply_edit_with_outcome(
    previous: &StyledDocument,
    previous_text: &str,
    new_text: &str,
    selection: Selection,
    format: &FormatState,
) -> Result<(StyledDocument, EditOutcome), EditError> {
    apply_edit_from(
        previous,
        previous_text,
        new_text,
        Selection::default(),
        selection,
        format,
    )
}

/// Applies an edit knowing the selection that was active before it.
///
/// When `previous_selection` covers a range and the new text is that range
/// swapped for something else, the whole range counts as replaced.
pub(crate) fn apply_edit_from(
    previous: &StyledDocument,
    previous_text: &str,
    new_text: &str,
    previous_selection: Selection,
    selection: Selection,
    format: &FormatState,
) -> Result<(StyledDocument, EditOutcome), EditError> {
    let old: Vec<char> = previous_text.chars().collect();
    let new: Vec<char> = new_text.chars().collect();

    if previous.len() != old.len() {
        return Err(EditError::length_mismatch(
            previous.len(),
            old.len(),
            selection,
            new.len(),
        ));
    }

    let (start, end) = selection.ordered();
    if end > new.len() {
        return Err(EditError::invalid_edit(
            InvalidEditReason::CursorOutOfBounds,
            selection,
            old.len(),
            new.len(),
        ));
    }

    let outcome = if old == new {
        Some(EditOutcome::Unchanged)
    } else {
        replaced_selection(&old, &new, previous_selection)
            .or_else(|| classify_edit(&old, &new, start, end))
    };
    let Some(outcome) = outcome else {
        return Err(EditError::invalid_edit(
            InvalidEditReason::UnrecognizedShape,
            selection,
            old.len(),
            new.len(),
        ));
    };

    let style = format.current_style();
    let document = match outcome {
        EditOutcome::Unchanged => previous.clone(),
        EditOutcome::Inserted { at, count } => {
            insert_run(previous, at, &new[at..at + count], style)
        }
        EditOutcome::Deleted { at, count } => remove_run(previous, at, count),
        EditOutcome::Replaced {
            at,
            removed,
            inserted,
        } => replace_run(previous, at, removed, &new[at..at + inserted], style),
    };

    debug!(?outcome, ?style, len = document.len(), "applied edit");
    Ok((document, outcome))
}

/// Decides which kind of edit turns `old` into `new`, given the selection
/// reported after the edit. `old` and `new` differ. Every check is a linear
/// scan.
fn classify_edit(old: &[char], new: &[char], start: usize, end: usize) -> Option<EditOutcome> {
    let collapsed = start == end;

    // A typed run ends right before the caret.
    if collapsed && new.len() > old.len() {
        let count = new.len() - old.len();
        if let Some(at) = start.checked_sub(count)
            && new[..at] == old[..at]
            && new[start..] == old[at..]
        {
            return Some(EditOutcome::Inserted { at, count });
        }
    }

    // The caret sits where the gap was closed.
    if collapsed && new.len() < old.len() {
        let count = old.len() - new.len();
        let at = start;
        if new[..at] == old[..at] && new[at..] == old[at + count..] {
            return Some(EditOutcome::Deleted { at, count });
        }
    }

    // Anything else is a replacement that ends at the selection end: the text
    // after it must be the unchanged tail of the old text.
    let suffix = new.len() - end;
    if suffix > old.len() {
        return None;
    }
    let old_end = old.len() - suffix;
    if new[end..] != old[old_end..] {
        return None;
    }
    let limit = start.min(old_end);
    let at = common_prefix_len(&old[..limit], &new[..limit]);

    Some(EditOutcome::Replaced {
        at,
        removed: old_end - at,
        inserted: end - at,
    })
}

/// Matches `new` against `old` with the previously selected range swapped out.
fn replaced_selection(old: &[char], new: &[char], selection: Selection) -> Option<EditOutcome> {
    let (at, old_end) = selection.ordered();
    if at == old_end || old_end > old.len() {
        return None;
    }
    let removed = old_end - at;
    let inserted = (new.len() + removed).checked_sub(old.len())?;
    if new[..at] != old[..at] || new[at + inserted..] != old[old_end..] {
        return None;
    }
    Some(if inserted == 0 {
        EditOutcome::Deleted { at, count: removed }
    } else {
        EditOutcome::Replaced {
            at,
            removed,
            inserted,
        }
    })
}

fn common_prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(left, right)| left == right).count()
}

fn stamp(run: &[char], style: Style) -> impl Iterator<Item = StyledChar> + '_ {
    run.iter().map(move |&ch| StyledChar { ch, style })
}

fn insert_run(previous: &StyledDocument, at: usize, run: &[char], style: Style) -> StyledDocument {
    let mut chars = Vec::with_capacity(previous.len() + run.len());
    chars.extend_from_slice(previous.as_slice());
    if at == chars.len() {
        chars.extend(stamp(run, style));
    } else {
        chars.splice(at..at, stamp(run, style));
    }
    StyledDocument::from_vec(chars)
}

fn remove_run(previous: &StyledDocument, at: usize, count: usize) -> StyledDocument {
    let mut chars = previous.as_slice().to_vec();
    chars.drain(at..at + count);
    StyledDocument::from_vec(chars)
}

fn replace_run(
    previous: &StyledDocument,
    at: usize,
    removed: usize,
    run: &[char],
    style: Style,
) -> StyledDocument {
    let mut chars = previous.as_slice().to_vec();
    chars.splice(at..at + removed, stamp(run, style));
    StyledDocument::from_vec(chars)
}
