use std::ops::Range;

use super::{Style, StyledDocument};

/// A maximal stretch of consecutive characters sharing one [`Style`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledRun {
    /// Char range covered in the document.
    pub range: Range<usize>,
    pub text: String,
    pub style: Style,
}

impl StyledRun {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Merges equal-style neighbours into runs for display.
pub fn collect_runs(document: &StyledDocument) -> Vec<StyledRun> {
    let mut runs: Vec<StyledRun> = Vec::new();
    for (idx, styled) in document.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.style == styled.style => {
                run.text.push(styled.ch);
                run.range.end = idx + 1;
            }
            _ => runs.push(StyledRun {
                range: idx..idx + 1,
                text: styled.ch.to_string(),
                style: styled.style,
            }),
        }
    }
    runs
}
