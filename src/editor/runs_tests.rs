use super::*;

fn styled(ch: char, bold: bool) -> StyledChar {
    let mut format = FormatState::new();
    if bold {
        format.toggle_bold();
    }
    StyledChar::new(ch, format.current_style())
}

#[test]
fn empty_document_has_no_runs() {
    assert!(collect_runs(&StyledDocument::new()).is_empty());
}

#[test]
fn consecutive_equal_styles_merge() {
    let document: StyledDocument = vec![
        styled('a', false),
        styled('b', false),
        styled('C', true),
        styled('D', true),
        styled('e', false),
    ]
    .into_iter()
    .collect();

    let runs = collect_runs(&document);
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].text, "ab");
    assert_eq!(runs[0].range, 0..2);
    assert!(!runs[0].style.is_bold());
    assert_eq!(runs[1].text, "CD");
    assert_eq!(runs[1].range, 2..4);
    assert!(runs[1].style.is_bold());
    assert_eq!(runs[2].text, "e");
    assert_eq!(runs[2].range, 4..5);
    assert_eq!(runs[2].len(), 1);
}

#[test]
fn same_style_separated_by_other_style_stays_split() {
    let document: StyledDocument = vec![styled('a', true), styled('b', false), styled('c', true)]
        .into_iter()
        .collect();
    let runs = collect_runs(&document);
    assert_eq!(runs.len(), 3);
}

#[test]
fn concatenated_runs_reproduce_text() {
    let document: StyledDocument = "mixed 🔥 text\nline two"
        .chars()
        .enumerate()
        .map(|(idx, ch)| styled(ch, idx % 4 < 2))
        .collect();

    let runs = collect_runs(&document);
    let rebuilt: String = runs.iter().map(|run| run.text.as_str()).collect();
    assert_eq!(rebuilt, document.text());
    let covered: usize = runs.iter().map(StyledRun::len).sum();
    assert_eq!(covered, document.len());
}
