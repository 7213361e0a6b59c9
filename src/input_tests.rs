use super::*;
use crate::editor::{EditOutcome, FormatToggle, RichTextEditor};

fn field_with(text: &str) -> TextField {
    let mut field = TextField::new();
    field.reset(text, char_len(text));
    field
}

#[test]
fn typing_moves_caret_and_reports_event() {
    let mut field = TextField::new();
    field.insert_char('h');
    let event = field.insert_char('é').unwrap();

    assert_eq!(event.text, "hé");
    assert_eq!(event.selection, Selection::caret(2));
    assert_eq!(field.caret(), 2);
}

#[test]
fn insert_replaces_selection() {
    let mut field = field_with("hello world");
    field.select_all();
    let event = field.insert_str("bye").unwrap();

    assert_eq!(event.text, "bye");
    assert_eq!(event.selection, Selection::caret(3));
    assert!(!field.has_selection());
}

#[test]
fn backspace_at_start_does_nothing() {
    let mut field = field_with("abc");
    field.move_home(false);
    assert!(field.backspace().is_none());
    assert_eq!(field.text(), "abc");
}

#[test]
fn backspace_and_delete_forward() {
    let mut field = field_with("abcd");
    field.move_left(false);
    field.move_left(false);

    let event = field.backspace().unwrap();
    assert_eq!(event.text, "acd");
    assert_eq!(event.selection, Selection::caret(1));

    let event = field.delete_forward().unwrap();
    assert_eq!(event.text, "ad");
    assert_eq!(event.selection, Selection::caret(1));
}

#[test]
fn shift_movement_extends_selection() {
    let mut field = field_with("hello");
    field.move_left(true);
    let event = field.move_left(true).unwrap();
    assert_eq!(event.selection, Selection::new(5, 3));
    assert_eq!(event.text, "hello");

    let event = field.backspace().unwrap();
    assert_eq!(event.text, "hel");
    assert_eq!(event.selection, Selection::caret(3));
}

#[test]
fn plain_movement_collapses_selection_to_its_edge() {
    let mut field = field_with("hello");
    field.move_word_left(true);
    assert_eq!(field.selection(), Selection::new(5, 0));

    field.move_right(false);
    assert_eq!(field.selection(), Selection::caret(5));
}

#[test]
fn movement_at_edges_reports_nothing() {
    let mut field = field_with("ab");
    assert!(field.move_right(false).is_none());
    assert!(field.move_end(false).is_none());
    field.move_home(false);
    assert!(field.move_left(false).is_none());
}

#[test]
fn delete_word_backward_removes_previous_word() {
    let mut field = field_with("foo bar baz");
    let event = field.delete_word_backward().unwrap();
    assert_eq!(event.text, "foo bar ");
    assert_eq!(event.selection, Selection::caret(8));
}

#[test]
fn vertical_movement_keeps_column() {
    let mut field = field_with("abcd\nxy\nlonger");
    field.reset("abcd\nxy\nlonger", 3);

    field.move_vertical(1, false);
    assert_eq!(field.caret(), 7);

    field.move_vertical(1, false);
    assert_eq!(field.caret(), 10);

    field.move_vertical(-1, false);
    assert_eq!(field.caret(), 7);

    field.move_vertical(-1, false);
    field.move_vertical(-1, false);
    assert_eq!(field.caret(), 0);
}

#[test]
fn home_and_end_respect_lines() {
    let mut field = TextField::new();
    field.reset("one\ntwo", 5);
    field.move_home(false);
    assert_eq!(field.caret(), 4);
    field.move_end(false);
    assert_eq!(field.caret(), 7);
}

#[test]
fn field_events_keep_editor_in_sync() {
    let mut field = TextField::new();
    let mut editor = RichTextEditor::new();

    for ch in "Hello".chars() {
        let event = field.insert_char(ch).unwrap();
        editor.handle_edit(&event).unwrap();
    }
    editor.apply_toggle(FormatToggle::Bold);
    let event = field.move_word_left(true).unwrap();
    assert_eq!(editor.handle_edit(&event).unwrap(), EditOutcome::Unchanged);

    let event = field.insert_str("World").unwrap();
    assert_eq!(
        editor.handle_edit(&event).unwrap(),
        EditOutcome::Replaced {
            at: 0,
            removed: 5,
            inserted: 5
        }
    );
    assert!(editor.document().iter().all(|styled| styled.style.is_bold()));

    let event = field.newline().unwrap();
    editor.handle_edit(&event).unwrap();
    let event = field.backspace().unwrap();
    editor.handle_edit(&event).unwrap();

    assert_eq!(editor.text(), field.text());
    assert_eq!(editor.document().text(), "World");
}

#[test]
fn vertical_movement_by_zero_is_ignored() {
    let mut field = TextField::new();
    field.reset("one\ntwo", 1);
    assert!(field.move_vertical(0, false).is_none());
    assert_eq!(field.caret(), 1);
}

#[test]
fn vertical_movement_spans_several_lines() {
    let mut field = TextField::new();
    field.reset("abc\nd\nefgh\nij", 2);

    field.move_vertical(2, false);
    assert_eq!(field.caret(), 8);

    let event = field.move_vertical(-2, true).unwrap();
    assert_eq!(event.selection, Selection::new(8, 2));

    field.move_vertical(10, false);
    assert_eq!(field.caret(), 13);
}

#[test]
fn typing_over_selection_with_its_first_char_uses_current_format() {
    let mut field = TextField::new();
    let mut editor = RichTextEditor::new();
    editor.apply_toggle(FormatToggle::Bold);
    for ch in "ab".chars() {
        let event = field.insert_char(ch).unwrap();
        editor.handle_edit(&event).unwrap();
    }
    editor.apply_toggle(FormatToggle::Bold);

    let event = field.select_all().unwrap();
    editor.handle_edit(&event).unwrap();
    let event = field.insert_char('a').unwrap();
    let outcome = editor.handle_edit(&event).unwrap();

    assert_eq!(
        outcome,
        EditOutcome::Replaced {
            at: 0,
            removed: 2,
            inserted: 1
        }
    );
    assert_eq!(editor.document().text(), "a");
    assert!(!editor.document().as_slice()[0].style.is_bold());
}
