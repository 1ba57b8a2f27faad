use colortext_core::{Coordinates, EditorConfig, SelectionMode, TextEditor};
use pretty_assertions::assert_eq;

fn editor_with(text: &str) -> TextEditor {
    let mut editor = TextEditor::new(EditorConfig::default());
    editor.set_text(text);
    editor
}

#[test]
fn test_cross_line_delete_joins_lines() {
    // Columns are visual: (1,2) is after "de", leaving the tail "f".
    let mut editor = editor_with("abc\ndef");
    editor.delete_range(Coordinates::new(0, 1), Coordinates::new(1, 2));
    assert_eq!(editor.text(), "af");
    assert_eq!(editor.line_count(), 1);
}

#[test]
fn test_tab_columns_round_trip_through_cursor() {
    let mut editor = editor_with("\tX");
    assert_eq!(editor.document().column_of(0, 0), 0);
    assert_eq!(editor.document().column_of(0, 1), 4);
    assert_eq!(editor.document().column_of(0, 2), 5);

    // A column inside the tab snaps to the character boundary after it.
    editor.set_cursor_position(Coordinates::new(0, 2));
    editor.enter_character('Y', false);
    assert_eq!(editor.text(), "\tYX");
}

#[test]
fn test_multibyte_characters_take_one_column() {
    let mut editor = editor_with("héllo wörld");
    assert_eq!(editor.document().max_column(0), 11);
    editor.set_selection(
        Coordinates::new(0, 6),
        Coordinates::new(0, 11),
        SelectionMode::Normal,
    );
    assert_eq!(editor.selected_text(), "wörld");

    editor.enter_character('ü', false);
    assert_eq!(editor.text(), "héllo ü");
    assert_eq!(editor.cursor_position(), Coordinates::new(0, 7));
}

#[test]
fn test_typing_a_program() {
    let mut editor = editor_with("");
    for ch in "int f() {\nreturn 1;\n}".chars() {
        editor.enter_character(ch, false);
    }
    // Newlines copy the current line's indentation; nothing adds a level.
    assert_eq!(editor.text(), "int f() {\nreturn 1;\n}");

    let mut editor = editor_with("");
    editor.set_complete_braces(true);
    for ch in "if x {".chars() {
        editor.enter_character(ch, false);
    }
    assert_eq!(editor.text(), "if x {\n}");
    assert_eq!(editor.cursor_position(), Coordinates::new(1, 0));
    editor.undo(1);
    assert_eq!(editor.text(), "if x ");
}

#[test]
fn test_paste_with_auto_indent() {
    let mut editor = editor_with("\tfn()");
    editor.set_auto_indent_on_paste(true);
    editor.move_end(false);
    editor.paste(" {\nbody();\n}");
    assert_eq!(editor.text(), "\tfn() {\n\t\tbody();\n\t}");
    assert_eq!(editor.cursor_position(), Coordinates::new(2, 5));

    editor.undo(1);
    assert_eq!(editor.text(), "\tfn()");
}

#[test]
fn test_structural_edits_keep_one_line() {
    let mut editor = editor_with("only");
    editor.delete_range(Coordinates::new(0, 0), Coordinates::new(0, 4));
    assert_eq!(editor.text(), "");
    assert_eq!(editor.line_count(), 1);

    editor.set_cursor_position(Coordinates::default());
    editor.backspace();
    editor.delete();
    assert_eq!(editor.text(), "");
    assert!(!editor.can_undo());
}

#[test]
fn test_select_word_and_line_modes() {
    let mut editor = editor_with("let value = 42;\nnext");
    editor.set_cursor_position(Coordinates::new(0, 6));
    editor.select_word_under_cursor();
    assert_eq!(editor.selected_text(), "value");

    editor.set_selection(
        Coordinates::new(0, 3),
        Coordinates::new(1, 1),
        SelectionMode::Line,
    );
    assert_eq!(editor.selected_text(), "let value = 42;\nnext");

    editor.select_all();
    editor.cut();
    assert_eq!(editor.text(), "");
    editor.undo(1);
    assert_eq!(editor.text(), "let value = 42;\nnext");
}

#[test]
fn test_version_and_changed_flag() {
    let mut editor = editor_with("a");
    let version = editor.version();
    editor.reset_text_changed();

    editor.move_end(true);
    assert_eq!(editor.version(), version);
    assert!(!editor.is_text_changed());

    editor.enter_character('b', false);
    assert!(editor.version() > version);
    assert!(editor.is_text_changed());
}
