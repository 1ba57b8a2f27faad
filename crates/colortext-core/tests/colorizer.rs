//! Colorizing through the editor: comment flags, token classes and pass budgets.

use colortext_core::{
    BuiltinLanguage, Coordinates, FunctionSymbol, LanguageDefinition, Palette, PaletteIndex,
    TextEditor,
};
use pretty_assertions::assert_eq;

fn c_editor(text: &str) -> TextEditor {
    let mut editor = TextEditor::default();
    editor
        .set_builtin_language(BuiltinLanguage::C)
        .expect("builtin languages compile");
    editor.set_text(text);
    editor.colorize_all();
    editor
}

fn classes(editor: &TextEditor, line: usize) -> Vec<PaletteIndex> {
    editor.document().lines()[line]
        .iter()
        .map(|g| g.class)
        .collect()
}

#[test]
fn test_c_program_classes_and_comment_flags() {
    let editor = c_editor("int x = 42; // note\n/* a\nb */ return \"s\";");
    let lines = editor.document().lines();

    use PaletteIndex::*;
    assert_eq!(&classes(&editor, 0)[..5], &[Keyword, Keyword, Keyword, Default, Identifier]);
    assert_eq!(lines[0][8].class, Number);
    assert_eq!(lines[0][9].class, Number);
    assert!(lines[0][12..].iter().all(|g| g.comment));
    assert!(lines[0][..12].iter().all(|g| !g.comment));

    assert!(lines[1].iter().all(|g| g.multi_line_comment));
    assert!(lines[2][..4].iter().all(|g| g.multi_line_comment));
    assert!(!lines[2][5].multi_line_comment);
    assert_eq!(lines[2][5].class, Keyword);
    assert_eq!(lines[2][12].class, String);

    let palette = Palette::dark();
    assert_eq!(editor.glyph_color(&lines[0][12]), palette.get(Comment));
    assert_eq!(editor.glyph_color(&lines[1][0]), palette.get(MultiLineComment));
    assert_eq!(editor.glyph_color(&lines[0][0]), palette.get(Keyword));
}

#[test]
fn test_opening_a_block_comment_recolors_following_lines() {
    let mut editor = c_editor("int a;\nint b;\nint c;");
    assert!(!editor.document().lines()[2][0].multi_line_comment);

    editor.set_cursor_position(Coordinates::new(0, 0));
    editor.insert_text("/*");
    assert!(editor.is_colorizing());
    editor.colorize_all();
    assert!(!editor.is_colorizing());
    let lines = editor.document().lines();
    assert!(lines.iter().flatten().all(|g| g.multi_line_comment));

    editor.undo(1);
    editor.colorize_all();
    let lines = editor.document().lines();
    assert!(lines.iter().flatten().all(|g| !g.multi_line_comment));
    assert_eq!(lines[2][0].class, PaletteIndex::Keyword);
}

#[test]
fn test_keyword_needs_whole_token() {
    let language = LanguageDefinition::new("Toy")
        .with_keywords(["if"])
        .with_rule("[a-zA-Z_][a-zA-Z0-9_]*", PaletteIndex::Identifier);
    let mut editor = TextEditor::default();
    editor.set_language(language).expect("valid rules");
    editor.set_text("if ifx");
    editor.colorize_all();

    use PaletteIndex::*;
    assert_eq!(
        classes(&editor, 0),
        vec![Keyword, Keyword, Default, Identifier, Identifier, Identifier]
    );
}

#[test]
fn test_regex_languages_colorize_in_bounded_passes() {
    let language = LanguageDefinition::new("Toy")
        .with_keywords(["if"])
        .with_rule("[a-z]+", PaletteIndex::Identifier);
    let mut editor = TextEditor::default();
    editor.set_language(language).expect("valid rules");
    editor.set_text(&vec!["if"; 25].join("\n"));

    let mut passes = 0;
    while editor.process_colorization() {
        passes += 1;
    }
    assert_eq!(passes, 2);
    assert!(
        editor
            .document()
            .lines()
            .iter()
            .all(|line| line[0].class == PaletteIndex::Keyword)
    );
}

#[test]
fn test_program_symbols_drive_classes() {
    let mut editor = c_editor("void shade(int uv) {\n\treturn uv + tint;\n}\n\nint after = uv;");
    editor.add_autocomplete_function(FunctionSymbol::new("shade", 0, 2).with_arguments(["uv"]));
    editor.add_autocomplete_global("tint");
    editor.colorize_all();

    let lines = editor.document().lines();
    assert_eq!(lines[0][5].class, PaletteIndex::UserFunction);
    assert_eq!(lines[1][8].class, PaletteIndex::FunctionArgument);
    assert_eq!(lines[1][13].class, PaletteIndex::GlobalVariable);
    // Out of the function's scope the argument is a plain identifier.
    assert_eq!(lines[4][12].class, PaletteIndex::Identifier);

    editor.clear_autocomplete_data();
    editor.colorize_all();
    assert_eq!(editor.document().lines()[0][5].class, PaletteIndex::Identifier);
}

#[test]
fn test_disabled_colorizer_uses_default_color() {
    let mut editor = c_editor("int x;");
    editor.set_colorizer_enabled(false);
    assert!(!editor.process_colorization());
    let glyph = editor.document().lines()[0][0];
    assert_eq!(glyph.class, PaletteIndex::Default);
    assert_eq!(editor.glyph_color(&glyph), Palette::dark().get(PaletteIndex::Default));

    editor.set_colorizer_enabled(true);
    editor.colorize_all();
    assert_eq!(editor.document().lines()[0][0].class, PaletteIndex::Keyword);
}
