use colortext_core::{
    AutocompleteCommand, Command, CommandError, CommandExecutor, CommandResult, Coordinates,
    CursorCommand, EditCommand, EditorConfig, SelectionMode,
};
use pretty_assertions::assert_eq;

fn type_str(text: &str) -> Vec<Command> {
    text.chars()
        .map(|ch| Command::Edit(EditCommand::EnterCharacter { ch, shift: false }))
        .collect()
}

#[test]
fn test_failed_commands_are_still_recorded() {
    let mut executor = CommandExecutor::new(EditorConfig::default());
    let result = executor.execute(Command::Edit(EditCommand::Undo { steps: 1 }));

    assert!(matches!(result, Err(CommandError::NothingToUndo)));
    assert_eq!(executor.editor().text(), "");
    assert_eq!(executor.command_history().len(), 1);
}

#[test]
fn test_typing_session_with_completion() {
    let mut executor = CommandExecutor::new(EditorConfig::default().with_complete_braces(true));
    executor
        .editor_mut()
        .add_autocomplete_entry("print", "print(value)", "print({$1:value})");

    let results = executor.execute_batch(type_str("pr")).unwrap();
    assert_eq!(
        results.last(),
        Some(&CommandResult::Position(Coordinates::new(0, 2)))
    );

    assert_eq!(
        executor.execute(Command::Autocomplete(AutocompleteCommand::Open)),
        Ok(CommandResult::Open(true))
    );
    assert_eq!(
        executor.execute(Command::Autocomplete(AutocompleteCommand::Accept)),
        Ok(CommandResult::Position(Coordinates::new(0, 11)))
    );
    assert_eq!(executor.editor().text(), "print(value)");
    assert!(executor.editor().is_snippet_active());

    executor
        .execute(Command::Cursor(CursorCommand::MoveEnd { select: false }))
        .unwrap();
    executor.execute_batch(type_str(";")).unwrap();
    assert_eq!(executor.editor().text(), "print(value);");
    assert!(!executor.editor().is_snippet_active());
}

#[test]
fn test_clipboard_commands() {
    let mut executor = CommandExecutor::default();
    executor.editor_mut().set_text("first\nsecond");

    executor
        .execute(Command::Cursor(CursorCommand::SetSelection {
            start: Coordinates::new(1, 0),
            end: Coordinates::new(1, 6),
            mode: SelectionMode::Normal,
        }))
        .unwrap();
    assert_eq!(
        executor.execute(Command::Edit(EditCommand::Cut)),
        Ok(CommandResult::Text("second".to_string()))
    );
    assert_eq!(
        executor.execute(Command::Edit(EditCommand::Cut)),
        Ok(CommandResult::Success)
    );

    executor
        .execute(Command::Cursor(CursorCommand::MoveTop { select: false }))
        .unwrap();
    executor
        .execute(Command::Edit(EditCommand::Paste {
            text: "second\n".to_string(),
        }))
        .unwrap();
    assert_eq!(executor.editor().text(), "second\nfirst\n");

    assert_eq!(
        executor.execute(Command::Edit(EditCommand::Undo { steps: 2 })),
        Ok(CommandResult::Count(2))
    );
    assert_eq!(executor.editor().text(), "first\nsecond");
}

#[test]
fn test_word_selection_and_indent() {
    let mut executor = CommandExecutor::default();
    executor.editor_mut().set_text("let total = 0;\nreturn total + 1;");

    executor
        .execute(Command::Cursor(CursorCommand::MoveTo { line: 1, column: 9 }))
        .unwrap();
    assert_eq!(
        executor.execute(Command::Cursor(CursorCommand::SelectWordUnderCursor)),
        Ok(CommandResult::Text("total".to_string()))
    );

    executor
        .execute(Command::Cursor(CursorCommand::SelectAll))
        .unwrap();
    executor
        .execute(Command::Edit(EditCommand::Indent))
        .unwrap();
    assert_eq!(
        executor.editor().text(),
        "\tlet total = 0;\n\treturn total + 1;"
    );
    executor
        .execute(Command::Edit(EditCommand::Unindent))
        .unwrap();
    assert_eq!(executor.editor().text(), "let total = 0;\nreturn total + 1;");
}

#[test]
fn test_into_editor_keeps_state() {
    let mut executor = CommandExecutor::default();
    executor.execute_batch(type_str("ab")).unwrap();
    assert!(executor.can_undo());
    assert!(!executor.can_redo());

    let editor = executor.into_editor();
    assert_eq!(editor.text(), "ab");
    assert_eq!(editor.undo_depth(), 2);
}
